//! Finished-game record stores

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{StoreError, read_json, write_json};
use crate::stats::GameRecord;

/// Append-only store of finished games
pub trait RecordStore {
    /// Every record, newest first
    fn load_all_records(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Insert a record; a record with the same timestamp is replaced
    fn insert_record(&mut self, record: GameRecord) -> Result<(), StoreError>;
}

/// Keeps records in memory (tests, demo runs without a data dir)
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<GameRecord>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load_all_records(&self) -> Result<Vec<GameRecord>, StoreError> {
        let mut records = self.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn insert_record(&mut self, record: GameRecord) -> Result<(), StoreError> {
        upsert(&mut self.records, record);
        Ok(())
    }
}

/// Versioned file envelope
#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    version: u32,
    records: Vec<GameRecord>,
}

/// Records kept in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub const VERSION: u32 = 1;
    pub const FILE_NAME: &'static str = "game_records.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default file name inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<GameRecord>, StoreError> {
        let Some(file) = read_json::<RecordFile>(&self.path)? else {
            return Ok(Vec::new());
        };
        if file.version > Self::VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: file.version,
                supported: Self::VERSION,
            });
        }
        Ok(file.records)
    }

    /// Where an unreadable records file is moved before starting over
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    /// Move the unreadable file aside so new records can still be written
    fn set_aside(&self) -> Result<(), StoreError> {
        let backup = self.corrupt_path();
        fs::rename(&self.path, &backup).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::warn!("Moved unreadable records to {}", backup.display());
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn load_all_records(&self) -> Result<Vec<GameRecord>, StoreError> {
        let mut records = self.read()?;
        sort_newest_first(&mut records);
        log::debug!("Loaded {} game records", records.len());
        Ok(records)
    }

    fn insert_record(&mut self, record: GameRecord) -> Result<(), StoreError> {
        let mut records = match self.read() {
            Ok(records) => records,
            Err(e @ StoreError::Json { .. }) => {
                log::warn!("Starting a fresh record file: {}", e);
                self.set_aside()?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        upsert(&mut records, record);
        write_json(
            &self.path,
            &RecordFile {
                version: Self::VERSION,
                records,
            },
        )?;
        log::info!("Game record saved (score {})", record.score);
        Ok(())
    }
}

fn upsert(records: &mut Vec<GameRecord>, record: GameRecord) {
    match records.iter_mut().find(|r| r.timestamp == record.timestamp) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

fn sort_newest_first(records: &mut [GameRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_newest_first() {
        let mut store = MemoryRecordStore::new();
        store.insert_record(GameRecord::new(80, 1_000)).unwrap();
        store.insert_record(GameRecord::new(95, 3_000)).unwrap();
        store.insert_record(GameRecord::new(10, 2_000)).unwrap();

        let scores: Vec<u32> = store
            .load_all_records()
            .unwrap()
            .iter()
            .map(|r| r.score)
            .collect();
        assert_eq!(scores, vec![95, 10, 80]);
    }

    #[test]
    fn test_same_timestamp_replaces() {
        let mut store = MemoryRecordStore::new();
        store.insert_record(GameRecord::new(80, 1_000)).unwrap();
        store.insert_record(GameRecord::new(90, 1_000)).unwrap();
        assert_eq!(store.load_all_records().unwrap(), vec![GameRecord::new(90, 1_000)]);
    }

    #[test]
    fn test_json_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRecordStore::in_dir(dir.path());
        assert!(store.load_all_records().unwrap().is_empty());

        store.insert_record(GameRecord::new(512, 1_700_000_000_000)).unwrap();
        store.insert_record(GameRecord::new(730, 1_700_000_100_000)).unwrap();

        let reopened = JsonRecordStore::in_dir(dir.path());
        let records = reopened.load_all_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 730);
    }

    #[test]
    fn test_corrupt_file_set_aside_on_insert() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonRecordStore::in_dir(dir.path());
        std::fs::write(store.path(), "{ truncated").unwrap();
        assert!(matches!(store.load_all_records(), Err(StoreError::Json { .. })));

        store.insert_record(GameRecord::new(420, 5_000)).unwrap();
        store.insert_record(GameRecord::new(610, 6_000)).unwrap();

        let records = store.load_all_records().unwrap();
        assert_eq!(records, vec![GameRecord::new(610, 6_000), GameRecord::new(420, 5_000)]);
        let kept = std::fs::read_to_string(store.corrupt_path()).unwrap();
        assert_eq!(kept, "{ truncated");
    }

    #[test]
    fn test_json_store_rejects_newer_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::in_dir(dir.path());
        std::fs::write(store.path(), r#"{"version": 99, "records": []}"#).unwrap();
        assert!(matches!(
            store.load_all_records(),
            Err(StoreError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
