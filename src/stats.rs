//! Stats ledger
//!
//! Turns the stored game records into the stats screen: best score, games
//! played and a newest-first history. Recomputed on every read.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::RecordStore;

/// One finished game as persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Total score over all rounds
    pub score: u32,
    /// Unix timestamp (ms) when the game finished
    pub timestamp: i64,
}

impl GameRecord {
    pub fn new(score: u32, timestamp: i64) -> Self {
        Self { score, timestamp }
    }

    /// Record stamped with the current time
    pub fn now(score: u32) -> Self {
        Self::new(score, Utc::now().timestamp_millis())
    }
}

/// A row in the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// `dd/mm/yyyy`
    pub date: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub highest_score: u32,
    pub games_played: usize,
    /// Newest first
    pub history: Vec<HistoryEntry>,
}

pub fn compute_snapshot(records: &[GameRecord]) -> StatsSnapshot {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    StatsSnapshot {
        highest_score: records.iter().map(|r| r.score).max().unwrap_or(0),
        games_played: records.len(),
        history: sorted
            .iter()
            .map(|r| HistoryEntry {
                date: format_date(r.timestamp),
                score: r.score,
            })
            .collect(),
    }
}

/// Read every record and summarize. A failed load reads as no games played.
pub fn load_snapshot<S: RecordStore + ?Sized>(store: &S) -> StatsSnapshot {
    match store.load_all_records() {
        Ok(records) => compute_snapshot(&records),
        Err(e) => {
            log::warn!("Could not load game records: {}", e);
            StatsSnapshot::default()
        }
    }
}

/// Persist a finished game. Failures are logged and otherwise ignored.
pub fn record_finished_game<S: RecordStore + ?Sized>(store: &mut S, record: GameRecord) {
    if let Err(e) = store.insert_record(record) {
        log::warn!("Dropped game record (score {}): {}", record.score, e);
    }
}

/// Format a millisecond timestamp as `dd/mm/yyyy` in the host's local calendar
pub fn format_date(timestamp: i64) -> String {
    format_date_in(timestamp, &Local)
}

/// Format a millisecond timestamp as `dd/mm/yyyy` in `tz`
pub fn format_date_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|dt| dt.with_timezone(tz).format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "--/--/----".to_string())
}
