//! Observable preference store

use std::path::PathBuf;

use super::{StoreError, read_json, write_json};
use crate::settings::Preferences;

/// Listener called with the new sound setting
pub type SoundListener = Box<dyn FnMut(bool) + Send>;

pub trait PreferenceStore {
    fn sound_enabled(&self) -> bool;

    fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), StoreError>;

    /// Register a listener. It is called right away with the current value,
    /// then on every change.
    fn subscribe(&mut self, listener: SoundListener);

    /// Flip the sound setting, returning the new value
    fn toggle_sound(&mut self) -> Result<bool, StoreError> {
        let enabled = !self.sound_enabled();
        self.set_sound_enabled(enabled)?;
        Ok(enabled)
    }
}

/// Preferences backed by a JSON file (in memory when no path is given)
pub struct PreferenceFile {
    path: Option<PathBuf>,
    prefs: Preferences,
    listeners: Vec<SoundListener>,
}

impl PreferenceFile {
    pub const FILE_NAME: &'static str = "preferences.json";

    /// Open the file, falling back to defaults if it is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = match read_json::<Preferences>(&path) {
            Ok(Some(prefs)) => {
                log::info!("Loaded preferences");
                prefs
            }
            Ok(None) => Preferences::default(),
            Err(e) => {
                log::warn!("Using default preferences: {}", e);
                Preferences::default()
            }
        };
        Self {
            path: Some(path),
            prefs,
            listeners: Vec::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            prefs: Preferences::default(),
            listeners: Vec::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }
}

impl PreferenceStore for PreferenceFile {
    fn sound_enabled(&self) -> bool {
        self.prefs.sound_enabled
    }

    fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        if self.prefs.sound_enabled == enabled {
            return Ok(());
        }
        let updated = Preferences {
            sound_enabled: enabled,
        };
        if let Some(path) = &self.path {
            write_json(path, &updated)?;
        }
        self.prefs = updated;
        log::info!("Sound {}", if enabled { "on" } else { "off" });

        for listener in &mut self.listeners {
            listener(enabled);
        }
        Ok(())
    }

    fn subscribe(&mut self, mut listener: SoundListener) {
        listener(self.prefs.sound_enabled);
        self.listeners.push(listener);
    }
}
