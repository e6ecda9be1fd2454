//! Game configuration and user preferences
//!
//! Both are small JSON documents. Missing or unreadable files fall back to
//! defaults; every field has a serde default so older files keep loading.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{StoreError, read_json, write_json};

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds per game
    pub total_rounds: u32,
    /// Field size used for new rounds
    pub field_width: u32,
    pub field_height: u32,

    // === Timing ===
    /// Color reveal animation before the countdown (ms)
    pub reveal_delay_ms: u64,
    /// Countdown ticks while memorizing
    pub countdown_ticks: u32,
    /// Time per countdown tick (ms)
    pub countdown_interval_ms: u64,
    /// Round result display (ms)
    pub result_display_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,

            reveal_delay_ms: REVEAL_DELAY.as_millis() as u64,
            countdown_ticks: COUNTDOWN_TICKS,
            countdown_interval_ms: COUNTDOWN_INTERVAL.as_millis() as u64,
            result_display_ms: RESULT_DISPLAY.as_millis() as u64,
        }
    }
}

impl GameConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    /// Whole memorize phase: reveal animation plus every countdown tick
    pub fn memorize_duration(&self) -> Duration {
        self.reveal_delay() + self.countdown_interval() * self.countdown_ticks
    }

    pub fn result_display(&self) -> Duration {
        Duration::from_millis(self.result_display_ms)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match read_json::<GameConfig>(path) {
            Ok(Some(config)) => {
                log::info!("Loaded game config from {}", path.display());
                config
            }
            Ok(None) => {
                log::info!("No game config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Unreadable game config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)?;
        log::info!("Game config saved");
        Ok(())
    }
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Click sounds on/off (off until the player opts in)
    pub sound_enabled: bool,
}
