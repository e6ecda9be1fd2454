//! Pastel - remember a color, then find it again on a gradient field
//!
//! Core modules:
//! - `color`: RGB/HSL color math (pure)
//! - `sim`: Deterministic gameplay (field, rounds, session, timers)
//! - `stats`: Aggregates finished games into a stats snapshot
//! - `persistence`: Record and preference stores
//! - `settings`: Gameplay configuration and user preferences

pub mod color;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod stats;

pub use color::{Color, Hsl};
pub use settings::{GameConfig, Preferences};
pub use stats::{GameRecord, StatsSnapshot};

use glam::Vec2;

/// A position on the color field, in field pixels
pub type Point = Vec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Rounds per game
    pub const DEFAULT_TOTAL_ROUNDS: u32 = 10;

    /// Default field size (square phone-width layout)
    pub const DEFAULT_FIELD_WIDTH: u32 = 720;
    pub const DEFAULT_FIELD_HEIGHT: u32 = 720;

    /// Color reveal animation before the countdown starts
    pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);
    /// Countdown ticks shown while memorizing
    pub const COUNTDOWN_TICKS: u32 = 3;
    pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

    /// How long the round result stays on screen
    pub const RESULT_DISPLAY: Duration = Duration::from_secs(2);

    /// Highest score a single round can award
    pub const MAX_ROUND_SCORE: u32 = 100;
}

/// Euclidean distance between two field points
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt()
}
