//! Deterministic gameplay module
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only, passed in explicitly
//! - Input events and timeouts in, new state out
//! - No rendering, storage or platform dependencies

pub mod field;
pub mod round;
pub mod scoring;
pub mod state;
pub mod tick;

pub use field::{ColorField, random_point};
pub use round::{Round, RoundPhase, RoundResult};
pub use scoring::{ResultTier, score_guess};
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{PhaseTimers, TickInput, TimerKind, tick};
