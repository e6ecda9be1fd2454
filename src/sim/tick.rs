//! Fixed-step driver
//!
//! Applies player input to a session and runs the one-shot phase timers
//! (memorize countdown, result display). Timers are keyed by game, round and
//! phase; when the session leaves the phase a timer was armed for, or a new
//! game starts, the timer is dropped. A timer that does fire into the wrong
//! phase is absorbed by the session's guards anyway.

use std::time::Duration;

use super::state::{GamePhase, GameSession};
use crate::Point;
use crate::settings::GameConfig;

/// Input for a single step, already resolved from gestures
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position on the field (drag or tap)
    pub pointer: Option<Point>,
    /// Confirm the current guess
    pub confirm: bool,
    /// "Next round" / "Finish"
    pub advance: bool,
    /// "Play again"
    pub restart: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Memorize,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OneShot {
    kind: TimerKind,
    generation: u32,
    round_index: u32,
    elapsed: Duration,
    limit: Duration,
}

impl OneShot {
    fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }
}

/// Phase timers for one session
#[derive(Debug, Clone)]
pub struct PhaseTimers {
    reveal_delay: Duration,
    countdown_interval: Duration,
    countdown_ticks: u32,
    result_display: Duration,
    pending: Option<OneShot>,
}

impl PhaseTimers {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            reveal_delay: config.reveal_delay(),
            countdown_interval: config.countdown_interval(),
            countdown_ticks: config.countdown_ticks,
            result_display: config.result_display(),
            pending: None,
        }
    }

    /// Arm the timer the session's phase calls for, dropping any stale one
    pub fn sync(&mut self, session: &GameSession) {
        let wanted = match session.phase() {
            GamePhase::Memorize => Some(TimerKind::Memorize),
            GamePhase::Result => Some(TimerKind::Result),
            _ => None,
        };
        let generation = session.generation();
        let round_index = session.round_index();

        if let Some(timer) = self.pending {
            if Some(timer.kind) == wanted
                && timer.generation == generation
                && timer.round_index == round_index
            {
                return;
            }
            log::debug!("Cancelled {:?} timer for round {}", timer.kind, timer.round_index);
            self.pending = None;
        }

        self.pending = wanted.map(|kind| OneShot {
            kind,
            generation,
            round_index,
            elapsed: Duration::ZERO,
            limit: match kind {
                TimerKind::Memorize => {
                    self.reveal_delay + self.countdown_interval * self.countdown_ticks
                }
                TimerKind::Result => self.result_display,
            },
        });
    }

    /// Advance the armed timer; returns it if it fired this step
    pub fn advance(&mut self, dt: Duration) -> Option<TimerKind> {
        let timer = self.pending.as_mut()?;
        timer.elapsed = timer.elapsed.saturating_add(dt);
        if timer.elapsed < timer.limit {
            return None;
        }
        let kind = timer.kind;
        self.pending = None;
        Some(kind)
    }

    /// Which timer is armed, if any
    pub fn armed(&self) -> Option<TimerKind> {
        self.pending.map(|t| t.kind)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|t| t.remaining())
    }

    /// Countdown number to display while memorizing (3, 2, 1). `None` during the
    /// color reveal and outside the memorize phase.
    pub fn countdown(&self) -> Option<u32> {
        let timer = self.pending.filter(|t| t.kind == TimerKind::Memorize)?;
        let counting = timer.elapsed.checked_sub(self.reveal_delay)?;
        if self.countdown_interval.is_zero() {
            return None;
        }
        let ticks_done = (counting.as_millis() / self.countdown_interval.as_millis()) as u32;
        self.countdown_ticks.checked_sub(ticks_done).filter(|n| *n > 0)
    }
}

/// Advance the session by one step: input first, then timers
pub fn tick(session: &mut GameSession, timers: &mut PhaseTimers, input: &TickInput, dt: Duration) {
    if input.restart && session.phase() == GamePhase::Finished {
        session.restart();
    }

    if let Some(p) = input.pointer {
        session.on_pointer_moved(p.x, p.y);
    }
    if input.confirm {
        session.on_confirm();
    }
    if input.advance {
        session.on_advance();
    }

    timers.sync(session);

    match timers.advance(dt) {
        Some(TimerKind::Memorize) => {
            session.on_memorize_timeout();
        }
        Some(TimerKind::Result) => {
            session.on_result_timeout();
        }
        None => {}
    }

    // Arm whatever the fired timer led into
    timers.sync(session);
}
