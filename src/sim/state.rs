//! Game session state
//!
//! Owns the rounds of one game, the running total and the session phase. The
//! session is driven purely by input events; timers live in `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::round::{Round, RoundPhase};
use super::scoring::ResultTier;
use crate::settings::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started
    Idle,
    /// Target color on screen
    Memorize,
    /// Player searching the field
    Guess,
    /// Round score on screen
    Result,
    /// Round over, waiting for "next round" / "finish"
    RoundDone,
    /// All rounds played
    Finished,
}

impl GamePhase {
    fn from_round(phase: RoundPhase) -> Self {
        match phase {
            RoundPhase::Memorize => GamePhase::Memorize,
            RoundPhase::Guess => GamePhase::Guess,
            RoundPhase::Result => GamePhase::Result,
            RoundPhase::Done => GamePhase::RoundDone,
        }
    }
}

/// Notifications queued for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    RoundScored {
        round: u32,
        score: u32,
        tier: ResultTier,
    },
    /// A fresh game was dealt (also on restart mid-round)
    GameStarted {
        generation: u32,
        total_rounds: u32,
    },
    /// Game over; the caller persists this as a game record
    GameFinished {
        total_score: u32,
    },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Seed the session was created with
    pub seed: u64,
    rng: Pcg32,
    config: GameConfig,
    /// Bumped on every start, so timers from an earlier game never match
    generation: u32,
    phase: GamePhase,
    /// 1-based index of the active round
    round_index: u32,
    total_rounds: u32,
    rounds: Vec<Round>,
    total_score: u32,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session. Call `start` to deal the first round.
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            total_rounds: config.total_rounds.max(1),
            config,
            generation: 0,
            phase: GamePhase::Idle,
            round_index: 0,
            rounds: Vec::new(),
            total_score: 0,
            events: Vec::new(),
        }
    }

    /// Reset and deal round 1
    pub fn start(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.total_rounds = self.config.total_rounds.max(1);
        self.rounds.clear();
        self.total_score = 0;
        self.round_index = 1;
        self.deal_round();
        log::info!(
            "Game started: {} rounds on a {}x{} field (seed {})",
            self.total_rounds,
            self.config.field_width,
            self.config.field_height,
            self.seed
        );
        self.events.push(GameEvent::GameStarted {
            generation: self.generation,
            total_rounds: self.total_rounds,
        });
        self.set_phase(GamePhase::Memorize);
    }

    /// Start a game of `total_rounds` rounds; later restarts keep that count
    pub fn start_with_rounds(&mut self, total_rounds: u32) {
        self.config.total_rounds = total_rounds.max(1);
        self.start();
    }

    /// Play again
    pub fn restart(&mut self) {
        self.start();
    }

    /// Layout changed; applies to rounds dealt from now on
    pub fn set_field_size(&mut self, width: u32, height: u32) {
        self.config.field_width = width.max(1);
        self.config.field_height = height.max(1);
    }

    pub fn on_memorize_timeout(&mut self) -> bool {
        self.with_active_round(|round, _| round.on_memorize_timeout())
    }

    pub fn on_pointer_moved(&mut self, x: f32, y: f32) -> bool {
        self.with_active_round(|round, _| round.on_pointer_moved(x, y))
    }

    pub fn on_confirm(&mut self) -> bool {
        let changed = self.with_active_round(|round, rng| round.on_confirm(rng));
        let scored = self
            .current_round()
            .and_then(Round::result)
            .map(|r| (r.score, r.tier));
        if let (true, Some((score, tier))) = (changed, scored) {
            log::info!(
                "Round {}/{} scored {} ({})",
                self.round_index,
                self.total_rounds,
                score,
                tier.as_str()
            );
            self.events.push(GameEvent::RoundScored {
                round: self.round_index,
                score,
                tier,
            });
        }
        changed
    }

    pub fn on_result_timeout(&mut self) -> bool {
        let changed = self.with_active_round(|round, _| round.on_result_timeout());
        if changed {
            let score = self.current_round().and_then(Round::score).unwrap_or(0);
            self.total_score += score;
        }
        changed
    }

    /// Next round, or finish after the last one. Only valid in `RoundDone`.
    pub fn on_advance(&mut self) -> bool {
        if self.phase != GamePhase::RoundDone {
            return false;
        }

        if self.round_index >= self.total_rounds {
            log::info!("Game finished with {} points", self.total_score);
            self.events.push(GameEvent::GameFinished {
                total_score: self.total_score,
            });
            self.set_phase(GamePhase::Finished);
        } else {
            self.round_index += 1;
            self.deal_round();
            self.set_phase(GamePhase::Memorize);
        }
        true
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Which game this is; changes on every `start`
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn is_last_round(&self) -> bool {
        self.round_index == self.total_rounds
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The round being played (or last played once finished)
    pub fn current_round(&self) -> Option<&Round> {
        let idx = self.round_index.checked_sub(1)? as usize;
        self.rounds.get(idx)
    }

    /// Sum of scores of completed rounds
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Total before the current round's score was added, for the count-up display
    pub fn previous_total_score(&self) -> u32 {
        match self.phase {
            GamePhase::RoundDone | GamePhase::Finished => {
                let current = self.current_round().and_then(Round::score).unwrap_or(0);
                self.total_score - current
            }
            _ => self.total_score,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn deal_round(&mut self) {
        let round = Round::start(self.config.field_width, self.config.field_height, &mut self.rng);
        self.rounds.push(round);
    }

    /// Run a round handler if the session is mid-round, then mirror its phase
    fn with_active_round<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Round, &mut Pcg32) -> bool,
    {
        if !matches!(
            self.phase,
            GamePhase::Memorize | GamePhase::Guess | GamePhase::Result
        ) {
            return false;
        }
        let Some(idx) = self.round_index.checked_sub(1) else {
            return false;
        };
        let Some(round) = self.rounds.get_mut(idx as usize) else {
            return false;
        };

        let changed = f(round, &mut self.rng);
        let mirrored = GamePhase::from_round(round.phase());
        if changed {
            self.set_phase(mirrored);
        }
        changed
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::debug!("Phase {:?} -> {:?} (round {})", from, to, self.round_index);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }
}
