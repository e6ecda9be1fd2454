//! A single round: memorize, guess, result
//!
//! Every handler is guarded by the round phase. Calls that arrive in the wrong
//! phase (late timers, stray taps) change nothing and return `false`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::ColorField;
use super::scoring::{ResultTier, score_guess};
use crate::Point;
use crate::color::{Color, random_color};

/// Lifecycle of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Color on screen, countdown running
    Memorize,
    /// Player is probing the field
    Guess,
    /// Score on screen
    Result,
    /// Finished, waiting for the session to move on
    Done,
}

/// The scored outcome of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub score: u32,
    pub tier: ResultTier,
    /// Feedback line shown with the score
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    phase: RoundPhase,
    field: ColorField,
    target_color: Color,
    target_point: Point,
    /// What the player is shown while memorizing
    swatch: Color,
    guess_point: Option<Point>,
    guess_color: Option<Color>,
    result: Option<RoundResult>,
}

impl Round {
    /// Pick a target color, build its field and pick the target position
    pub fn start<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        let target_color = random_color(rng);
        let field = ColorField::generate(width, height, target_color);
        let target_point = field.random_point(rng);
        Self::with_target(field, target_point)
    }

    /// Start a round on an existing field with a fixed target position
    pub fn with_target(field: ColorField, target_point: Point) -> Self {
        log::debug!(
            "Round target {} at ({}, {}) on {}x{}",
            field.target().to_hex(),
            target_point.x,
            target_point.y,
            field.width(),
            field.height()
        );
        Self {
            phase: RoundPhase::Memorize,
            field,
            target_color: field.target(),
            target_point,
            swatch: field.color_at(target_point),
            guess_point: None,
            guess_color: None,
            result: None,
        }
    }

    /// Countdown finished: MEMORIZE -> GUESS
    pub fn on_memorize_timeout(&mut self) -> bool {
        if self.phase != RoundPhase::Memorize {
            return false;
        }
        self.phase = RoundPhase::Guess;
        true
    }

    /// Record a probe. Off-field probes are dropped and the previous guess kept.
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) -> bool {
        if self.phase != RoundPhase::Guess {
            return false;
        }
        let point = Point::new(x, y);
        if !self.field.contains(point) {
            return false;
        }
        self.guess_point = Some(point);
        self.guess_color = Some(self.field.color_at(point));
        true
    }

    /// Lock in the current guess: GUESS -> RESULT. Needs at least one guess.
    pub fn on_confirm<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.phase != RoundPhase::Guess {
            return false;
        }
        let Some(guess) = self.guess_point else {
            return false;
        };

        let score = score_guess(guess, self.target_point, self.field.width(), self.field.height());
        let tier = ResultTier::from_score(score);
        self.result = Some(RoundResult {
            score,
            tier,
            phrase: tier.pick_phrase(rng).to_string(),
        });
        self.phase = RoundPhase::Result;
        true
    }

    /// Result display finished: RESULT -> DONE
    pub fn on_result_timeout(&mut self) -> bool {
        if self.phase != RoundPhase::Result {
            return false;
        }
        self.phase = RoundPhase::Done;
        true
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn field(&self) -> &ColorField {
        &self.field
    }

    /// Color the field was generated from
    pub fn target_color(&self) -> Color {
        self.target_color
    }

    pub fn target_point(&self) -> Point {
        self.target_point
    }

    /// Field color at the target position
    pub fn swatch(&self) -> Color {
        self.swatch
    }

    pub fn guess_point(&self) -> Option<Point> {
        self.guess_point
    }

    pub fn guess_color(&self) -> Option<Color> {
        self.guess_color
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    pub fn score(&self) -> Option<u32> {
        self.result.as_ref().map(|r| r.score)
    }

    pub fn tier(&self) -> Option<ResultTier> {
        self.result.as_ref().map(|r| r.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fixed_round() -> Round {
        let field = ColorField::generate(720, 720, Color::new(200, 40, 90));
        Round::with_target(field, Vec2::new(360.0, 360.0))
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_start_picks_target_inside_field() {
        let mut rng = rng();
        for _ in 0..50 {
            let round = Round::start(300, 120, &mut rng);
            assert_eq!(round.phase(), RoundPhase::Memorize);
            let p = round.target_point();
            assert!(p.x < 300.0 && p.y < 120.0);
            assert_eq!(round.field().target(), round.target_color());
            assert_eq!(round.swatch(), round.field().color_at(p));
        }
    }

    #[test]
    fn test_start_is_seeded() {
        let a = Round::start(720, 720, &mut rng());
        let b = Round::start(720, 720, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_memorize_timeout_only_once() {
        let mut round = fixed_round();
        assert!(round.on_memorize_timeout());
        assert_eq!(round.phase(), RoundPhase::Guess);
        assert!(!round.on_memorize_timeout());
        assert_eq!(round.phase(), RoundPhase::Guess);
    }

    #[test]
    fn test_guess_ignored_while_memorizing() {
        let mut round = fixed_round();
        assert!(!round.on_pointer_moved(10.0, 10.0));
        assert!(round.guess_point().is_none());
        assert!(!round.on_confirm(&mut rng()));
        assert_eq!(round.phase(), RoundPhase::Memorize);
    }

    #[test]
    fn test_out_of_bounds_guess_keeps_previous() {
        let mut round = fixed_round();
        round.on_memorize_timeout();
        assert!(round.on_pointer_moved(100.0, 200.0));
        assert!(!round.on_pointer_moved(-1.0, 200.0));
        assert!(!round.on_pointer_moved(100.0, 721.0));
        assert_eq!(round.guess_point(), Some(Vec2::new(100.0, 200.0)));
        assert_eq!(
            round.guess_color(),
            Some(round.field().color_at(Vec2::new(100.0, 200.0)))
        );
    }

    #[test]
    fn test_confirm_without_guess_is_noop() {
        let mut round = fixed_round();
        round.on_memorize_timeout();
        assert!(!round.on_confirm(&mut rng()));
        assert_eq!(round.phase(), RoundPhase::Guess);
        assert!(round.score().is_none());
    }

    #[test]
    fn test_exact_guess_is_outstanding() {
        let mut round = fixed_round();
        round.on_memorize_timeout();
        round.on_pointer_moved(360.0, 360.0);
        assert!(round.on_confirm(&mut rng()));
        assert_eq!(round.phase(), RoundPhase::Result);
        assert_eq!(round.score(), Some(100));
        assert_eq!(round.tier(), Some(ResultTier::Outstanding));
        let phrase = &round.result().unwrap().phrase;
        assert!(ResultTier::Outstanding.phrases().contains(&phrase.as_str()));
    }

    #[test]
    fn test_corner_guess_is_low() {
        let mut round = fixed_round();
        round.on_memorize_timeout();
        round.on_pointer_moved(0.0, 0.0);
        round.on_confirm(&mut rng());
        assert_eq!(round.score(), Some(50));
        assert_eq!(round.tier(), Some(ResultTier::Low));
    }

    #[test]
    fn test_opposite_corner_is_very_low() {
        let field = ColorField::generate(720, 720, Color::new(1, 2, 3));
        let mut round = Round::with_target(field, Vec2::ZERO);
        round.on_memorize_timeout();
        round.on_pointer_moved(720.0, 720.0);
        round.on_confirm(&mut rng());
        assert_eq!(round.score(), Some(0));
        assert_eq!(round.tier(), Some(ResultTier::VeryLow));
    }

    #[test]
    fn test_result_is_frozen() {
        let mut round = fixed_round();
        round.on_memorize_timeout();
        round.on_pointer_moved(360.0, 360.0);
        round.on_confirm(&mut rng());

        // Late probes and confirms cannot change the score
        assert!(!round.on_pointer_moved(0.0, 0.0));
        assert!(!round.on_confirm(&mut rng()));
        assert_eq!(round.guess_point(), Some(Vec2::new(360.0, 360.0)));
        assert_eq!(round.score(), Some(100));

        assert!(round.on_result_timeout());
        assert_eq!(round.phase(), RoundPhase::Done);
        assert!(!round.on_result_timeout());
        assert!(!round.on_memorize_timeout());
        assert_eq!(round.phase(), RoundPhase::Done);
    }

    #[test]
    fn test_result_timeout_outside_result_is_noop() {
        let mut round = fixed_round();
        assert!(!round.on_result_timeout());
        assert_eq!(round.phase(), RoundPhase::Memorize);
    }
}
