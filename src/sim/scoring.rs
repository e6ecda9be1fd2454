//! Round scoring and feedback tiers

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ROUND_SCORE;
use crate::{Point, distance};

/// Feedback bucket derived from a round score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultTier {
    /// Dead on (100)
    Outstanding,
    /// 85..=99
    High,
    /// 70..=84
    Medium,
    /// 50..=69
    Low,
    /// Below 50
    VeryLow,
}

impl ResultTier {
    /// Thresholds are checked from the top down, so 85 is `High`
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= MAX_ROUND_SCORE => ResultTier::Outstanding,
            s if s >= 85 => ResultTier::High,
            s if s >= 70 => ResultTier::Medium,
            s if s >= 50 => ResultTier::Low,
            _ => ResultTier::VeryLow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultTier::Outstanding => "Outstanding",
            ResultTier::High => "High",
            ResultTier::Medium => "Medium",
            ResultTier::Low => "Low",
            ResultTier::VeryLow => "Very low",
        }
    }

    /// Feedback lines shown under the round result
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            ResultTier::Outstanding => &["Perfect!", "Flawless!", "Bullseye!", "Spot on!"],
            ResultTier::High => &["So close!", "Great eye!", "Impressive!", "Nearly there!"],
            ResultTier::Medium => &["Not bad!", "Good try!", "Decent!", "In the area!"],
            ResultTier::Low => &["Could be better", "Getting warmer", "Keep trying", "Half way"],
            ResultTier::VeryLow => &["Way off!", "Not even close", "Oops!", "Wrong neighborhood"],
        }
    }

    /// Draw one feedback line
    pub fn pick_phrase<R: Rng>(&self, rng: &mut R) -> &'static str {
        let phrases = self.phrases();
        phrases[rng.random_range(0..phrases.len())]
    }
}

/// Score a guess on a `width` x `height` field.
///
/// 100 minus the guess error as a percentage of the field diagonal, rounded to
/// nearest and clamped to [0, 100].
pub fn score_guess(guess: Point, target: Point, width: u32, height: u32) -> u32 {
    let max_distance = (width.max(1) as f64).hypot(height.max(1) as f64);
    let normalized = distance(guess, target) / max_distance;
    let penalty = (normalized * MAX_ROUND_SCORE as f64).round();
    (MAX_ROUND_SCORE as f64 - penalty).clamp(0.0, MAX_ROUND_SCORE as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_exact_guess_scores_full() {
        let p = Vec2::new(360.0, 360.0);
        assert_eq!(score_guess(p, p, 720, 720), 100);
    }

    #[test]
    fn test_center_to_corner_scores_half() {
        let score = score_guess(Vec2::ZERO, Vec2::new(360.0, 360.0), 720, 720);
        assert_eq!(score, 50);
        assert_eq!(ResultTier::from_score(score), ResultTier::Low);
    }

    #[test]
    fn test_opposite_corner_scores_zero() {
        let score = score_guess(Vec2::new(720.0, 720.0), Vec2::ZERO, 720, 720);
        assert_eq!(score, 0);
        assert_eq!(ResultTier::from_score(score), ResultTier::VeryLow);
    }

    #[test]
    fn test_score_clamped_outside_field() {
        assert_eq!(score_guess(Vec2::new(5000.0, 5000.0), Vec2::ZERO, 100, 100), 0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ResultTier::from_score(100), ResultTier::Outstanding);
        assert_eq!(ResultTier::from_score(99), ResultTier::High);
        assert_eq!(ResultTier::from_score(85), ResultTier::High);
        assert_eq!(ResultTier::from_score(84), ResultTier::Medium);
        assert_eq!(ResultTier::from_score(70), ResultTier::Medium);
        assert_eq!(ResultTier::from_score(69), ResultTier::Low);
        assert_eq!(ResultTier::from_score(50), ResultTier::Low);
        assert_eq!(ResultTier::from_score(49), ResultTier::VeryLow);
        assert_eq!(ResultTier::from_score(0), ResultTier::VeryLow);
    }

    #[test]
    fn test_pick_phrase_comes_from_tier() {
        let mut rng = Pcg32::seed_from_u64(1);
        for tier in [
            ResultTier::Outstanding,
            ResultTier::High,
            ResultTier::Medium,
            ResultTier::Low,
            ResultTier::VeryLow,
        ] {
            let phrase = tier.pick_phrase(&mut rng);
            assert!(tier.phrases().contains(&phrase));
        }
    }

    proptest! {
        #[test]
        fn prop_farther_never_scores_higher(
            w in 1u32..3000,
            h in 1u32..3000,
            tx in 0.0f32..1.0,
            ty in 0.0f32..1.0,
            dx in -1.0f32..1.0,
            dy in -1.0f32..1.0,
            k in 1.5f32..4.0,
        ) {
            let target = Vec2::new(tx * w as f32, ty * h as f32);
            let offset = Vec2::new(dx * w as f32, dy * h as f32);
            let near = score_guess(target + offset, target, w, h);
            let far = score_guess(target + offset * k, target, w, h);
            prop_assert!(far <= near);
            prop_assert!(near <= 100);
        }
    }
}
