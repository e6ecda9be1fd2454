//! Gradient color field
//!
//! The field is a pure function of (width, height, target color). Horizontally it
//! runs from white to the fully saturated target color; a black gradient going from
//! transparent (top) to opaque (bottom) is composited over it. No bitmap is stored,
//! renderers sample `color_at` themselves.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::color::{Color, lerp_channels, over_channels};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorField {
    width: u32,
    height: u32,
    /// Color the field was generated for
    target: Color,
    /// Right-hand edge of the horizontal gradient
    saturated: Color,
}

impl ColorField {
    /// Build the field for a target color. Dimensions below 1 are raised to 1.
    pub fn generate(width: u32, height: u32, target: Color) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            target,
            saturated: target.max_saturation(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn target(&self) -> Color {
        self.target
    }

    /// The fully saturated color at the top-right corner
    pub fn saturated(&self) -> Color {
        self.saturated
    }

    /// Field diagonal, the largest possible distance between two field points
    pub fn diagonal(&self) -> f64 {
        crate::distance(Vec2::ZERO, Vec2::new(self.width as f32, self.height as f32))
    }

    /// Whether a probe lands on the field (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.is_finite()
            && point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width as f32
            && point.y <= self.height as f32
    }

    /// Color at a field position. Positions outside the field are clamped to the edge.
    pub fn color_at(&self, point: Point) -> Color {
        let u = normalized(point.x, self.width);
        let v = normalized(point.y, self.height);

        let horizontal = lerp_channels(Color::WHITE.channels(), self.saturated.channels(), u);
        let [r, g, b] = over_channels(Color::BLACK.channels(), horizontal, v);
        Color::from_channels(r, g, b)
    }

    /// Uniform random integer position in [0, width) x [0, height)
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Point {
        random_point(rng, self.width, self.height)
    }
}

/// Uniform random integer position in [0, width) x [0, height)
pub fn random_point<R: Rng>(rng: &mut R, width: u32, height: u32) -> Point {
    let x = rng.random_range(0..width.max(1));
    let y = rng.random_range(0..height.max(1));
    Vec2::new(x as f32, y as f32)
}

#[inline]
fn normalized(coord: f32, extent: u32) -> f32 {
    if !coord.is_finite() {
        return 0.0;
    }
    (coord / extent as f32).clamp(0.0, 1.0)
}
