//! Color math
//!
//! 8-bit RGB colors, HSL conversion and the blending used by the color field.
//! Everything here is pure so it can be tested without any renderer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue (degrees, [0, 360)), saturation and lightness ([0, 1])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from float channels in [0, 255], rounding to nearest
    pub fn from_channels(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
        }
    }

    /// Channels as floats in [0, 255]
    pub fn channels(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    ///
    /// Achromatic colors (all channels equal) have no hue; they report
    /// hue 0 and saturation 0 instead of dividing by zero.
    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        } * 60.0;

        Hsl {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l,
        }
    }

    /// Same hue and lightness, saturation forced to 1
    pub fn max_saturation(self) -> Color {
        let hsl = self.to_hsl();
        Hsl { s: 1.0, ..hsl }.to_color()
    }

    /// Linear interpolation per channel, `t` clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let [r, g, b] = lerp_channels(self.channels(), other.channels(), t);
        Color::from_channels(r, g, b)
    }

    /// Composite `self` with the given alpha over an opaque background
    pub fn over(self, background: Color, alpha: f32) -> Color {
        let [r, g, b] = over_channels(self.channels(), background.channels(), alpha);
        Color::from_channels(r, g, b)
    }
}

impl Hsl {
    pub fn to_color(self) -> Color {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (chroma, x, 0.0),
            h if h < 120.0 => (x, chroma, 0.0),
            h if h < 180.0 => (0.0, chroma, x),
            h if h < 240.0 => (0.0, x, chroma),
            h if h < 300.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Color::from_channels((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0)
    }
}

/// Uniform random color, channels independent in [0, 255]
pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::new(rng.random(), rng.random(), rng.random())
}

#[inline]
pub(crate) fn lerp_channels(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Standard alpha-over for an opaque destination
#[inline]
pub(crate) fn over_channels(src: [f32; 3], dst: [f32; 3], alpha: f32) -> [f32; 3] {
    let a = alpha.clamp(0.0, 1.0);
    [
        src[0] * a + dst[0] * (1.0 - a),
        src[1] * a + dst[1] * (1.0 - a),
        src[2] * a + dst[2] * (1.0 - a),
    ]
}

#[inline]
fn quantize(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
