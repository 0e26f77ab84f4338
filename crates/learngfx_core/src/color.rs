//! RGBA colors used for slide backgrounds and palettes

use rand::Rng;
use serde::{Serialize, Deserialize};

/// Linear RGBA color with components in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(236.0 / 255.0, 0.0, 140.0 / 255.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Random opaque color
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }

    /// Linear interpolation of the RGB channels; alpha is taken from `a`
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
            a.a,
        )
    }

    /// The `i`-th of `total` evenly spaced colors from `c1` to `c2`
    ///
    /// `step(c1, c2, n, 0) == c1` and `step(c1, c2, n, n - 1) == c2`.
    pub fn step(c1: Self, c2: Self, total: usize, i: usize) -> Self {
        if total <= 1 {
            return c1;
        }
        let factor = i as f32 / (total - 1) as f32;
        Self::lerp(c1, c2, factor)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb` string, channels clamped and rounded
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Relative brightness, used to pick a readable text color
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

fn channel_to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 0.0001
            && (a.g - b.g).abs() < 0.0001
            && (a.b - b.b).abs() < 0.0001
            && (a.a - b.a).abs() < 0.0001
    }

    #[test]
    fn test_step_endpoints() {
        let c = Color::step(Color::MAGENTA, Color::BLACK, 5, 0);
        assert!(approx_eq(c, Color::MAGENTA));
        let c = Color::step(Color::MAGENTA, Color::BLACK, 5, 4);
        assert!(approx_eq(c, Color::BLACK));
    }

    #[test]
    fn test_step_midpoint() {
        let c = Color::step(Color::BLACK, Color::WHITE, 3, 1);
        assert!(approx_eq(c, Color::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_step_single_color() {
        assert_eq!(Color::step(Color::WHITE, Color::BLACK, 1, 0), Color::WHITE);
        assert_eq!(Color::step(Color::WHITE, Color::BLACK, 0, 0), Color::WHITE);
    }

    #[test]
    fn test_lerp_keeps_first_alpha() {
        let c = Color::lerp(Color::BLACK.with_alpha(0.5), Color::WHITE, 1.0);
        assert_eq!(c.a, 0.5);
        assert_eq!(c.r, 1.0);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::BLACK.to_hex(), "#000000");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        assert_eq!(Color::MAGENTA.to_hex(), "#ec008c");
        assert_eq!(Color::rgb(2.0, -1.0, 0.5).to_hex(), "#ff0080");
    }

    #[test]
    fn test_random_is_opaque_and_in_range() {
        for _ in 0..32 {
            let c = Color::random();
            assert_eq!(c.a, 1.0);
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..1.0).contains(&ch));
            }
        }
    }
}
