//! RGBA color used for skeleton, slot and attachment tints.

use std::ops::Mul;

/// Linear RGBA color with channels nominally in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a packed `0xRRGGBBAA` value.
    pub const fn from_rgba8888(hex: u32) -> Self {
        Self {
            r: ((hex >> 24) & 0xFF) as f32 / 255.0,
            g: ((hex >> 16) & 0xFF) as f32 / 255.0,
            b: ((hex >> 8) & 0xFF) as f32 / 255.0,
            a: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Overwrite all four channels in place.
    pub fn set(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.r = r;
        self.g = g;
        self.b = b;
        self.a = a;
    }

    pub fn set_from(&mut self, other: &Color) {
        self.set(other.r, other.g, other.b, other.a);
    }

    /// RGB scaled by alpha; alpha is left untouched.
    pub fn premultiplied(self) -> Self {
        Self {
            r: self.r * self.a,
            g: self.g * self.a,
            b: self.b * self.a,
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Componentwise product of all four channels.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_is_componentwise() {
        let c = Color::rgba(0.5, 1.0, 0.25, 0.5) * Color::rgba(0.5, 0.5, 1.0, 0.5);
        assert_eq!(c, Color::rgba(0.25, 0.5, 0.25, 0.25));
    }

    #[test]
    fn test_premultiplied_keeps_alpha() {
        let c = Color::rgba(1.0, 0.5, 1.0, 0.5).premultiplied();
        assert_eq!(c, Color::rgba(0.5, 0.25, 0.5, 0.5));
    }

    #[test]
    fn test_from_rgba8888() {
        let c = Color::from_rgba8888(0xFF00_00FF);
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_set() {
        let mut c = Color::default();
        c.set(0.0, 0.0, 0.0, 1.0);
        assert_eq!(c, Color::BLACK);
        c.set_from(&Color::WHITE);
        assert_eq!(c, Color::WHITE);
    }
}
