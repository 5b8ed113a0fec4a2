//! Colors and color spaces.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul};

use super::approx::ApproxEq;
use super::{Lerp, clamp};

/// An RGB color with `f32` channels.
///
/// The constructors clamp each channel to the range 0.0..=1.0. The
/// arithmetic operators do not: colors are routinely divided by `w` and
/// interpolated across a triangle, which needs the full range of `f32`.
/// Use [`Color::clamped`] to bring a result of arithmetic back into range.
#[derive(Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Returns a new color with the given channels, each clamped to 0.0..=1.0.
#[inline]
pub fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::new(r, g, b)
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Returns a new color with the given channels, each clamped to 0.0..=1.0.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }.clamped()
    }

    /// Returns the color represented by the packed 24-bit value
    /// `0xRRGGBB`. Any bits above the lowest 24 are ignored.
    ///
    /// # Examples
    /// ```
    /// use softfb_core::math::color::{Color, rgb};
    ///
    /// assert_eq!(Color::from_u32(0xFF_00_33), rgb(1.0, 0.0, 0.2));
    /// ```
    pub fn from_u32(packed: u32) -> Self {
        let [_, r, g, b] = packed.to_be_bytes();
        let ch = |c: u8| c as f32 / 255.0;
        Self::new(ch(r), ch(g), ch(b))
    }

    /// Returns `self` packed into a 24-bit value `0xRRGGBB`.
    ///
    /// Each channel is clamped, then scaled by 255 and truncated.
    ///
    /// # Examples
    /// ```
    /// use softfb_core::math::color::rgb;
    ///
    /// assert_eq!(rgb(1.0, 0.5, 0.0).to_u32(), 0xFF_7F_00);
    /// ```
    pub fn to_u32(self) -> u32 {
        let Self { r, g, b } = self.clamped();
        let ch = |c: f32| (c * 255.0) as u32;
        ch(r) << 16 | ch(g) << 8 | ch(b)
    }

    /// Returns `self` with each channel clamped to 0.0..=1.0.
    #[must_use]
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: clamp(self.r, 0.0, 1.0),
            g: clamp(self.g, 0.0, 1.0),
            b: clamp(self.b, 0.0, 1.0),
        }
    }

    /// Returns the channels of `self` as an array `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Add for Color {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Color {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
        }
    }
}

impl Mul for Color {
    type Output = Self;

    /// Returns the componentwise product of `self` and `rhs`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
        }
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *other * t + *self * (1.0 - t)
    }
}

impl ApproxEq<Self, f32> for Color {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.to_array().approx_eq_eps(&other.to_array(), eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

impl Debug for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Color{:?}", self.to_array())
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(packed: u32) -> Self {
        Self::from_u32(packed)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn constructors_clamp() {
        assert_eq!(rgb(1.5, -0.5, 0.25), rgb(1.0, 0.0, 0.25));
        assert_eq!(Color::new(2.0, 2.0, 2.0), Color::WHITE);
    }

    #[test]
    fn from_packed() {
        assert_eq!(Color::from_u32(0x00_00_00), Color::BLACK);
        assert_eq!(Color::from_u32(0xFF_FF_FF), Color::WHITE);
        assert_approx_eq!(Color::from_u32(0x33_66_99), rgb(0.2, 0.4, 0.6));
        // High byte ignored
        assert_eq!(Color::from_u32(0xAB_FF_00_00), rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn to_packed_truncates() {
        assert_eq!(Color::WHITE.to_u32(), 0xFF_FF_FF);
        assert_eq!(Color::BLACK.to_u32(), 0);
        // 0.999 * 255 = 254.745
        assert_eq!(rgb(0.999, 0.0, 0.0).to_u32(), 0xFE_00_00);
        assert_eq!(rgb(0.0, 0.5, 0.0).to_u32(), 0x00_7F_00);
    }

    #[test]
    fn arithmetic_is_unclamped() {
        let c = rgb(0.5, 1.0, 0.0);
        assert_eq!(c * 4.0, Color { r: 2.0, g: 4.0, b: 0.0 });
        assert_eq!(c + c, Color { r: 1.0, g: 2.0, b: 0.0 });
        assert_eq!((c * 4.0).clamped(), rgb(1.0, 1.0, 0.0));
    }

    #[test]
    fn modulate() {
        assert_eq!(rgb(0.5, 1.0, 0.0) * rgb(0.5, 0.25, 1.0), rgb(0.25, 0.25, 0.0));
    }

    #[test]
    fn lerp() {
        let (a, b) = (Color::BLACK, rgb(1.0, 0.5, 0.0));
        assert_eq!(a.lerp(&b, 0.5), rgb(0.5, 0.25, 0.0));
    }
}
