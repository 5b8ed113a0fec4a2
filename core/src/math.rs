//! Linear algebra and other useful mathematics.
//!
//! Includes homogeneous [vectors][vec], 4×4 [matrices][mat] and
//! [colors][color], a [floating-point compatibility layer][float] for
//! `no_std` builds, and utilities such as [approximate equality][approx]
//! comparisons and linear interpolation.

pub use {
    approx::ApproxEq,
    color::{Color, rgb},
    mat::{Mat4, lookat, scale, translate},
    vec::{Vec4, pt4, vec4},
};
#[cfg(feature = "fp")]
pub use mat::{perspective, rotate};

pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod vec;

/// Trait for linear interpolation between two values.
pub trait Lerp: Sized {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// If `t` = 0, returns `self`; if `t` = 1, returns `other`.
    /// For 0 < `t` < 1, returns the weighted average of `self` and `other`
    /// ```text
    /// other * t + self * (1 - t)
    /// ```
    ///
    /// This method does not panic if `t < 0.0` or `t > 1.0`, or if `t`
    /// is `NaN`, but the return value in those cases is unspecified.
    ///
    /// # Examples
    /// ```
    /// use softfb_core::math::Lerp;
    ///
    /// assert_eq!(f32::lerp(&1.0, &5.0, 0.25), 2.0);
    /// ```
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

/// Linearly interpolates between two values.
///
/// For examples and more information, see [`Lerp::lerp`].
#[inline]
pub fn lerp<T: Lerp>(t: f32, from: T, to: T) -> T {
    from.lerp(&to, t)
}

/// Returns `val` restricted to the range `min..=max`.
///
/// Unlike [`Ord::clamp`], works with any `PartialOrd` type, and does not
/// panic if `min > max` (the result is then `max` or `min`, unspecified).
///
/// # Examples
/// ```
/// use softfb_core::math::clamp;
///
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-3, 0, 10), 0);
/// assert_eq!(clamp(7, 0, 10), 7);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(val: T, min: T, max: T) -> T {
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Rounds `x` to the nearest integer in the direction away from zero.
///
/// That is, positive values are rounded up and negative values down.
///
/// # Examples
/// ```
/// use softfb_core::math::round_away_from_zero;
///
/// assert_eq!(round_away_from_zero(1.2), 2);
/// assert_eq!(round_away_from_zero(-1.2), -2);
/// assert_eq!(round_away_from_zero(3.0), 3);
/// ```
#[inline]
pub fn round_away_from_zero(x: f32) -> i32 {
    use float::f32;
    if x < 0.0 {
        f32::floor(x) as i32
    } else {
        f32::ceil(x) as i32
    }
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        other * t + self * (1.0 - t)
    }
}

impl<U: Lerp, V: Lerp> Lerp for (U, V) {
    fn lerp(&self, (u, v): &Self, t: f32) -> Self {
        (self.0.lerp(u, t), self.1.lerp(v, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32() {
        assert_eq!(lerp(0.0, 2.0, 5.0), 2.0);
        assert_eq!(lerp(0.25, 2.0, 5.0), 2.75);
        assert_eq!(lerp(1.0, 2.0, 5.0), 5.0);
    }

    #[test]
    fn lerp_tuple() {
        let a = (0.0f32, 10.0f32);
        let b = (4.0, 20.0);
        assert_eq!(a.lerp(&b, 0.5), (2.0, 15.0));
    }

    #[test]
    fn clamp_partial_ord() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(10, 0, 7), 7);
    }

    #[test]
    fn rounding_away_from_zero() {
        assert_eq!(round_away_from_zero(0.0), 0);
        assert_eq!(round_away_from_zero(0.5), 1);
        assert_eq!(round_away_from_zero(2.0), 2);
        assert_eq!(round_away_from_zero(2.01), 3);
        assert_eq!(round_away_from_zero(-0.5), -1);
        assert_eq!(round_away_from_zero(-2.0), -2);
    }
}
