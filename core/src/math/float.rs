//! Floating-point compatibility API.
//!
//! Most floating-point functions are currently unavailable in `no_std`.
//! This module provides the missing functions using either the `libm` or
//! `micromath` crate, depending on which feature is enabled. As a fallback,
//! it also implements the subset needed by the rasterizer itself (rounding
//! and square roots) even if none of the features is enabled.
//!
//! Use through the `f32` re-export, which resolves to the inherent methods
//! of the primitive type when `std` is enabled:
//! ```
//! use softfb_core::math::float::f32;
//! assert_eq!(f32::floor(-1.5), -2.0);
//! ```

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::ceilf as ceil;
    pub use libm::fabsf as abs;
    pub use libm::floorf as floor;
    pub use libm::sqrtf as sqrt;

    pub use libm::cosf as cos;
    pub use libm::sinf as sin;
    pub use libm::tanf as tan;
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext as mm;

    #[inline]
    pub fn abs(x: f32) -> f32 {
        mm::abs(x)
    }
    #[inline]
    pub fn floor(x: f32) -> f32 {
        mm::floor(x)
    }
    #[inline]
    pub fn ceil(x: f32) -> f32 {
        mm::ceil(x)
    }
    /// Returns the approximate square root of `x`.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        let y = mm::sqrt(x);
        // Two rounds of Newton's method
        let y = 0.5 * (y + (x / y));
        0.5 * (y + (x / y))
    }
    #[inline]
    pub fn sin(x: f32) -> f32 {
        mm::sin(x)
    }
    #[inline]
    pub fn cos(x: f32) -> f32 {
        mm::cos(x)
    }
    #[inline]
    pub fn tan(x: f32) -> f32 {
        mm::tan(x)
    }
}

pub mod fallback {
    use crate::math::float::fast_recip_sqrt;

    /// Returns the absolute value of `x`.
    #[inline]
    pub fn abs(x: f32) -> f32 {
        f32::from_bits(x.to_bits() & 0x7FFF_FFFF)
    }
    /// Returns the largest integer less than or equal to `x`.
    #[inline]
    pub fn floor(x: f32) -> f32 {
        let t = x as i64 as f32;
        if t > x { t - 1.0 } else { t }
    }
    /// Returns the smallest integer greater than or equal to `x`.
    #[inline]
    pub fn ceil(x: f32) -> f32 {
        -floor(-x)
    }
    /// Returns the approximate square root of `x`.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        if x == 0.0 {
            return 0.0;
        }
        let y = x * fast_recip_sqrt(x);
        // A round of Newton's method
        0.5 * (y + x / y)
    }
}

/// Returns a fast approximation of the reciprocal square root of a number.
#[inline]
pub fn fast_recip_sqrt(x: f32) -> f32 {
    // https://en.wikipedia.org/wiki/Fast_inverse_square_root
    const MAGIC: u32 = 0x5f37_5a86;
    let y = f32::from_bits(MAGIC.saturating_sub(x.to_bits() >> 1));
    // A round of Newton's method
    y * (1.5 - 0.5 * x * y * y)
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;

#[cfg(not(feature = "fp"))]
pub use fallback as f32;

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use core::f32::consts::*;

    use super::{f32, *};
    use crate::assert_approx_eq;

    #[cfg(feature = "libm")]
    #[test]
    fn libm_functions() {
        assert_eq!(libm::floor(1.5), 1.0);
        assert_eq!(libm::floor(-1.1), -2.0);
        assert_eq!(libm::ceil(1.1), 2.0);
        assert_eq!(libm::ceil(-1.5), -1.0);
        assert_eq!(libm::sqrt(9.0), 3.0);
        assert_approx_eq!(libm::sin(FRAC_PI_6), 0.5);
        assert_eq!(libm::cos(PI), -1.0);
        assert_approx_eq!(libm::tan(FRAC_PI_4), 1.0);
    }

    #[cfg(feature = "mm")]
    #[test]
    fn mm_functions() {
        assert_eq!(mm::floor(1.5), 1.0);
        assert_eq!(mm::floor(-1.1), -2.0);
        assert_eq!(mm::ceil(1.1), 2.0);
        assert_approx_eq!(mm::sqrt(9.0), 3.0);
        assert_approx_eq!(mm::sin(FRAC_PI_6), 0.5, eps = 0.01);
        assert_approx_eq!(mm::tan(FRAC_PI_4), 1.0, eps = 0.01);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_functions() {
        assert_eq!(f32::floor(-0.5), -1.0);
        assert_eq!(f32::ceil(0.5), 1.0);
        assert_eq!(f32::sqrt(9.0), 3.0);
        assert!(f32::sqrt(-1.0).is_nan());
        assert_eq!(f32::cos(PI), -1.0);
    }

    #[test]
    fn fallback_functions() {
        use fallback as fb;
        assert_eq!(fb::abs(-2.5), 2.5);
        assert_eq!(fb::abs(2.5), 2.5);

        assert_eq!(fb::floor(1.5), 1.0);
        assert_eq!(fb::floor(0.99), 0.0);
        assert_eq!(fb::floor(-0.0), 0.0);
        assert_eq!(fb::floor(-1.1), -2.0);
        assert_eq!(fb::floor(-2.0), -2.0);

        assert_eq!(fb::ceil(1.1), 2.0);
        assert_eq!(fb::ceil(2.0), 2.0);
        assert_eq!(fb::ceil(-1.5), -1.0);

        assert_eq!(fb::sqrt(0.0), 0.0);
        assert_approx_eq!(fb::sqrt(9.0), 3.0, eps = 1e-4);
        assert_approx_eq!(fb::sqrt(16.0), 4.0, eps = 1e-4);
    }
}
