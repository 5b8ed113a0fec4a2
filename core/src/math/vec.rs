//! Homogeneous four-component vectors.
//!
//! A [`Vec4`] represents a point (`w` = 1), a direction (`w` = 0), or after
//! projection a point in homogeneous clip space with arbitrary `w`. Vectors
//! are transformed as *row vectors*, multiplied from the left by a matrix:
//! `v * M`.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Index, Mul, MulAssign, Neg, Sub};

use super::Lerp;
use super::approx::ApproxEq;

/// A vector in homogeneous coordinates.
#[derive(Copy, Clone, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Returns a new vector with the given components.
#[inline]
pub const fn vec4(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
    Vec4 { x, y, z, w }
}

/// Returns a new point with the given coordinates and `w` = 1.
#[inline]
pub const fn pt4(x: f32, y: f32, z: f32) -> Vec4 {
    vec4(x, y, z, 1.0)
}

impl Vec4 {
    /// The all-zeroes vector.
    pub const ZERO: Self = vec4(0.0, 0.0, 0.0, 0.0);

    /// Returns the components of `self` as an array `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Returns the dot product of the `xyz` parts of `self` and `other`.
    /// The `w` components are ignored.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of the `xyz` parts of `self` and `other`.
    /// The `w` component of the result is always zero.
    pub fn cross(&self, other: &Self) -> Self {
        let x = self.y * other.z - self.z * other.y;
        let y = self.z * other.x - self.x * other.z;
        let z = self.x * other.y - self.y * other.x;
        vec4(x, y, z, 0.0)
    }

    /// Returns the Euclidean length of the `xyz` part of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        super::float::f32::sqrt(self.dot(self))
    }

    /// Returns `self` scaled by the reciprocal of its length.
    ///
    /// All four components are scaled. If `self` has zero length,
    /// returns `self` unchanged instead of dividing by zero.
    ///
    /// # Examples
    /// ```
    /// use softfb_core::math::vec::{vec4, Vec4};
    ///
    /// assert_eq!(vec4(0.0, -2.0, 0.0, 0.0).normalize(), vec4(0.0, -1.0, 0.0, 0.0));
    /// assert_eq!(Vec4::ZERO.normalize(), Vec4::ZERO);
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Self {
        let len = self.len();
        if len == 0.0 { *self } else { *self * len.recip() }
    }
}

//
// Operator impls
//

impl Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        vec4(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        vec4(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        vec4(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        vec4(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl MulAssign<f32> for Vec4 {
    #[inline]
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;

    /// Returns the component at index `i`: 0 is `x`, 1 is `y`, and so on.
    ///
    /// # Panics
    /// If `i > 3`.
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("vector index {i} out of bounds (0..4)"),
        }
    }
}

//
// Local trait impls
//

impl Lerp for Vec4 {
    /// Returns `other * t + self * (1 - t)`, componentwise.
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *other * t + *self * (1.0 - t)
    }
}

impl ApproxEq<Self, f32> for Vec4 {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.to_array().approx_eq_eps(&other.to_array(), eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Foreign trait impls
//

impl Debug for Vec4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec4{:?}", self.to_array())
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        vec4(x, y, z, w)
    }
}
