//! Matrices and linear transforms.
//!
//! Matrices follow the *row vector* convention: a vector `v` is transformed
//! by computing `v * M`, and the translation part of an affine matrix lives
//! in its bottom row. Consequently the product `A * B` is the transform that
//! first applies `A`, then `B`:
//! ```
//! use softfb_core::math::{mat::*, vec::pt4};
//!
//! let m = scale(2.0, 2.0, 2.0) * translate(1.0, 0.0, 0.0);
//! assert_eq!(pt4(1.0, 1.0, 1.0) * m, pt4(3.0, 2.0, 2.0));
//! ```

use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut, Mul};

use super::approx::ApproxEq;
use super::vec::{Vec4, vec4};

/// A 4×4 matrix of `f32` elements, stored in row-major order in a single
/// flat array. Element (row *r*, column *c*) is at index `4 * r + c`.
#[derive(Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct Mat4([f32; 16]);

/// Returns the index of element (`row`, `col`) in the backing array.
#[inline]
const fn idx(row: usize, col: usize) -> usize {
    row * 4 + col
}

//
// Inherent impls
//

impl Mat4 {
    /// The all-zeroes matrix.
    pub const ZERO: Self = Self([0.0; 16]);

    /// The identity matrix.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Returns a matrix with the given rows.
    pub const fn new(rows: [[f32; 4]; 4]) -> Self {
        let mut els = [0.0; 16];
        let mut i = 0;
        while i < 16 {
            els[i] = rows[i / 4][i % 4];
            i += 1;
        }
        Self(els)
    }

    /// Returns the elements of `self` as a flat row-major array.
    #[inline]
    pub const fn as_flat(&self) -> &[f32; 16] {
        &self.0
    }

    /// Returns the row of `self` with index `i` as a vector.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        let r = &self.0[idx(i, 0)..idx(i + 1, 0)];
        vec4(r[0], r[1], r[2], r[3])
    }

    /// Returns the column of `self` with index `i` as a vector.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        let m = &self.0;
        vec4(m[idx(0, i)], m[idx(1, i)], m[idx(2, i)], m[idx(3, i)])
    }

    /// Returns the transpose of `self`.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut res = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                res.0[idx(c, r)] = self.0[idx(r, c)];
            }
        }
        res
    }

    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f32 {
        let m = &self.0;
        let det3 = |j, k, l| {
            let [a, b, c] = [m[idx(1, j)], m[idx(1, k)], m[idx(1, l)]];
            let [d, e, f] = [m[idx(2, j)], m[idx(2, k)], m[idx(2, l)]];
            let [g, h, i] = [m[idx(3, j)], m[idx(3, k)], m[idx(3, l)]];

            a * (e * i - f * h) + b * (f * g - d * i) + c * (d * h - e * g)
        };
        m[0] * det3(1, 2, 3) - m[1] * det3(0, 2, 3) + m[2] * det3(0, 1, 3)
            - m[3] * det3(0, 1, 2)
    }

    /// Returns the inverse of `self`.
    ///
    /// Uses Gauss–Jordan elimination with partial pivoting.
    ///
    /// The result is unspecified if `self` is singular (has a determinant
    /// of zero); in debug mode this method panics in that case. Whether a
    /// matrix counts as singular is judged relative to the lengths of its
    /// rows, so uniformly scaling an invertible matrix by a tiny factor
    /// keeps it invertible.
    #[must_use]
    pub fn inverse(&self) -> Self {
        use super::float::f32 as fp;

        debug_assert!(
            !self.is_singular(),
            "singular or near-singular matrix has no well-defined inverse"
        );

        fn swap_rows(m: &mut [f32; 16], r: usize, s: usize) {
            for c in 0..4 {
                m.swap(idx(r, c), idx(s, c));
            }
        }
        fn mul_row(m: &mut [f32; 16], row: usize, mul: f32) {
            for c in 0..4 {
                m[idx(row, c)] *= mul;
            }
        }
        fn sub_row(m: &mut [f32; 16], from: usize, to: usize, mul: f32) {
            for c in 0..4 {
                m[idx(to, c)] -= mul * m[idx(from, c)];
            }
        }

        let mut this = self.0;
        let mut inv = Self::IDENTITY.0;

        for col in 0..4 {
            let pivot = (col..4)
                .max_by(|&r, &s| {
                    let a = fp::abs(this[idx(r, col)]);
                    let b = fp::abs(this[idx(s, col)]);
                    a.total_cmp(&b)
                })
                .unwrap_or(col);

            swap_rows(&mut this, col, pivot);
            swap_rows(&mut inv, col, pivot);

            let diag = this[idx(col, col)];
            if diag == 0.0 {
                continue;
            }
            mul_row(&mut this, col, diag.recip());
            mul_row(&mut inv, col, diag.recip());

            for r in (0..4).filter(|&r| r != col) {
                let x = this[idx(r, col)];
                sub_row(&mut this, col, r, x);
                sub_row(&mut inv, col, r, x);
            }
        }
        Self(inv)
    }

    /// Returns whether `self` is singular to within `f32` precision.
    ///
    /// |det| is at most the product of the row lengths, with equality
    /// for orthogonal rows; compares their ratio against epsilon.
    fn is_singular(&self) -> bool {
        let det = self.determinant();
        let rows_sq: f32 = self
            .0
            .chunks_exact(4)
            .map(|row| row.iter().map(|x| x * x).sum::<f32>())
            .product();
        det * det <= f32::EPSILON * f32::EPSILON * rows_sq
    }

    /// Returns `v` transformed by `self`, that is, the row vector `v * self`.
    #[inline]
    pub fn apply(&self, v: &Vec4) -> Vec4 {
        vec4(
            v.dot4(&self.col(0)),
            v.dot4(&self.col(1)),
            v.dot4(&self.col(2)),
            v.dot4(&self.col(3)),
        )
    }
}

impl Vec4 {
    /// Returns the dot product of all four components.
    #[inline]
    fn dot4(&self, other: &Vec4) -> f32 {
        self.dot(other) + self.w * other.w
    }
}

//
// Operator impls
//

impl Mul for Mat4 {
    type Output = Self;

    /// Returns the matrix product `self * rhs`: the transform that first
    /// applies `self` and then `rhs`.
    fn mul(self, rhs: Self) -> Self {
        let mut res = Self::ZERO;
        for r in 0..4 {
            let row = self.row(r);
            for c in 0..4 {
                res.0[idx(r, c)] = row.dot4(&rhs.col(c));
            }
        }
        res
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, m: Mat4) -> Vec4 {
        m.apply(&self)
    }
}

impl Mul<&Mat4> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, m: &Mat4) -> Vec4 {
        m.apply(&self)
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    /// Returns the element at (`row`, `col`).
    ///
    /// # Panics
    /// If `row` or `col` is greater than 3.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < 4 && col < 4, "index ({row}, {col}) out of bounds");
        &self.0[idx(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < 4 && col < 4, "index ({row}, {col}) out of bounds");
        &mut self.0[idx(row, col)]
    }
}

//
// Trait impls
//

impl Default for Mat4 {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Debug for Mat4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mat4[")?;
        for r in 0..4 {
            writeln!(f, "    {:6.2?}", self.row(r).to_array())?;
        }
        write!(f, "]")
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Self::new(rows)
    }
}

impl ApproxEq<Self, f32> for Mat4 {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Builders
//

/// Returns a matrix that translates by (`x`, `y`, `z`).
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m[(3, 0)] = x;
    m[(3, 1)] = y;
    m[(3, 2)] = z;
    m
}

/// Returns a matrix that scales by `x`, `y`, and `z` along the
/// respective axes.
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m[(0, 0)] = x;
    m[(1, 1)] = y;
    m[(2, 2)] = z;
    m
}

/// Returns a matrix that rotates by angle `theta` (in radians)
/// about `axis`, which need not be normalized. The `w` component
/// of `axis` is ignored.
///
/// The matrix is derived from the unit quaternion
/// `(axis * sin(θ/2), cos(θ/2))`.
#[cfg(feature = "fp")]
pub fn rotate(axis: Vec4, theta: f32) -> Mat4 {
    use super::float::f32;

    let (sin, cos) = (f32::sin(theta * 0.5), f32::cos(theta * 0.5));
    let axis = vec4(axis.x, axis.y, axis.z, 0.0).normalize();

    let [x, y, z, w] = [axis.x * sin, axis.y * sin, axis.z * sin, cos];

    Mat4::new([
        [
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + w * z),
            2.0 * (x * z - w * y),
            0.0,
        ],
        [
            2.0 * (x * y - w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + w * x),
            0.0,
        ],
        [
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
            0.0,
        ],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a view matrix for a camera at `eye` looking at `target`,
/// with `up` giving the approximate up direction.
///
/// The view space is left-handed: the camera looks towards positive z,
/// with x pointing right and y pointing up.
pub fn lookat(eye: Vec4, target: Vec4, up: Vec4) -> Mat4 {
    let z = (target - eye).normalize();
    let x = up.cross(&z).normalize();
    let y = z.cross(&x);

    Mat4::new([
        [x.x, y.x, z.x, 0.0],
        [x.y, y.y, z.y, 0.0],
        [x.z, y.z, z.z, 0.0],
        [-x.dot(&eye), -y.dot(&eye), -z.dot(&eye), 1.0],
    ])
}

/// Returns a perspective projection matrix.
///
/// `fov` is the vertical angle of view in radians, and `aspect` the ratio
/// of viewport width to height. View-space depths between `near` and `far`
/// are mapped so that after the perspective divide they lie in 0.0..=1.0.
/// The projected `w` equals the view-space `z`.
#[cfg(feature = "fp")]
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    use super::float::f32;

    let f = f32::tan(fov * 0.5).recip();
    let depth = far - near;

    let mut m = Mat4::ZERO;
    m[(0, 0)] = f / aspect;
    m[(1, 1)] = f;
    m[(2, 2)] = far / depth;
    m[(3, 2)] = -near * far / depth;
    m[(2, 3)] = 1.0;
    m
}
