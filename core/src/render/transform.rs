//! The vertex transform stage.
//!
//! Vertices travel from object space through camera (view) space and clip
//! space to screen space:
//! ```text
//!            world * view           projection             homogenize
//! object ------------------> camera -----------> clip ------------------> screen
//! ```
//! In screen space, x grows right and y down, with (0, 0) at the top left
//! corner of the viewport; z is depth in 0.0..=1.0.

use crate::geom::Vertex;
use crate::math::Mat4;

/// The result of testing a vertex against the clip volume.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClipTest {
    Inside,
    Outside,
}

/// World, view and projection matrices, plus the viewport size.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    world: Mat4,
    view: Mat4,
    projection: Mat4,
    world_view: Mat4,
    width: f32,
    height: f32,
}

impl Transform {
    /// Returns a transform for a viewport of `width` × `height` pixels.
    ///
    /// The world and view matrices are initially identity, and the
    /// projection is a perspective projection with a 90° vertical field of
    /// view, the aspect ratio of the viewport, and near and far planes at
    /// 1.0 and 500.0.
    #[cfg(feature = "fp")]
    pub fn new(width: u32, height: u32) -> Self {
        use crate::math::perspective;
        use core::f32::consts::FRAC_PI_2;

        let aspect = width as f32 / height as f32;
        let proj = perspective(FRAC_PI_2, aspect, 1.0, 500.0);
        Self::with_projection(width, height, proj)
    }

    /// Returns a transform for a viewport of `width` × `height` pixels
    /// with identity world and view matrices and the given projection.
    pub fn with_projection(width: u32, height: u32, projection: Mat4) -> Self {
        Self {
            world: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection,
            world_view: Mat4::IDENTITY,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Returns the object-to-world matrix.
    pub fn world(&self) -> &Mat4 {
        &self.world
    }
    /// Returns the world-to-camera matrix.
    pub fn view(&self) -> &Mat4 {
        &self.view
    }
    /// Returns the camera-to-clip matrix.
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }
    /// Returns the cached product `world * view`.
    pub fn world_view(&self) -> &Mat4 {
        &self.world_view
    }

    pub fn set_world(&mut self, world: Mat4) {
        self.world = world;
        self.world_view = self.world * self.view;
    }
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.world_view = self.world * self.view;
    }
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// Transforms the position of `v` from object space to camera space.
    /// Other attributes are left unchanged.
    pub fn apply_model_view(&self, v: &Vertex) -> Vertex {
        v.with_pos(v.pos * &self.world_view)
    }

    /// Transforms the position of `v` from camera space to clip space.
    ///
    /// Does *not* perform the perspective divide. Instead, the attributes
    /// interpolated across a triangle (color, texture coordinate, world
    /// position and normal) are divided by the new `w`, so that they can be
    /// linearly interpolated in screen space and later recovered by
    /// multiplying by the interpolated `w`.
    pub fn apply_projection(&self, v: &Vertex) -> Vertex {
        let mut res = v.with_pos(v.pos * &self.projection);
        let inv_w = res.inv_w;
        res.color = res.color * inv_w;
        res.texcoord = res.texcoord * inv_w;
        res.world_pos = res.world_pos * inv_w;
        res.normal = res.normal * inv_w;
        res
    }

    /// Tests whether the clip-space position of `v` is inside the clip
    /// volume `0 ≤ z ≤ w, |x| ≤ w, |y| ≤ w`.
    ///
    /// Positions with `w ≤ 0` are always outside.
    pub fn check_clip_volume(&self, v: &Vertex) -> ClipTest {
        let p = v.pos;
        let outside = p.w <= 0.0
            || p.z < 0.0
            || p.z > p.w
            || p.x < -p.w
            || p.x > p.w
            || p.y < -p.w
            || p.y > p.w;

        if outside { ClipTest::Outside } else { ClipTest::Inside }
    }

    /// Performs the perspective divide and the viewport transform,
    /// taking the clip-space position of `v` to screen space.
    ///
    /// The resulting position has `w` = 1; the reciprocal of the clip-space
    /// `w` is kept in `inv_w` for perspective-correct interpolation.
    pub fn homogenize(&self, v: &Vertex) -> Vertex {
        let p = v.pos;
        let inv_w = p.w.recip();
        let x = (p.x * inv_w + 1.0) * self.width * 0.5;
        let y = (1.0 - p.y * inv_w) * self.height * 0.5;
        let z = p.z * inv_w;

        let mut res = *v;
        res.pos = crate::math::pt4(x, y, z);
        res.inv_w = inv_w;
        res
    }
}
