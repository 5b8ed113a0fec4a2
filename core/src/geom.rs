//! Basic geometric primitives.

use crate::math::{Color, Lerp, Vec4};
use crate::render::tex::TexCoord;

/// A vertex with a position and the attributes carried through the pipeline.
///
/// The same type is used in every coordinate space a vertex passes through:
/// object, camera, clip and screen space. Which space `pos` is in depends on
/// which transform stage last touched the vertex.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    /// Position, in homogeneous coordinates.
    pub pos: Vec4,
    /// Flat vertex color.
    pub color: Color,
    /// Texture coordinate in 0.0..=1.0.
    pub texcoord: TexCoord,
    /// Position transformed to world space, used for lighting.
    pub world_pos: Vec4,
    /// Surface normal, used for lighting.
    pub normal: Vec4,
    /// Cached reciprocal of `pos.w`.
    ///
    /// Equals `1 / pos.w` whenever `pos.w` is nonzero. Its value is not
    /// meaningful for a position with `w` = 0.
    pub inv_w: f32,
}

/// Returns a new vertex with the given position, color and texture
/// coordinate, and with zero world position and normal.
#[inline]
pub fn vertex(pos: Vec4, color: Color, texcoord: TexCoord) -> Vertex {
    Vertex::new(pos, color, texcoord)
}

impl Vertex {
    /// Returns a new vertex with the given position, color and texture
    /// coordinate, and with zero world position and normal.
    pub fn new(pos: Vec4, color: Color, texcoord: TexCoord) -> Self {
        Self {
            color,
            texcoord,
            ..Self::default()
        }
        .with_pos(pos)
    }

    /// Returns `self` with position `pos`, updating the cached `inv_w`
    /// if `pos.w` is nonzero.
    #[must_use]
    #[inline]
    pub fn with_pos(mut self, pos: Vec4) -> Self {
        self.pos = pos;
        if pos.w != 0.0 {
            self.inv_w = pos.w.recip();
        }
        self
    }
}

impl Lerp for Vertex {
    /// Linearly interpolates every field of `self` and `other`, `inv_w`
    /// included.
    ///
    /// Only meaningful if both vertices are in the same coordinate space.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            pos: self.pos.lerp(&other.pos, t),
            color: self.color.lerp(&other.color, t),
            texcoord: self.texcoord.lerp(&other.texcoord, t),
            world_pos: self.world_pos.lerp(&other.world_pos, t),
            normal: self.normal.lerp(&other.normal, t),
            inv_w: self.inv_w.lerp(&other.inv_w, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{pt4, rgb, vec4};
    use crate::render::tex::uv;

    use super::*;

    #[test]
    fn new_caches_inv_w() {
        let v = vertex(vec4(1.0, 2.0, 3.0, 4.0), rgb(1.0, 0.0, 0.0), uv(0.0, 1.0));
        assert_eq!(v.inv_w, 0.25);
        assert_eq!(v.world_pos, Vec4::ZERO);
        assert_eq!(v.normal, Vec4::ZERO);
    }

    #[test]
    fn with_zero_w_keeps_inv_w() {
        let v = vertex(pt4(0.0, 0.0, 0.0), Color::BLACK, uv(0.0, 0.0))
            .with_pos(vec4(1.0, 0.0, 0.0, 0.0));
        assert_eq!(v.inv_w, 1.0);
        assert_eq!(v.pos, vec4(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn lerp_interpolates_every_field() {
        let a = Vertex {
            pos: vec4(0.0, 0.0, 0.0, 1.0),
            color: Color::BLACK,
            texcoord: uv(0.0, 0.0),
            world_pos: pt4(0.0, 0.0, 0.0),
            normal: vec4(0.0, 0.0, 0.0, 0.0),
            inv_w: 1.0,
        };
        let b = Vertex {
            pos: vec4(4.0, 8.0, 2.0, 1.0),
            color: Color::WHITE,
            texcoord: uv(1.0, 0.5),
            world_pos: pt4(2.0, 2.0, 2.0),
            normal: vec4(0.0, 0.0, 4.0, 0.0),
            inv_w: 0.5,
        };
        let mid = a.lerp(&b, 0.5);

        assert_eq!(mid.pos, vec4(2.0, 4.0, 1.0, 1.0));
        assert_eq!(mid.color, rgb(0.5, 0.5, 0.5));
        assert_eq!(mid.texcoord, uv(0.5, 0.25));
        assert_eq!(mid.world_pos, pt4(1.0, 1.0, 1.0));
        assert_eq!(mid.normal, vec4(0.0, 0.0, 2.0, 0.0));
        assert_eq!(mid.inv_w, 0.75);
    }
}
