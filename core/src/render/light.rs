//! Light sources, surface materials, and per-fragment shading.

use crate::math::{Color, Vec4, pt4};

/// A point light source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    /// Position in object space. Transformed to world space by the
    /// current world matrix whenever either one changes.
    pub pos: Vec4,
    pub ambient: Color,
    pub diffuse: Color,
    /// Stored, but not used in shading.
    pub specular: Color,
}

/// The light-reflecting properties of a surface.
///
/// Only `diffuse` currently takes part in shading; the rest of the
/// parameters are kept so that the full set can be configured.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub emission: Color,
    pub shininess: f32,
}

impl Default for Light {
    /// Returns a black light at (50, 0, 0).
    fn default() -> Self {
        Self {
            pos: pt4(50.0, 0.0, 0.0),
            ambient: Color::BLACK,
            diffuse: Color::BLACK,
            specular: Color::BLACK,
        }
    }
}

/// Returns the light reaching a fragment.
///
/// `frag_pos` and `light_pos` are world-space positions and `normal` is the
/// unit surface normal at the fragment. The result is the sum of the ambient
/// term and a diffuse term proportional to the cosine of the angle between
/// `normal` and the direction from the light to the fragment, clamped to
/// 0.0..=1.0 in each channel. With no diffuse contribution the result
/// equals the (clamped) ambient light.
pub fn shade(
    normal: Vec4,
    frag_pos: Vec4,
    light_pos: Vec4,
    light: &Light,
    material: &Material,
) -> Color {
    let dir = (frag_pos - light_pos).normalize();
    let k = dir.dot(&normal).max(0.0);
    let diffuse = (material.diffuse + light.diffuse) * k;
    (diffuse + light.ambient).clamped()
}
