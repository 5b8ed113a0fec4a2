//! Rendering context and parameters.

use core::fmt::{self, Debug, Formatter};
use core::ops::{BitOr, BitOrAssign};

use crate::math::Color;

use super::light::{Light, Material};

/// A set of drawing modes. Modes are independent bits that can be
/// combined with `|`.
///
/// # Examples
/// ```
/// use softfb_core::render::Mode;
///
/// let mode = Mode::COLOR | Mode::LIGHTING;
/// assert!(mode.contains(Mode::COLOR));
/// assert!(!mode.contains(Mode::WIREFRAME));
/// assert!(mode.intersects(Mode::COLOR | Mode::TEXTURE_2D));
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Mode(u32);

impl Mode {
    /// No modes; nothing is drawn.
    pub const EMPTY: Self = Self(0);
    /// Draw triangle edges in the foreground color. Disables culling.
    pub const WIREFRAME: Self = Self(0x1);
    /// Fill triangles with their interpolated vertex colors.
    pub const COLOR: Self = Self(0x2);
    /// Modulate fill colors with the light reaching each fragment.
    pub const LIGHTING: Self = Self(0x4);
    /// Fill triangles with the current texture.
    pub const TEXTURE_2D: Self = Self(0x8);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::WIREFRAME, "WIREFRAME"),
        (Self::COLOR, "COLOR"),
        (Self::LIGHTING, "LIGHTING"),
        (Self::TEXTURE_2D, "TEXTURE_2D"),
    ];

    /// Returns the raw bits of `self`.
    pub const fn bits(self) -> u32 {
        self.0
    }
    /// Returns whether every mode in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
    /// Returns whether `self` and `other` have any modes in common.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
    /// Adds the modes in `other` to `self`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
    /// Removes the modes in `other` from `self`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for Mode {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl Debug for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (mode, name) in Self::NAMES {
            if self.contains(mode) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// Texture filtering method.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Filter {
    /// Sample the single texel nearest to the texture coordinate.
    #[default]
    Nearest,
}

/// Context and parameters used by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    /// The drawing modes in effect.
    pub mode: Mode,
    /// The color with which the color buffer is cleared.
    pub background: Color,
    /// The color of wireframe edges.
    pub foreground: Color,
    /// How textures are sampled.
    pub filter: Filter,
    /// The light source.
    pub light: Light,
    /// The material of drawn surfaces.
    pub material: Material,
}

impl Default for Context {
    /// Creates a rendering context with default settings.
    ///
    /// The default values are:
    /// * Mode:           Empty
    /// * Background:     Black
    /// * Foreground:     White
    /// * Texture filter: Nearest
    /// * Light:          Black, at (50, 0, 0)
    /// * Material:       Black, shininess 0
    fn default() -> Self {
        Self {
            mode: Mode::EMPTY,
            background: Color::BLACK,
            foreground: Color::WHITE,
            filter: Filter::Nearest,
            light: Light::default(),
            material: Material::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::math::pt4;

    use super::*;

    #[test]
    fn mode_insert_and_remove() {
        let mut mode = Mode::EMPTY;
        mode.insert(Mode::COLOR);
        mode |= Mode::TEXTURE_2D;
        assert!(mode.contains(Mode::COLOR | Mode::TEXTURE_2D));

        mode.remove(Mode::COLOR);
        assert!(!mode.contains(Mode::COLOR));
        assert!(mode.contains(Mode::TEXTURE_2D));
        assert_eq!(mode.bits(), 0x8);
    }

    #[test]
    fn modes_are_independent_bits() {
        let all = [Mode::WIREFRAME, Mode::COLOR, Mode::LIGHTING, Mode::TEXTURE_2D];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn mode_debug() {
        assert_eq!(format!("{:?}", Mode::EMPTY), "{}");
        assert_eq!(
            format!("{:?}", Mode::WIREFRAME | Mode::LIGHTING),
            "{WIREFRAME, LIGHTING}"
        );
    }

    #[test]
    fn context_defaults() {
        let ctx = Context::default();
        assert_eq!(ctx.mode, Mode::EMPTY);
        assert_eq!(ctx.background, Color::BLACK);
        assert_eq!(ctx.foreground, Color::WHITE);
        assert_eq!(ctx.filter, Filter::Nearest);
        assert_eq!(ctx.light.pos, pt4(50.0, 0.0, 0.0));
        assert_eq!(ctx.material, Material::default());
    }
}
