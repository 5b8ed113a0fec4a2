//! Textures and texture sampling.

use alloc::vec::Vec;
use core::ops::{Add, Mul};

use log::debug;

use crate::error::{Error, Result};
use crate::math::{ApproxEq, Color, Lerp, round_away_from_zero};
use crate::util::buf::Buf2;

/// A texture coordinate.
///
/// On a texture, `u` grows from 0.0 at the left edge to 1.0 at the right,
/// and `v` from 0.0 at the top edge to 1.0 at the bottom.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
}

/// Returns a new texture coordinate.
#[inline]
pub const fn uv(u: f32, v: f32) -> TexCoord {
    TexCoord { u, v }
}

impl Add for TexCoord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        uv(self.u + rhs.u, self.v + rhs.v)
    }
}

impl Mul<f32> for TexCoord {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        uv(self.u * s, self.v * s)
    }
}

impl Lerp for TexCoord {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *other * t + *self * (1.0 - t)
    }
}

impl ApproxEq<Self, f32> for TexCoord {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        [self.u, self.v].approx_eq_eps(&[other.u, other.v], eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

/// The layout of the texel data passed to [`Texture::from_bytes`].
///
/// Each texel is the in-memory representation of a little-endian
/// `0x00RRGGBB` word, truncated to the number of bytes per texel: `Rgb`
/// texels are `[b, g, r]` and `Rgba` texels `[b, g, r, a]`. Alpha is
/// ignored. Rows are tightly packed.
///
/// The discriminants match the classic `GL_RGB` and `GL_RGBA` constants,
/// which are also what [`PixelFormat::try_from`] accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PixelFormat {
    Rgb = 0x1907,
    Rgba = 0x1908,
}

impl PixelFormat {
    /// Returns the number of bytes per texel in this format.
    pub const fn size(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

impl TryFrom<u32> for PixelFormat {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0x1907 => Ok(Self::Rgb),
            0x1908 => Ok(Self::Rgba),
            _ => Err(Error::UnsupportedFormat(code)),
        }
    }
}

/// A 2D texture.
#[derive(Clone, Debug)]
pub struct Texture {
    texels: Buf2<Color>,
}

impl Texture {
    /// Decodes a texture of `width` × `height` texels from `bytes`.
    ///
    /// Bytes beyond the last texel are ignored.
    ///
    /// # Errors
    /// * [`Error::EmptyTexture`] if `width` or `height` is zero.
    /// * [`Error::TextureData`] if `bytes` has fewer than
    ///   `width * height * format.size()` bytes.
    ///
    /// # Examples
    /// ```
    /// use softfb_core::render::tex::{PixelFormat, Texture, uv};
    /// use softfb_core::math::color::rgb;
    ///
    /// // One blue texel followed by one red texel
    /// let bytes = [0xFF, 0, 0, 0, 0, 0xFF];
    /// let tex = Texture::from_bytes(2, 1, PixelFormat::Rgb, &bytes).unwrap();
    /// assert_eq!(tex.sample_nearest(uv(0.0, 0.0)), rgb(0.0, 0.0, 1.0));
    /// assert_eq!(tex.sample_nearest(uv(1.0, 0.0)), rgb(1.0, 0.0, 0.0));
    /// ```
    pub fn from_bytes(
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyTexture);
        }
        let (w, h) = (width as usize, height as usize);
        let expected = w * h * format.size();
        if bytes.len() < expected {
            return Err(Error::TextureData { expected, actual: bytes.len() });
        }

        let texels: Vec<_> = bytes[..expected]
            .chunks_exact(format.size())
            .map(|t| Color::from_u32(u32::from_le_bytes([t[0], t[1], t[2], 0])))
            .collect();

        debug!("decoded {width}x{height} {format:?} texture");
        Ok(Self { texels: Buf2::new(w, h, texels) })
    }

    /// Returns a texture with the given texels.
    ///
    /// # Panics
    /// If `texels` is empty.
    pub fn from_texels(texels: Buf2<Color>) -> Self {
        assert!(!texels.is_empty(), "texture must have at least one texel");
        Self { texels }
    }

    /// Returns the width of `self` in texels.
    #[inline]
    pub fn width(&self) -> usize {
        self.texels.width()
    }
    /// Returns the height of `self` in texels.
    #[inline]
    pub fn height(&self) -> usize {
        self.texels.height()
    }
    /// Returns the texels of `self`.
    pub fn texels(&self) -> &Buf2<Color> {
        &self.texels
    }

    /// Returns the texel nearest to `tc`.
    ///
    /// The coordinates are scaled to `0..=width-1` and `0..=height-1`,
    /// rounded away from zero, and clamped to the bounds of the texture.
    pub fn sample_nearest(&self, tc: TexCoord) -> Color {
        let u = tc.u * (self.width() - 1) as f32;
        let v = tc.v * (self.height() - 1) as f32;
        self.sample_nearest_abs(u, v)
    }

    /// Returns the texel nearest to the unnormalized coordinates (`u`, `v`).
    pub fn sample_nearest_abs(&self, u: f32, v: f32) -> Color {
        let clamp_to = |x: f32, dim: usize| {
            round_away_from_zero(x).clamp(0, dim as i32 - 1) as usize
        };
        let u = clamp_to(u, self.width());
        let v = clamp_to(v, self.height());
        self.texels[(u, v)]
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::assert_approx_eq;
    use crate::math::rgb;

    use super::*;

    #[rustfmt::skip]
    fn tex() -> Texture {
        Texture::from_texels(Buf2::new(2, 2, [
            rgb(1.0, 0.0, 0.0), rgb(0.0, 1.0, 0.0),
            rgb(0.0, 0.0, 1.0), rgb(1.0, 1.0, 0.0),
        ]))
    }

    #[test]
    fn texcoord_arithmetic() {
        assert_eq!(uv(1.0, 2.0) * 0.5, uv(0.5, 1.0));
        assert_eq!(uv(1.0, 2.0) + uv(0.5, -1.0), uv(1.5, 1.0));
        assert_approx_eq!(uv(0.0, 1.0).lerp(&uv(1.0, 0.0), 0.25), uv(0.25, 0.75));
    }

    #[test]
    fn pixel_format_codes() {
        assert_eq!(PixelFormat::try_from(0x1907), Ok(PixelFormat::Rgb));
        assert_eq!(PixelFormat::try_from(0x1908), Ok(PixelFormat::Rgba));
        assert_eq!(
            PixelFormat::try_from(0x1909),
            Err(Error::UnsupportedFormat(0x1909))
        );
        assert_eq!(PixelFormat::Rgba as u32, 0x1908);
    }

    #[test]
    fn decode_rgb() {
        #[rustfmt::skip]
        let bytes = [
            0x00, 0x00, 0xFF,   0x00, 0xFF, 0x00,
            0xFF, 0x00, 0x00,   0x33, 0x66, 0x99,
        ];
        let tex = Texture::from_bytes(2, 2, PixelFormat::Rgb, &bytes).unwrap();
        assert_eq!(tex.texels()[(0, 0)], rgb(1.0, 0.0, 0.0));
        assert_eq!(tex.texels()[(1, 0)], rgb(0.0, 1.0, 0.0));
        assert_eq!(tex.texels()[(0, 1)], rgb(0.0, 0.0, 1.0));
        assert_approx_eq!(tex.texels()[(1, 1)], rgb(0.6, 0.4, 0.2));
    }

    #[test]
    fn decode_rgba_ignores_alpha() {
        // Little-endian 0xFFFFFFFF and 0x000000FF
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00];
        let tex = Texture::from_bytes(2, 1, PixelFormat::Rgba, &bytes).unwrap();
        assert_eq!(tex.texels()[(0, 0)], Color::WHITE);
        assert_eq!(tex.texels()[(1, 0)], rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            Texture::from_bytes(0, 4, PixelFormat::Rgb, &[]).unwrap_err(),
            Error::EmptyTexture
        );
        assert_eq!(
            Texture::from_bytes(2, 2, PixelFormat::Rgba, &vec![0; 15])
                .unwrap_err(),
            Error::TextureData { expected: 16, actual: 15 }
        );
    }

    #[test]
    fn sample_nearest_corners() {
        let tex = tex();
        assert_eq!(tex.sample_nearest(uv(0.0, 0.0)), rgb(1.0, 0.0, 0.0));
        assert_eq!(tex.sample_nearest(uv(1.0, 0.0)), rgb(0.0, 1.0, 0.0));
        assert_eq!(tex.sample_nearest(uv(0.0, 1.0)), rgb(0.0, 0.0, 1.0));
        assert_eq!(tex.sample_nearest(uv(1.0, 1.0)), rgb(1.0, 1.0, 0.0));
    }

    #[test]
    fn sample_nearest_rounds_away_from_zero() {
        let tex = tex();
        // 0.1 * (2 - 1) rounds up to texel 1
        assert_eq!(tex.sample_nearest(uv(0.1, 0.0)), rgb(0.0, 1.0, 0.0));
        assert_eq!(tex.sample_nearest_abs(0.0, 0.01), rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn sample_nearest_clamps() {
        let tex = tex();
        assert_eq!(tex.sample_nearest(uv(-3.0, 0.0)), rgb(1.0, 0.0, 0.0));
        assert_eq!(tex.sample_nearest(uv(5.0, 0.0)), rgb(0.0, 1.0, 0.0));
        assert_eq!(tex.sample_nearest(uv(0.0, 1.7)), rgb(0.0, 0.0, 1.0));
        assert_eq!(tex.sample_nearest_abs(-0.5, -0.5), rgb(1.0, 0.0, 0.0));
    }
}
