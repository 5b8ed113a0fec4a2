//! Render targets.
//!
//! The render target of the device is a double-buffered framebuffer,
//! comprising two color buffers and a shared depth buffer. One of the color
//! buffers is *active*: it receives all drawing and is the one presented
//! next. Presenting flips the active buffer.

use crate::util::buf::{Buf2, MutSlice2, Slice2};

/// A color value packed as `0x00RRGGBB`, stored in native byte order.
pub type Pixel = [u8; 4];

/// Double-buffered color storage plus a depth buffer.
///
/// Both color buffers live in one contiguous allocation of `2 * height`
/// rows; the second buffer starts at offset `width * height`.
#[derive(Clone, Debug)]
pub struct Framebuf {
    colors: Buf2<Pixel>,
    depth: Buf2<f32>,
    active: usize,
    height: usize,
}

impl Framebuf {
    /// Returns a framebuffer of `width` × `height` pixels, with both color
    /// buffers black and the depth buffer cleared.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            colors: Buf2::new_filled(width, 2 * height, [0; 4]),
            depth: Buf2::new_filled(width, height, 0.0),
            active: 0,
            height,
        }
    }

    /// Returns the width of `self` in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.depth.width()
    }
    /// Returns the height of `self` in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    /// Returns the index, 0 or 1, of the active color buffer.
    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Returns the active color buffer.
    pub fn color_buf(&self) -> Slice2<'_, Pixel> {
        let rows = self.active_rows();
        self.colors.band(rows)
    }
    /// Returns the active color buffer, mutably.
    pub fn color_buf_mut(&mut self) -> MutSlice2<'_, Pixel> {
        let rows = self.active_rows();
        self.colors.band_mut(rows)
    }
    /// Returns the depth buffer.
    pub fn depth_buf(&self) -> &Buf2<f32> {
        &self.depth
    }

    /// Fills the active color buffer with `color` and resets the depth
    /// buffer to 0.0, the reciprocal depth of a point infinitely far away.
    pub fn clear(&mut self, color: u32) {
        self.color_buf_mut().fill(color.to_ne_bytes());
        self.depth.fill(0.0);
    }

    /// Returns the packed color of the pixel at (x, y) in the active
    /// buffer, or `None` if (x, y) is out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.color_buf().get(x, y).copied().map(u32::from_ne_bytes)
    }

    /// Sets the pixel at (x, y) in the active buffer to `color`.
    /// Does nothing if (x, y) is out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(px) = self.color_buf_mut().get_mut(x, y) {
            *px = color.to_ne_bytes();
        }
    }

    /// Tests the reciprocal depth `inv_w` against the depth buffer at
    /// (x, y). If `inv_w` is greater or equal, that is, the fragment is
    /// at least as close as the stored one, stores it and returns `true`.
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    pub fn depth_test(&mut self, x: usize, y: usize, inv_w: f32) -> bool {
        let z = &mut self.depth[(x, y)];
        let pass = inv_w >= *z;
        if pass {
            *z = inv_w;
        }
        pass
    }

    /// Returns the contents of the active color buffer as bytes:
    /// `width * height` packed colors in native byte order, row by row.
    pub fn frame_bytes(&self) -> &[u8] {
        self.color_buf().data().as_flattened()
    }

    /// Makes the other color buffer active.
    pub fn flip(&mut self) {
        self.active ^= 1;
    }

    fn active_rows(&self) -> core::ops::Range<usize> {
        let start = self.active * self.height;
        start..start + self.height
    }
}
