//! Display surfaces: where finished frames go.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::util::Dims;

/// A sink for finished frames, such as a window, a memory-mapped display
/// device, or an image file.
pub trait Surface {
    /// Returns the resolution of `self` in pixels.
    fn dims(&self) -> Dims;

    /// Displays `frame`, which holds `width * height` pixels packed as
    /// `0x00RRGGBB` words in native byte order, in row-major order.
    ///
    /// `frame` is only borrowed for the duration of the call.
    fn publish(&mut self, frame: &[u8]) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn dims(&self) -> Dims {
        (**self).dims()
    }
    fn publish(&mut self, frame: &[u8]) -> Result<()> {
        (**self).publish(frame)
    }
}

/// A surface that keeps a copy of the most recently published frame
/// in memory.
#[derive(Clone, Debug, Default)]
pub struct MemSurface {
    dims: Dims,
    frame: Vec<u8>,
    published: usize,
    fail: bool,
}

impl MemSurface {
    /// Returns a new surface of `width` × `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dims: Dims(width, height),
            frame: Vec::new(),
            published: 0,
            fail: false,
        }
    }

    /// Returns the most recently published frame, or an empty slice
    /// if nothing has been published yet.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Returns the number of frames successfully published so far.
    pub fn published(&self) -> usize {
        self.published
    }

    /// Returns the packed color of the pixel at (x, y) in the most
    /// recently published frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.dims.0 || y >= self.dims.1 {
            return None;
        }
        let i = 4 * (y as usize * self.dims.0 as usize + x as usize);
        let px = self.frame.get(i..i + 4)?;
        Some(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]))
    }

    /// Makes subsequent publish calls fail if `fail` is `true`.
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }
}

impl Surface for MemSurface {
    fn dims(&self) -> Dims {
        self.dims
    }

    fn publish(&mut self, frame: &[u8]) -> Result<()> {
        if self.fail {
            return Err(Error::Surface("surface unavailable".into()));
        }
        let expected = 4 * self.dims.area();
        if frame.len() != expected {
            return Err(Error::Surface(alloc::format!(
                "expected {expected} bytes, got {}",
                frame.len()
            )));
        }
        self.frame.clear();
        self.frame.extend_from_slice(frame);
        self.published += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_keeps_last_frame() {
        let mut s = MemSurface::new(2, 1);
        assert_eq!(s.pixel(0, 0), None);

        let mut frame = [0u8; 8];
        frame[4..].copy_from_slice(&0xAB_CD_EF_u32.to_ne_bytes());
        s.publish(&frame).unwrap();

        assert_eq!(s.published(), 1);
        assert_eq!(s.pixel(0, 0), Some(0));
        assert_eq!(s.pixel(1, 0), Some(0xAB_CD_EF));
        assert_eq!(s.pixel(2, 0), None);
    }

    #[test]
    fn publish_wrong_size_fails() {
        let mut s = MemSurface::new(2, 2);
        assert!(s.publish(&[0; 4]).is_err());
        assert_eq!(s.published(), 0);
    }

    #[test]
    fn failing_surface() {
        let mut s = MemSurface::new(1, 1);
        s.set_failing(true);
        assert_eq!(
            s.publish(&[0; 4]),
            Err(Error::Surface("surface unavailable".into()))
        );
        s.set_failing(false);
        assert_eq!(s.publish(&[0; 4]), Ok(()));
    }

    #[test]
    fn mut_ref_is_a_surface() {
        fn publish_via(mut s: impl Surface) -> Result<()> {
            s.publish(&[0; 4])
        }
        let mut s = MemSurface::new(1, 1);
        publish_via(&mut s).unwrap();
        assert_eq!(s.published(), 1);
    }
}
