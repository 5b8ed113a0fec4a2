//! Frontends for displaying the output of a `softfb` device.
//!
//! A frontend provides a [`Surface`][softfb_core::render::Surface] that a
//! [`Device`] can present finished frames to, and a main loop that drives
//! the device once per frame.

use std::time::Duration;

use softfb_core::render::Device;

#[cfg(feature = "minifb")]
pub mod minifb;

/// Common display resolutions.
pub mod dims {
    use softfb_core::util::Dims;

    pub const VGA_640_480: Dims = Dims(640, 480);
    pub const SVGA_800_600: Dims = Dims(800, 600);
    pub const XGA_1024_768: Dims = Dims(1024, 768);
}

/// Per-frame state. The window run method passes an instance of `Frame`
/// to the callback function on every iteration of the main loop.
pub struct Frame<'a, S> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// The device in which to draw. Its active color buffer has been
    /// cleared, and is presented after the callback returns.
    pub dev: &'a mut Device<S>,
}
