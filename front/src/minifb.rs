//! Frontend using the `minifb` crate for window creation and event handling.

use std::{
    ops::ControlFlow::{self, Break},
    time::Instant,
};

use log::info;
use minifb::{Key, WindowOptions};

use softfb_core::{
    Error, Result,
    render::{Device, Surface},
    util::Dims,
};

use crate::{Frame, dims::SVGA_800_600};

/// A lightweight wrapper of a `minifb` window.
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: Dims,
    // Frame converted to the pixel format minifb expects.
    pixels: Vec<u32>,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: SVGA_800_600,
            title: "// softfb application //",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate (the main loop runs as fast as possible).
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }
    /// Sets other `minifb` options.
    pub fn options(mut self, opts: WindowOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Creates the window.
    pub fn build(self) -> minifb::Result<Window> {
        let Self { dims, title, target_fps, opts } = self;
        let mut imp =
            minifb::Window::new(title, dims.0 as usize, dims.1 as usize, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps as usize);
        }
        info!("opened {}x{} window \"{title}\"", dims.0, dims.1);
        let pixels = Vec::with_capacity(dims.area());
        Ok(Window { imp, dims, pixels })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Returns whether the window is still open and Esc has not been
    /// pressed.
    pub fn is_open(&self) -> bool {
        self.imp.is_open() && !self.imp.is_key_down(Key::Escape)
    }

    /// Runs the main loop of the program, invoking the callback on each
    /// iteration to draw the next frame into `dev`.
    ///
    /// The main loop stops and this function returns if:
    /// * the user closes the window via the GUI (e.g. titlebar close button);
    /// * the Esc key is pressed; or
    /// * the callback returns `ControlFlow::Break`.
    ///
    /// # Errors
    /// If presenting a frame fails.
    pub fn run<F>(dev: &mut Device<Self>, mut frame_fn: F) -> Result<()>
    where
        F: FnMut(&mut Frame<Self>) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let mut last = Instant::now();
        while dev.surface().is_some_and(Self::is_open) {
            dev.clear();
            let frame = &mut Frame {
                t: start.elapsed(),
                dt: last.elapsed(),
                dev: &mut *dev,
            };
            last = Instant::now();
            if let Break(_) = frame_fn(frame) {
                break;
            }
            dev.present()?;
        }
        info!("\n{}", dev.stats());
        Ok(())
    }
}

impl Surface for Window {
    fn dims(&self) -> Dims {
        self.dims
    }

    /// Updates the window content with the pixels in `frame`.
    fn publish(&mut self, frame: &[u8]) -> Result<()> {
        let Dims(w, h) = self.dims;
        self.pixels.clear();
        self.pixels.extend(
            frame
                .chunks_exact(4)
                .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]])),
        );
        self.imp
            .update_with_buffer(&self.pixels, w as usize, h as usize)
            .map_err(|e| Error::Surface(e.to_string()))
    }
}
