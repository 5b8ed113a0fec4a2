//! Core functionality of the `softfb` project.
//!
//! A fixed-function software rasterizer in the tradition of the classic
//! 3D pipelines: triangles go in as vertices with a position, color, texture
//! coordinate and normal, and come out as shaded, depth-tested pixels in a
//! double-buffered framebuffer. No graphics hardware is involved; finished
//! frames are handed to a [`Surface`][render::Surface] as raw bytes.
//!
//! The pipeline consists of
//! * a [transform stage][render::transform] taking vertices from model space
//!   to clip space and finally to screen space,
//! * accept/reject testing against the clip volume and backface culling,
//! * perspective-correct [scan conversion][render::raster] with depth testing,
//! * per-pixel diffuse [lighting][render::light], and
//! * nearest-neighbor [texture sampling][render::tex].
//!
//! All of it is driven through the [`Device`][render::Device] type.
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available items requiring floating-point functions not included
//!   in `core`, in particular the trigonometric functions needed by the
//!   rotation and perspective matrix builders. Enabled by default.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod error;
pub mod geom;
pub mod math;
pub mod render;
pub mod util;

pub use error::{Error, Result};

pub mod prelude {
    #[cfg(feature = "fp")]
    pub use crate::math::mat::{perspective, rotate};
    pub use crate::math::{
        color::{Color, rgb},
        lerp,
        mat::{Mat4, lookat, scale, translate},
        vec::{Vec4, pt4, vec4},
    };

    pub use crate::geom::{Vertex, vertex};

    pub use crate::render::{
        Device, Mode, Surface,
        surface::MemSurface,
        tex::{PixelFormat, TexCoord, uv},
    };

    pub use crate::util::{Dims, buf::Buf2};
}
