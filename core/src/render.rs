//! Turning 3D geometry into raster images.
//!
//! This module constitutes the fixed-function rendering pipeline of
//! `softfb`. It contains code for [transforming][transform] vertices,
//! [rasterizing][raster] triangles and lines, [lighting][light] and
//! [texturing][tex] fragments, and [storing][target] and
//! [presenting][surface] the result. The [`Device`] type ties all of
//! these together behind a stateful drawing API.

pub use ctx::{Context, Filter, Mode};
pub use device::Device;
pub use stats::{Stats, Throughput};
pub use surface::Surface;
pub use transform::{ClipTest, Transform};

pub mod ctx;
pub mod device;
pub mod light;
pub mod raster;
pub mod stats;
pub mod surface;
pub mod target;
pub mod tex;
pub mod transform;
