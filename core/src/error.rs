//! Error types.

use alloc::string::String;

/// Errors produced by the rendering device and its collaborators.
///
/// None of these is fatal to a device that has already been created;
/// a failed call leaves the device in the state it was in before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A device or buffer was requested with a zero width or height.
    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    /// A texture upload named a pixel format code that is not recognized.
    #[error("unsupported pixel format {0:#x}")]
    UnsupportedFormat(u32),

    /// A texture upload had a zero width or height.
    #[error("texture has no texels")]
    EmptyTexture,

    /// A texture upload had fewer source bytes than its dimensions require.
    #[error("texture data too short: expected {expected} bytes, got {actual}")]
    TextureData { expected: usize, actual: usize },

    /// The display surface failed to publish a frame.
    #[error("surface error: {0}")]
    Surface(String),
}

/// Convenience alias.
pub type Result<T> = core::result::Result<T, Error>;
