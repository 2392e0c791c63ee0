use std::io;

use genposter_core::GeometryError;
use thiserror::Error;

/// Errors produced while composing, rasterizing or encoding.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("a poster holds at most {max} layers, got {requested}")]
    TooManyLayers { requested: u32, max: u32 },
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error("an animation needs at least one frame")]
    NoFrames,
    #[error("animation fps must be positive")]
    ZeroFps,
    #[error("failed to encode GIF: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
