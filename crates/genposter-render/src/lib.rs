//! Rendering for the genposter demos.
//!
//! Two pipelines share this crate:
//!
//! * the blob poster: [`poster::compose`] layers randomly wobbled
//!   [`blob::Blob`]s into a [`poster::Poster`], which
//!   [`raster::rasterize_poster`] turns into pixels;
//! * the Y2K animation: a [`frame::Stage`] (grid, noise surface and scene
//!   objects) renders each frame index into a [`frame::FrameScene`] of draw
//!   commands from scratch, and [`animation::encode_gif`] rasterizes and
//!   encodes the frames in order.
//!
//! Both end as a [`tiny_skia::Pixmap`], which [`preview`] can show in a
//! terminal.

pub mod animation;
pub mod blob;
mod colormap;
mod error;
pub mod frame;
pub mod poster;
pub mod preview;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod surface;

pub use error::RenderError;
