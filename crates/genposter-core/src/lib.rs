//! Core types shared by the genposter crates.
//!
//! Colors and the poster palette, the small linear algebra used by the 3D
//! scene, the bounded parameters exposed to the user interface, and the
//! error types produced when any of them are given invalid values.

mod bounds;
mod color;
mod error;
mod geometry;

pub use bounds::{Fps, FrameCount, LayerCount};
pub use color::{BLACK, PALETTE, Rgb, Rgba, WHITE};
pub use error::{GeometryError, RangeError};
pub use geometry::{Axis, IDENTITY, Mat3, Vec3, add, multiply_matrix_vector, sub};
