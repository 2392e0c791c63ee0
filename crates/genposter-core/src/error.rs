//! Error types for invalid geometry and out-of-range parameters.

use thiserror::Error;

/// Rejected geometry input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Blob radius was zero, negative, or not finite.
    #[error("blob radius must be a positive finite number, got {0}")]
    InvalidRadius(f64),
    /// A closed outline needs at least three points.
    #[error("blob needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    /// Wobble outside `[0, 1)` can fold the outline over itself.
    #[error("blob wobble must be in [0, 1), got {0}")]
    InvalidWobble(f64),
    /// Axis name that does not name a rotation axis.
    #[error("unsupported rotation axis {0:?} (expected x, y, z or vertical)")]
    UnsupportedAxis(String),
}

/// A bounded parameter was given a value outside its range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} must be between {min} and {max}, got {value}")]
pub struct RangeError {
    pub name: &'static str,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}
