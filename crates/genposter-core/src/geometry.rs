//! Minimal 3D vector and matrix helpers.

use std::{fmt, str::FromStr};

use crate::error::GeometryError;

/// A point or direction in 3D space.
pub type Vec3 = [f64; 3];

/// A row-major 3x3 matrix.
pub type Mat3 = [[f64; 3]; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Rotation axis.
///
/// `Z` is the vertical axis of the 3D scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" | "vertical" => Ok(Axis::Z),
            _ => Err(GeometryError::UnsupportedAxis(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_vector() {
        let v = [1.5, -2.0, 3.25];
        assert_eq!(multiply_matrix_vector(&IDENTITY, &v), v);
    }

    #[test]
    fn test_add_sub() {
        let a = [1.0, 2.0, 3.0];
        let b = [0.5, -1.0, 2.0];
        assert_eq!(add(&a, &b), [1.5, 1.0, 5.0]);
        assert_eq!(sub(&add(&a, &b), &b), a);
    }

    #[test]
    fn test_parse_axis() {
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
        assert_eq!("Vertical".parse::<Axis>(), Ok(Axis::Z));
        assert_eq!(" x ".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(
            "w".parse::<Axis>(),
            Err(GeometryError::UnsupportedAxis("w".to_string()))
        );
    }
}
