//! Rotation matrices and the scene camera.

use genposter_core::{Axis, Mat3, Vec3};

/// Rotation by `angle_rad` around `axis` (right-handed).
pub fn rotation_matrix(angle_rad: f64, axis: Axis) -> Mat3 {
    let (sin_a, cos_a) = angle_rad.sin_cos();
    match axis {
        Axis::X => [[1.0, 0.0, 0.0], [0.0, cos_a, -sin_a], [0.0, sin_a, cos_a]],
        Axis::Y => [[cos_a, 0.0, sin_a], [0.0, 1.0, 0.0], [-sin_a, 0.0, cos_a]],
        Axis::Z => [[cos_a, -sin_a, 0.0], [sin_a, cos_a, 0.0], [0.0, 0.0, 1.0]],
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Horizontal view coordinate, right is positive.
    pub x: f64,
    /// Vertical view coordinate, up is positive.
    pub y: f64,
    /// Distance towards the eye along the view axis. Larger is nearer.
    pub depth: f64,
}

/// Orbiting perspective camera looking at the origin with `z` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Angle above the `xy` plane, in degrees.
    pub elevation_deg: f64,
    /// Angle around the `z` axis from `+x`, in degrees.
    pub azimuth_deg: f64,
    /// Eye distance from the origin.
    pub distance: f64,
}

impl Camera {
    /// Closest the perspective divide is allowed to get to the eye plane.
    const NEAR: f64 = 1e-3;

    /// Project a point in normalized scene coordinates.
    pub fn project(&self, point: &Vec3) -> Projected {
        let (sin_el, cos_el) = self.elevation_deg.to_radians().sin_cos();
        let (sin_az, cos_az) = self.azimuth_deg.to_radians().sin_cos();

        let right = [-sin_az, cos_az, 0.0];
        let up = [-sin_el * cos_az, -sin_el * sin_az, cos_el];
        let forward = [cos_el * cos_az, cos_el * sin_az, sin_el];

        let x = dot(point, &right);
        let y = dot(point, &up);
        let depth = dot(point, &forward);
        let scale = self.distance / (self.distance - depth).max(Self::NEAR);

        Projected {
            x: x * scale,
            y: y * scale,
            depth,
        }
    }
}

fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use genposter_core::{IDENTITY, multiply_matrix_vector};

    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_zero_angle_is_identity() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(rotation_matrix(0.0, axis), IDENTITY);
        }
    }

    #[test]
    fn test_half_turn_about_vertical() {
        let m = rotation_matrix(PI, Axis::Z);
        assert_close(multiply_matrix_vector(&m, &[1.0, 0.0, 0.0]), [-1.0, 0.0, 0.0]);
        assert_close(multiply_matrix_vector(&m, &[0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_quarter_turns() {
        let v = multiply_matrix_vector(&rotation_matrix(FRAC_PI_2, Axis::Z), &[1.0, 0.0, 0.0]);
        assert_close(v, [0.0, 1.0, 0.0]);
        let v = multiply_matrix_vector(&rotation_matrix(FRAC_PI_2, Axis::X), &[0.0, 1.0, 0.0]);
        assert_close(v, [0.0, 0.0, 1.0]);
        let v = multiply_matrix_vector(&rotation_matrix(FRAC_PI_2, Axis::Y), &[0.0, 0.0, 1.0]);
        assert_close(v, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_camera_projection() {
        let camera = Camera {
            elevation_deg: 0.0,
            azimuth_deg: 0.0,
            distance: 8.0,
        };
        assert_eq!(
            camera.project(&[0.0, 0.0, 0.0]),
            Projected {
                x: 0.0,
                y: 0.0,
                depth: 0.0
            }
        );

        let side = camera.project(&[0.0, 1.0, 0.0]);
        assert!((side.x - 1.0).abs() < 1e-12 && side.y.abs() < 1e-12);

        let top = camera.project(&[0.0, 0.0, 1.0]);
        assert!(top.x.abs() < 1e-12 && (top.y - 1.0).abs() < 1e-12);

        // Nearer points project larger.
        let near = camera.project(&[1.0, 1.0, 0.0]);
        assert!(near.depth > 0.0 && near.x > 1.0);
    }

    #[test]
    fn test_elevated_camera_sees_z_up() {
        let camera = Camera {
            elevation_deg: 20.0,
            azimuth_deg: 30.0,
            distance: 8.0,
        };
        let high = camera.project(&[0.0, 0.0, 1.0]);
        let low = camera.project(&[0.0, 0.0, -1.0]);
        assert!(high.y > low.y);
    }
}
