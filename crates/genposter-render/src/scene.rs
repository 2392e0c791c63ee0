//! Static 3D solids placed in the animated scene.

use genposter_core::{Axis, Rgb, Rgba, Vec3, WHITE, add, multiply_matrix_vector};

use crate::projection::rotation_matrix;

/// A planar loop of vertices.
pub type Face = Vec<Vec3>;

/// Y2K pink/magenta.
pub const CUBE_COLOR: Rgba = Rgba::new(0.9, 0.1, 0.5, 0.8);

/// A solid in the scene's render list.
///
/// Never mutated after construction: [`SceneObject::posed_faces`] returns
/// rotated copies.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub faces: Vec<Face>,
    /// Offset applied after rotation.
    pub position: Vec3,
    /// Degrees per frame.
    pub rotation_speed: f64,
    pub axis: Axis,
    pub color: Rgba,
    pub edge_color: Rgb,
    /// Edge width in points.
    pub edge_width_pt: f32,
}

impl SceneObject {
    /// Rotation angle at `frame`, in degrees.
    pub fn angle_deg(&self, frame: u32) -> f64 {
        frame as f64 * self.rotation_speed
    }

    /// Faces rotated for `frame` and moved to the object's position.
    pub fn posed_faces(&self, frame: u32) -> Vec<Face> {
        let rotation = rotation_matrix(self.angle_deg(frame).to_radians(), self.axis);
        self.faces
            .iter()
            .map(|face| {
                face.iter()
                    .map(|vertex| add(&multiply_matrix_vector(&rotation, vertex), &self.position))
                    .collect()
            })
            .collect()
    }
}

/// Cube centered at the origin as 6 quads: bottom, top, front, back, right, left.
pub fn cube(half_extent: f64) -> Vec<Face> {
    let v = half_extent;
    let vertices = [
        [-v, -v, -v],
        [v, -v, -v],
        [v, v, -v],
        [-v, v, -v],
        [-v, -v, v],
        [v, -v, v],
        [v, v, v],
        [-v, v, v],
    ];
    let faces: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [1, 2, 6, 5],
        [0, 3, 7, 4],
    ];
    faces
        .iter()
        .map(|face| face.iter().map(|&i| vertices[i]).collect())
        .collect()
}

/// The render list of the Y2K animation: one magenta cube at the origin.
pub fn default_scene() -> Vec<SceneObject> {
    vec![SceneObject {
        name: "cube".to_string(),
        faces: cube(1.0),
        position: [0.0, 0.0, 0.0],
        rotation_speed: 1.5,
        axis: Axis::Z,
        color: CUBE_COLOR,
        edge_color: WHITE,
        edge_width_pt: 1.5,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let h = 1.5;
        let faces = cube(h);
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|f| f.len() == 4));

        let mut distinct: Vec<Vec3> = Vec::new();
        for vertex in faces.iter().flatten() {
            assert!(vertex.iter().all(|c| c.abs() == h));
            if !distinct.contains(vertex) {
                distinct.push(*vertex);
            }
        }
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_cube_faces_are_planar() {
        for face in cube(1.0) {
            let shared_axis = (0..3).any(|axis| face.iter().all(|v| v[axis] == face[0][axis]));
            assert!(shared_axis, "{face:?}");
        }
    }

    #[test]
    fn test_frame_zero_is_unrotated() {
        let scene = default_scene();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene[0].angle_deg(0), 0.0);
        assert_eq!(scene[0].posed_faces(0), cube(1.0));
    }

    #[test]
    fn test_posed_faces_translate_and_rotate() {
        let mut object = default_scene().remove(0);
        object.position = [2.0, 0.0, -1.0];
        object.rotation_speed = 90.0;

        let posed = object.posed_faces(1);
        // Bottom face vertex (-1, -1, -1) rotates to (1, -1, -1) then moves.
        let v = posed[0][0];
        assert!((v[0] - 3.0).abs() < 1e-9);
        assert!((v[1] + 1.0).abs() < 1e-9);
        assert!((v[2] + 2.0).abs() < 1e-9);

        // The source faces are untouched.
        assert_eq!(object.faces, cube(1.0));
    }
}
