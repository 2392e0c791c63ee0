//! Per-frame draw commands for the Y2K animation.
//!
//! Every frame is rebuilt from nothing: [`Stage::render`] is a pure function
//! of the stage and the frame index, so frames can be rendered in any order
//! and the same index always yields the same [`FrameScene`].

use genposter_core::{Rgb, Rgba, Vec3};

use crate::{
    projection::Camera,
    scene::{Face, SceneObject, default_scene},
    surface::{Grid, HeightField, NoiseSurface},
};

pub const ELEVATION_DEG: f64 = 20.0;
pub const AZIMUTH_DEG_PER_FRAME: f64 = 0.5;
/// Eye distance in normalized scene units.
pub const CAMERA_DISTANCE: f64 = 8.0;
pub const SURFACE_ALPHA: f32 = 0.6;

/// Visible data range per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

pub const LIMITS: Limits = Limits {
    x: (-4.0, 4.0),
    y: (-4.0, 4.0),
    z: (-5.0, 5.0),
};

impl Limits {
    /// Map a data point into the `[-1, 1]³` view box.
    pub fn normalize(&self, point: &Vec3) -> Vec3 {
        [
            normalize_axis(point[0], self.x),
            normalize_axis(point[1], self.y),
            normalize_axis(point[2], self.z),
        ]
    }
}

fn normalize_axis(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let half = (hi - lo) / 2.0;
    if half.abs() < f64::EPSILON {
        0.0
    } else {
        (value - (lo + hi) / 2.0) / half
    }
}

/// Text fixed in the scene whose in-plane rotation advances every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneText {
    pub text: String,
    pub anchor: Vec3,
    pub color: Rgb,
    pub size_pt: f32,
    pub bold: bool,
    /// Degrees per frame; negative turns clockwise.
    pub rotation_speed: f64,
}

impl SceneText {
    /// The lime "lost" label, counter-rotating against the cube.
    pub fn lost() -> Self {
        Self {
            text: "lost".to_string(),
            anchor: [0.0, 0.0, 0.5],
            color: Rgb::new(0.0, 1.0, 0.0),
            size_pt: 24.0,
            bold: true,
            rotation_speed: -1.0,
        }
    }
}

/// Fixed inputs of the animation, built once and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub grid: Grid,
    pub noise: NoiseSurface,
    pub objects: Vec<SceneObject>,
    pub text: SceneText,
}

impl Stage {
    pub fn new(grid: Grid, objects: Vec<SceneObject>) -> Self {
        Self {
            grid,
            noise: NoiseSurface::new(),
            objects,
            text: SceneText::lost(),
        }
    }

    /// Default grid with the magenta cube and "lost" label.
    pub fn y2k() -> Self {
        Self::new(Grid::y2k(), default_scene())
    }

    /// Draw commands for `frame`.
    pub fn render(&self, frame: u32) -> FrameScene<'_> {
        let camera = Camera {
            elevation_deg: ELEVATION_DEG,
            azimuth_deg: frame as f64 * AZIMUTH_DEG_PER_FRAME,
            distance: CAMERA_DISTANCE,
        };

        let solids = self
            .objects
            .iter()
            .map(|object| SolidDraw {
                name: object.name.clone(),
                faces: object.posed_faces(frame),
                face_color: object.color,
                edge_color: object.edge_color,
                edge_width_pt: object.edge_width_pt,
            })
            .collect();

        let text = TextDraw {
            text: self.text.text.clone(),
            anchor: self.text.anchor,
            color: self.text.color,
            size_pt: self.text.size_pt,
            bold: self.text.bold,
            rotation_deg: frame as f64 * self.text.rotation_speed,
        };

        FrameScene {
            frame,
            camera,
            limits: LIMITS,
            grid: &self.grid,
            surface: self.noise.heights(&self.grid, frame),
            surface_alpha: SURFACE_ALPHA,
            solids,
            text,
        }
    }
}

/// A solid posed for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidDraw {
    pub name: String,
    pub faces: Vec<Face>,
    pub face_color: Rgba,
    pub edge_color: Rgb,
    pub edge_width_pt: f32,
}

/// Text posed for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub anchor: Vec3,
    pub color: Rgb,
    pub size_pt: f32,
    pub bold: bool,
    /// Counter-clockwise in-plane rotation in degrees.
    pub rotation_deg: f64,
}

/// Everything needed to draw one frame. Axes are never drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScene<'a> {
    pub frame: u32,
    pub camera: Camera,
    pub limits: Limits,
    pub grid: &'a Grid,
    pub surface: HeightField,
    pub surface_alpha: f32,
    pub solids: Vec<SolidDraw>,
    pub text: TextDraw,
}
