//! Wobbly closed outlines.

use std::f64::consts::TAU;

use genposter_core::GeometryError;
use rand::Rng;

/// Outline resolution used by the poster.
pub const DEFAULT_POINTS: usize = 50;

/// A randomly perturbed closed polygon approximating a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    center: [f64; 2],
    radius: f64,
    wobble: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Blob {
    /// Generate a blob around `center`.
    ///
    /// Angles are spaced evenly over a full turn. Each point's radius is
    /// `radius * (1 + wobble * (u - 0.5))` for an independent `u` in `[0, 1)`,
    /// so every point lies within `radius * (1 ± wobble / 2)` of the center.
    pub fn generate<R: Rng>(
        rng: &mut R,
        center: [f64; 2],
        radius: f64,
        points: usize,
        wobble: f64,
    ) -> Result<Self, GeometryError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        if points < 3 {
            return Err(GeometryError::TooFewPoints(points));
        }
        if !(0.0..1.0).contains(&wobble) {
            return Err(GeometryError::InvalidWobble(wobble));
        }

        let (xs, ys) = (0..points)
            .map(|i| {
                let angle = TAU * i as f64 / points as f64;
                let r = radius * (1.0 + wobble * (rng.r#gen::<f64>() - 0.5));
                (center[0] + r * angle.cos(), center[1] + r * angle.sin())
            })
            .unzip();

        Ok(Self {
            center,
            radius,
            wobble,
            xs,
            ys,
        })
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn wobble(&self) -> f64 {
        self.wobble
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of outline points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Outline points in order. The outline closes back to the first point.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}
