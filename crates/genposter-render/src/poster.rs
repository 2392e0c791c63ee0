//! Blob poster composition.
//!
//! A poster is pure data: background, layered blobs and two labels on a
//! canvas spanning `[0, 1]` in both axes. [`crate::raster::rasterize_poster`]
//! draws it.

use std::ops::RangeInclusive;

use genposter_core::{BLACK, LayerCount, PALETTE, Rgb};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    RenderError,
    blob::{Blob, DEFAULT_POINTS},
};

/// Near-white poster background.
pub const BACKGROUND: Rgb = Rgb::new(0.98, 0.98, 0.97);

/// Most layers a single poster accepts.
pub const MAX_LAYERS: u32 = LayerCount::MAX;

pub const RADIUS_RANGE: RangeInclusive<f64> = 0.1..=0.4;
pub const WOBBLE_RANGE: RangeInclusive<f64> = 0.1..=0.4;
pub const ALPHA_RANGE: RangeInclusive<f32> = 0.6..=0.9;

/// Stroke drawn around every blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Rgb,
    /// Line width in points.
    pub width_pt: f32,
}

pub const OUTLINE: Outline = Outline {
    color: BLACK,
    width_pt: 0.5,
};

/// Text placed in canvas coordinates, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
    pub size_pt: f32,
    pub bold: bool,
}

pub const LABELS: [Label; 2] = [
    Label {
        text: "Generative Poster [Variation]",
        x: 0.05,
        y: 0.95,
        size_pt: 18.0,
        bold: true,
    },
    Label {
        text: "Practice • Changing Parameters",
        x: 0.05,
        y: 0.91,
        size_pt: 11.0,
        bold: false,
    },
];

/// One blob with its fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub blob: Blob,
    pub color: Rgb,
    pub alpha: f32,
}

/// A composed poster, bottom layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct Poster {
    pub background: Rgb,
    pub layers: Vec<Layer>,
    pub outline: Outline,
    pub labels: [Label; 2],
}

/// Compose a poster with `layers` blobs drawn from `rng`.
///
/// Zero layers is valid and leaves only the background and labels.
pub fn compose<R: Rng>(rng: &mut R, layers: u32) -> Result<Poster, RenderError> {
    if layers > MAX_LAYERS {
        return Err(RenderError::TooManyLayers {
            requested: layers,
            max: MAX_LAYERS,
        });
    }

    let layers = (0..layers)
        .map(|_| -> Result<Layer, RenderError> {
            let center = [rng.r#gen::<f64>(), rng.r#gen::<f64>()];
            let radius = rng.gen_range(RADIUS_RANGE);
            let wobble = rng.gen_range(WOBBLE_RANGE);
            let blob = Blob::generate(&mut *rng, center, radius, DEFAULT_POINTS, wobble)?;
            let color = PALETTE[rng.gen_range(0..PALETTE.len())];
            let alpha = rng.gen_range(ALPHA_RANGE);
            Ok(Layer { blob, color, alpha })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(layers = layers.len(), "composed poster");

    Ok(Poster {
        background: BACKGROUND,
        layers,
        outline: OUTLINE,
        labels: LABELS,
    })
}

/// Compose a fresh poster seeded from system entropy.
///
/// Every call gives a different poster; use [`compose`] with a seeded
/// generator for reproducible output.
pub fn generate(layers: LayerCount) -> Result<Poster, RenderError> {
    let mut rng = StdRng::from_entropy();
    compose(&mut rng, layers.get())
}
