//! Noise-displaced height field over a fixed grid.

use noise::{NoiseFn, OpenSimplex};

/// Regular 2D sample mesh. Row `i` runs along `y`, column `j` along `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    /// `resolution × resolution` samples evenly spaced over `[min, max]`
    /// (endpoints included) in both axes.
    pub fn new(resolution: usize, min: f64, max: f64) -> Self {
        let axis = linspace(min, max, resolution);
        Self {
            xs: axis.clone(),
            ys: axis,
        }
    }

    /// 50×50 samples over `[-4, 4]²`.
    pub fn y2k() -> Self {
        Self::new(50, -4.0, 4.0)
    }

    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() || self.ys.is_empty()
    }

    /// `(x, y)` of the sample at `row`, `col`.
    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        (self.xs[col], self.ys[row])
    }
}

fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            (0..n).map(|i| min + step * i as f64).collect()
        }
    }
}

/// Heights sampled on a [`Grid`], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    rows: usize,
    cols: usize,
    heights: Vec<f64>,
}

impl HeightField {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.heights[row * self.cols + col]
    }

    pub fn values(&self) -> &[f64] {
        &self.heights
    }

    /// Lowest and highest height, `None` when empty.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.heights.iter().fold(None, |acc, &h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    /// Largest per-cell difference to another field of the same shape.
    pub fn max_abs_diff(&self, other: &HeightField) -> f64 {
        self.heights
            .iter()
            .zip(&other.heights)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

/// Coherent noise evaluated at `(x * scale, y * scale, frame * time_scale)`.
///
/// The third input is time-like, so consecutive frames change smoothly and
/// neighbouring cells stay correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSurface {
    seed: u32,
}

impl NoiseSurface {
    pub const SEED: u32 = 0;
    pub const SPATIAL_SCALE: f64 = 0.3;
    pub const TIME_SCALE: f64 = 0.05;
    pub const AMPLITUDE: f64 = 2.0;

    pub fn new() -> Self {
        Self { seed: Self::SEED }
    }

    /// Height at one point for `frame`.
    pub fn height(&self, x: f64, y: f64, frame: u32) -> f64 {
        sample(&OpenSimplex::new(self.seed), x, y, frame)
    }

    /// Full height field for `frame`, recomputed from scratch.
    pub fn heights(&self, grid: &Grid, frame: u32) -> HeightField {
        let noise = OpenSimplex::new(self.seed);
        let mut heights = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let (x, y) = grid.point(row, col);
                heights.push(sample(&noise, x, y, frame));
            }
        }
        HeightField {
            rows: grid.rows(),
            cols: grid.cols(),
            heights,
        }
    }
}

impl Default for NoiseSurface {
    fn default() -> Self {
        Self::new()
    }
}

fn sample(noise: &OpenSimplex, x: f64, y: f64, frame: u32) -> f64 {
    noise.get([
        x * NoiseSurface::SPATIAL_SCALE,
        y * NoiseSurface::SPATIAL_SCALE,
        frame as f64 * NoiseSurface::TIME_SCALE,
    ]) * NoiseSurface::AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let grid = Grid::y2k();
        assert_eq!((grid.rows(), grid.cols()), (50, 50));
        assert_eq!(grid.point(0, 0), (-4.0, -4.0));
        let (x, y) = grid.point(49, 49);
        assert!((x - 4.0).abs() < 1e-12 && (y - 4.0).abs() < 1e-12);
        let (x, y) = grid.point(0, 1);
        assert!((x - (-4.0 + 8.0 / 49.0)).abs() < 1e-12);
        assert_eq!(y, -4.0);
    }

    #[test]
    fn test_degenerate_grids() {
        let empty = Grid::new(0, -1.0, 1.0);
        assert!(empty.is_empty());
        let field = NoiseSurface::new().heights(&empty, 3);
        assert!(field.values().is_empty());
        assert_eq!(field.range(), None);

        let single = Grid::new(1, 2.0, 5.0);
        assert_eq!(single.point(0, 0), (2.0, 2.0));
    }

    #[test]
    fn test_heights_deterministic() {
        let grid = Grid::y2k();
        let surface = NoiseSurface::new();
        assert_eq!(surface.heights(&grid, 17), surface.heights(&grid, 17));
        assert_eq!(
            NoiseSurface::new().heights(&grid, 17),
            NoiseSurface::default().heights(&grid, 17)
        );
    }

    #[test]
    fn test_consecutive_frames_change_smoothly() {
        let grid = Grid::y2k();
        let surface = NoiseSurface::new();
        for frame in [0, 1, 40, 199] {
            let a = surface.heights(&grid, frame);
            let b = surface.heights(&grid, frame + 1);
            assert!(a.max_abs_diff(&b) < 1.0, "frame {frame}");
        }
    }

    #[test]
    fn test_single_point_matches_field() {
        let grid = Grid::new(4, -1.0, 1.0);
        let surface = NoiseSurface::new();
        let field = surface.heights(&grid, 5);
        let (x, y) = grid.point(2, 3);
        assert_eq!(field.get(2, 3), surface.height(x, y, 5));
    }

    #[test]
    fn test_surface_varies_over_time_and_space() {
        let grid = Grid::y2k();
        let surface = NoiseSurface::new();
        let (lo, hi) = surface.heights(&grid, 0).range().unwrap();
        assert!(hi > lo);
        assert!(surface.heights(&grid, 0).max_abs_diff(&surface.heights(&grid, 60)) > 0.0);
    }
}
