//! Software rasterization of posters and animation frames.

use genposter_core::{BLACK, Rgba, Vec3, WHITE};
use genposter_fonts::{GLYPH_HEIGHT, filled_cells, text_width};
use image::RgbaImage;
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::{
    RenderError,
    colormap::{calculate_normal, shade, viridis},
    frame::FrameScene,
    poster::Poster,
};

/// Poster pixel size: a 7×10 inch figure at 100 dpi.
pub const POSTER_SIZE: (u32, u32) = (700, 1000);

/// Frame pixel size: a 7×7 inch figure at 100 dpi.
pub const FRAME_SIZE: (u32, u32) = (700, 700);

/// Figure heights in points, used to scale line widths and text.
const POSTER_HEIGHT_PT: f32 = 720.0;
const FRAME_HEIGHT_PT: f32 = 504.0;

/// Cap height as a fraction of the font size.
const CAP_HEIGHT: f32 = 0.72;

/// Extra width of a bold glyph cell.
const BOLD_WIDEN: f32 = 1.4;

/// Pixels per normalized scene unit, as a fraction of the shorter side.
const VIEW_SCALE: f32 = 0.3;

/// Draw a poster into a new `width × height` pixmap.
///
/// The poster canvas `[0, 1]²` fills the pixmap with `y` pointing up.
pub fn rasterize_poster(poster: &Poster, width: u32, height: u32) -> Result<Pixmap, RenderError> {
    let mut pixmap = new_pixmap(width, height)?;
    pixmap.fill(color(poster.background.with_alpha(1.0)));

    let (w, h) = (width as f32, height as f32);
    let px_per_pt = h / POSTER_HEIGHT_PT;
    let stroke = Stroke {
        width: poster.outline.width_pt * px_per_pt,
        ..Stroke::default()
    };

    for layer in &poster.layers {
        let points = layer
            .blob
            .points()
            .map(|(x, y)| (x as f32 * w, (1.0 - y as f32) * h));
        let Some(path) = polygon_path(points) else {
            continue;
        };
        pixmap.fill_path(
            &path,
            &paint(layer.color.with_alpha(layer.alpha)),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        pixmap.stroke_path(
            &path,
            &paint(poster.outline.color.with_alpha(layer.alpha)),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    for label in &poster.labels {
        let cell = cell_size(label.size_pt, px_per_pt);
        let top = (1.0 - label.y as f32) * h - GLYPH_HEIGHT as f32 * cell;
        let transform = Transform::from_translate(label.x as f32 * w, top);
        draw_text(&mut pixmap, label.text, cell, BLACK.with_alpha(1.0), label.bold, transform);
    }

    Ok(pixmap)
}

/// A filled polygon waiting for painter's-order drawing.
struct Polygon {
    points: Vec<(f32, f32)>,
    depth: f64,
    fill: Rgba,
    edge: Option<(Rgba, f32)>,
}

/// Maps scene points to pixels.
struct View<'s, 'a> {
    scene: &'s FrameScene<'a>,
    center: (f32, f32),
    scale: f32,
}

impl View<'_, '_> {
    fn project(&self, point: &Vec3) -> ((f32, f32), f64) {
        let projected = self.scene.camera.project(&self.scene.limits.normalize(point));
        let x = self.center.0 + projected.x as f32 * self.scale;
        let y = self.center.1 - projected.y as f32 * self.scale;
        ((x, y), projected.depth)
    }

    fn polygon(&self, vertices: &[Vec3], fill: Rgba, edge: Option<(Rgba, f32)>) -> Polygon {
        let (points, depths): (Vec<_>, Vec<_>) = vertices.iter().map(|v| self.project(v)).unzip();
        let depth = depths.iter().sum::<f64>() / depths.len().max(1) as f64;
        Polygon {
            points,
            depth,
            fill,
            edge,
        }
    }
}

/// Draw one animation frame into a new `width × height` pixmap.
///
/// Surface cells and solid faces are sorted together back to front; the
/// text goes on top.
pub fn rasterize_frame(scene: &FrameScene<'_>, width: u32, height: u32) -> Result<Pixmap, RenderError> {
    let mut pixmap = new_pixmap(width, height)?;
    pixmap.fill(color(WHITE.with_alpha(1.0)));

    let (w, h) = (width as f32, height as f32);
    let px_per_pt = h / FRAME_HEIGHT_PT;
    let view = View {
        scene,
        center: (w / 2.0, h / 2.0),
        scale: w.min(h) * VIEW_SCALE,
    };

    let mut polygons = surface_polygons(&view);
    for solid in &scene.solids {
        let edge_color = solid.edge_color.with_alpha(solid.face_color.a);
        let edge = Some((edge_color, solid.edge_width_pt * px_per_pt));
        polygons.extend(
            solid
                .faces
                .iter()
                .map(|face| view.polygon(face, solid.face_color, edge)),
        );
    }
    polygons.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    for polygon in &polygons {
        let Some(path) = polygon_path(polygon.points.iter().copied()) else {
            continue;
        };
        pixmap.fill_path(
            &path,
            &paint(polygon.fill),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        if let Some((edge_color, edge_width)) = polygon.edge {
            let stroke = Stroke {
                width: edge_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint(edge_color), &stroke, Transform::identity(), None);
        }
    }

    let text = &scene.text;
    let cell = cell_size(text.size_pt, px_per_pt);
    let ((x, y), _) = view.project(&text.anchor);
    let half_w = text_width(&text.text) as f32 * cell / 2.0;
    let half_h = GLYPH_HEIGHT as f32 * cell / 2.0;
    let transform = Transform::from_translate(x, y)
        .pre_rotate(-text.rotation_deg as f32)
        .pre_translate(-half_w, -half_h);
    draw_text(&mut pixmap, &text.text, cell, text.color.with_alpha(1.0), text.bold, transform);

    Ok(pixmap)
}

fn surface_polygons(view: &View<'_, '_>) -> Vec<Polygon> {
    let scene = view.scene;
    let (grid, field) = (scene.grid, &scene.surface);
    if grid.rows() < 2 || grid.cols() < 2 || field.rows() != grid.rows() || field.cols() != grid.cols() {
        return Vec::new();
    }
    let Some((lo, hi)) = field.range() else {
        return Vec::new();
    };
    let span = hi - lo;

    let vertex = |row: usize, col: usize| -> Vec3 {
        let (x, y) = grid.point(row, col);
        [x, y, field.get(row, col)]
    };

    let mut polygons = Vec::with_capacity((grid.rows() - 1) * (grid.cols() - 1));
    for row in 0..grid.rows() - 1 {
        for col in 0..grid.cols() - 1 {
            let quad = [
                vertex(row, col),
                vertex(row, col + 1),
                vertex(row + 1, col + 1),
                vertex(row + 1, col),
            ];
            let mean = quad.iter().map(|v| v[2]).sum::<f64>() / 4.0;
            let t = if span > f64::EPSILON { (mean - lo) / span } else { 0.5 };
            let normal = calculate_normal(&quad[0], &quad[1], &quad[2]);
            let fill = shade(viridis(t), normal).with_alpha(scene.surface_alpha);
            polygons.push(view.polygon(&quad, fill, None));
        }
    }
    polygons
}

/// Convert to a straight-alpha RGBA image.
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

/// Straight-alpha color of one pixel, `None` outside the pixmap.
pub fn pixel_rgba(pixmap: &Pixmap, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
    pixmap.pixel(x, y).map(|p| {
        let c = p.demultiply();
        (c.red(), c.green(), c.blue(), c.alpha())
    })
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })
}

fn cell_size(size_pt: f32, px_per_pt: f32) -> f32 {
    size_pt * px_per_pt * CAP_HEIGHT / GLYPH_HEIGHT as f32
}

fn draw_text(pixmap: &mut Pixmap, text: &str, cell: f32, fill: Rgba, bold: bool, transform: Transform) {
    let cell_w = if bold { cell * BOLD_WIDEN } else { cell };
    let mut builder = PathBuilder::new();
    for (col, row) in filled_cells(text) {
        if let Some(rect) = Rect::from_xywh(col as f32 * cell, row as f32 * cell, cell_w, cell) {
            builder.push_rect(rect);
        }
    }
    if let Some(path) = builder.finish() {
        pixmap.fill_path(&path, &paint(fill), FillRule::Winding, transform, None);
    }
}

fn polygon_path(points: impl IntoIterator<Item = (f32, f32)>) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i == 0 {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }
    builder.close();
    builder.finish()
}

fn paint(fill: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(fill));
    paint.anti_alias = true;
    paint
}

fn color(c: Rgba) -> Color {
    let (r, g, b, a) = c.to_u8();
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        frame::Stage,
        poster::{BACKGROUND, compose},
        surface::Grid,
    };

    fn background_u8() -> (u8, u8, u8, u8) {
        let (r, g, b) = BACKGROUND.to_u8();
        (r, g, b, 255)
    }

    #[test]
    fn test_blank_poster_has_background_and_labels() {
        let poster = compose(&mut StdRng::seed_from_u64(1), 0).unwrap();
        let pixmap = rasterize_poster(&poster, POSTER_SIZE.0, POSTER_SIZE.1).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), POSTER_SIZE);
        assert_eq!(pixel_rgba(&pixmap, 650, 900), Some(background_u8()));
        assert_eq!(pixel_rgba(&pixmap, 0, 999), Some(background_u8()));

        // The title sits just below the top edge, starting at x = 35.
        let dark_in_title = (25..50)
            .flat_map(|y| (35..300).map(move |x| (x, y)))
            .filter_map(|(x, y)| pixel_rgba(&pixmap, x, y))
            .any(|(r, g, b, _)| r < 100 && g < 100 && b < 100);
        assert!(dark_in_title);

        // Nothing but background below the labels.
        let below_labels = (200..1000)
            .step_by(37)
            .flat_map(|y| (0..700).step_by(23).map(move |x| (x, y)))
            .filter_map(|(x, y)| pixel_rgba(&pixmap, x, y))
            .all(|p| p == background_u8());
        assert!(below_labels);
    }

    #[test]
    fn test_layers_paint_over_background() {
        let poster = compose(&mut StdRng::seed_from_u64(5), 30).unwrap();
        let pixmap = rasterize_poster(&poster, 70, 100).unwrap();
        let image = to_rgba_image(&pixmap);
        let (r, g, b) = BACKGROUND.to_u8();
        let covered = image.pixels().filter(|p| p.0 != [r, g, b, 255]).count();
        assert!(covered > 70 * 100 / 4);
    }

    #[test]
    fn test_zero_size_rejected() {
        let poster = compose(&mut StdRng::seed_from_u64(5), 1).unwrap();
        assert!(matches!(
            rasterize_poster(&poster, 0, 10),
            Err(RenderError::Canvas { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_frame_draws_scene_in_center() {
        let stage = Stage::y2k();
        let pixmap = rasterize_frame(&stage.render(0), 64, 64).unwrap();
        assert_eq!(pixel_rgba(&pixmap, 0, 0), Some((255, 255, 255, 255)));
        assert_ne!(pixel_rgba(&pixmap, 32, 32), Some((255, 255, 255, 255)));
    }

    #[test]
    fn test_frame_without_objects_or_grid() {
        let stage = Stage::new(Grid::new(0, -4.0, 4.0), Vec::new());
        let pixmap = rasterize_frame(&stage.render(3), 32, 32).unwrap();
        assert_eq!(pixel_rgba(&pixmap, 1, 1), Some((255, 255, 255, 255)));
        assert_eq!(pixel_rgba(&pixmap, 31, 31), Some((255, 255, 255, 255)));
    }

    #[test]
    fn test_rgba_image_matches_pixmap() {
        let stage = Stage::y2k();
        let pixmap = rasterize_frame(&stage.render(10), 24, 24).unwrap();
        let image = to_rgba_image(&pixmap);
        assert_eq!(image.dimensions(), (24, 24));
        let (r, g, b, a) = pixel_rgba(&pixmap, 12, 12).unwrap();
        assert_eq!(image.get_pixel(12, 12).0, [r, g, b, a]);
    }
}
