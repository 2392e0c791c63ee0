//! Terminal preview of rendered pixmaps.
//!
//! Each terminal cell shows two vertically stacked pixels as an upper half
//! block: the foreground paints the top pixel, the background the bottom one.

use std::{path::Path, time::Duration};

use image::RgbaImage;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::{RenderError, animation::read_gif};

const UPPER_HALF: &str = "▀";

/// Pixmap size that fills at most `cols × rows` cells while keeping
/// `aspect` (width / height). Each cell holds one pixel across and two down.
pub fn fit(cols: u16, rows: u16, aspect: f64) -> (u32, u32) {
    let max_w = cols as f64;
    let max_h = rows as f64 * 2.0;
    if max_w < 1.0 || max_h < 1.0 || !aspect.is_finite() || aspect <= 0.0 {
        return (0, 0);
    }
    let (w, h) = if max_w / max_h > aspect {
        (max_h * aspect, max_h)
    } else {
        (max_w, max_w / aspect)
    };
    ((w.floor() as u32).max(1), (h.floor() as u32).max(1))
}

/// One [`Line`] per pair of pixel rows. An odd last row is paired with the
/// terminal's default background.
pub fn half_block_lines(pixmap: &Pixmap) -> Vec<Line<'static>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    (0..height)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span> = (0..width)
                .map(|x| {
                    let mut style = Style::default().fg(pixel_color(pixmap, x, y).unwrap_or(Color::Reset));
                    if let Some(bottom) = pixel_color(pixmap, x, y + 1) {
                        style = style.bg(bottom);
                    }
                    Span::styled(UPPER_HALF, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// One frame of a decoded GIF, ready for the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub lines: Vec<Line<'static>>,
    pub delay: Duration,
}

/// Read the GIF at `path` and shrink every frame to fit `cols × rows` cells,
/// keeping each frame's delay from the file.
pub fn gif_preview(path: &Path, cols: u16, rows: u16) -> Result<Vec<PreviewFrame>, RenderError> {
    read_gif(path)?
        .iter()
        .map(|frame| {
            let image = frame.buffer();
            let aspect = image.width() as f64 / image.height().max(1) as f64;
            let (width, height) = fit(cols, rows, aspect);
            let pixmap = scale_image(image, width, height)?;
            Ok(PreviewFrame {
                lines: half_block_lines(&pixmap),
                delay: Duration::from(frame.delay()),
            })
        })
        .collect()
}

/// Resample `image` to `width × height` with bilinear filtering.
pub fn scale_image(image: &RgbaImage, width: u32, height: u32) -> Result<Pixmap, RenderError> {
    let mut source = new_pixmap(image.width(), image.height())?;
    for (dst, src) in source.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let mut target = new_pixmap(width, height)?;
    let scale = Transform::from_scale(
        width as f32 / image.width() as f32,
        height as f32 / image.height() as f32,
    );
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(0, 0, source.as_ref(), &paint, scale, None);
    Ok(target)
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })
}

fn pixel_color(pixmap: &Pixmap, x: u32, y: u32) -> Option<Color> {
    pixmap.pixel(x, y).map(|p| {
        let c = p.demultiply();
        Color::Rgb(c.red(), c.green(), c.blue())
    })
}

#[cfg(test)]
mod tests {
    use tiny_skia::{Color as SkColor, Paint, Rect};

    use super::*;
    use crate::{
        animation::{AnimationOptions, GIF_FILENAME, export_gif},
        frame::Stage,
    };

    #[test]
    fn test_fit_keeps_aspect() {
        // 7:10 poster in an 80x24 terminal is height-bound.
        assert_eq!(fit(80, 24, 0.7), (33, 48));
        // Square frame in a short wide area.
        assert_eq!(fit(40, 10, 1.0), (20, 20));
        // Narrow area is width-bound.
        assert_eq!(fit(10, 40, 1.0), (10, 10));
        assert_eq!(fit(0, 10, 1.0), (0, 0));
        assert_eq!(fit(10, 10, 0.0), (0, 0));
    }

    #[test]
    fn test_half_blocks_pair_rows() {
        let mut pixmap = Pixmap::new(2, 3).unwrap();
        pixmap.fill(SkColor::from_rgba8(255, 0, 0, 255));
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 255, 255);
        paint.anti_alias = false;
        pixmap.fill_rect(Rect::from_xywh(0.0, 1.0, 2.0, 1.0).unwrap(), &paint, Transform::identity(), None);

        let lines = half_block_lines(&pixmap);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);

        let top = lines[0].spans[0].style;
        assert_eq!(top.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(top.bg, Some(Color::Rgb(0, 0, 255)));

        let last = lines[1].spans[1].style;
        assert_eq!(last.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(last.bg, None);
        assert_eq!(lines[1].spans[1].content, UPPER_HALF);
    }

    #[test]
    fn test_scale_image_keeps_solid_color() {
        let image = RgbaImage::from_pixel(8, 6, image::Rgba([200, 40, 10, 255]));
        let pixmap = scale_image(&image, 4, 3).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (4, 3));
        let c = pixmap.pixel(1, 1).unwrap().demultiply();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (200, 40, 10, 255));

        assert!(matches!(
            scale_image(&image, 0, 3),
            Err(RenderError::Canvas { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_gif_preview_plays_exported_file() {
        let dir = std::env::temp_dir().join(format!("genposter-preview-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(GIF_FILENAME);
        let options = AnimationOptions {
            frames: 3,
            fps: 20,
            width: 32,
            height: 32,
        };
        export_gif(&path, &Stage::y2k(), &options, |_| {}).unwrap();

        let frames = gif_preview(&path, 8, 4).unwrap();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.lines.len(), 4);
            assert_eq!(frame.lines[0].spans.len(), 8);
            assert_eq!(frame.delay, Duration::from_millis(50));
        }

        // A truncated file is reported instead of previewed.
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        assert!(gif_preview(&path, 8, 4).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
