//! Drawing of the two tabs.

use genposter_core::{Fps, FrameCount, LayerCount, PALETTE};
use genposter_fonts::build_text_art;
use genposter_render::{
    poster::Poster,
    preview::{fit, half_block_lines},
    raster::{POSTER_SIZE, rasterize_poster},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Tabs},
};

use crate::app::{App, PosterPreview, Slider, Tab};

const TITLE: &str = "GENPOSTER";
const SIDEBAR_WIDTH: u16 = 32;

fn accent() -> Color {
    PALETTE[3].to_terminal()
}

fn highlight() -> Color {
    PALETTE[1].to_terminal()
}

/// Renders the user interface.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let title_height = if area.height >= 24 { 8 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(title_height), // Title art
        Constraint::Length(1),            // Tabs
        Constraint::Fill(1),              // Body
        Constraint::Length(1),            // Status
        Constraint::Length(1),            // Help text
    ])
    .split(area);

    if title_height > 0 {
        let art: Vec<Line> = build_text_art(TITLE)
            .into_iter()
            .map(|s| Line::from(s).style(Style::new().fg(accent())))
            .collect();
        frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), chunks[0]);
    }

    let tabs = Tabs::new(Tab::ALL.map(Tab::title))
        .select(app.tab.index())
        .highlight_style(Style::new().fg(accent()).bold())
        .divider("│");
    frame.render_widget(tabs, chunks[1]);

    match app.tab {
        Tab::Poster => render_poster_tab(app, frame, chunks[2]),
        Tab::Y2k => render_y2k_tab(app, frame, chunks[2]),
    }

    if let Some(status) = &app.status {
        frame.render_widget(Line::from(status.as_str()).dark_gray().centered(), chunks[3]);
    }
    frame.render_widget(help_line(app.tab), chunks[4]);
}

fn help_line(tab: Tab) -> Line<'static> {
    let color = accent();
    let mut spans = vec!["q".bold().fg(color), " quit  ".dark_gray(), "tab".bold().fg(color), " switch  ".dark_gray()];
    match tab {
        Tab::Poster => spans.extend([
            "←/→".bold().fg(color),
            " layers  ".dark_gray(),
            "r".bold().fg(color),
            " re-roll".dark_gray(),
        ]),
        Tab::Y2k => spans.extend([
            "↑/↓".bold().fg(color),
            " select  ".dark_gray(),
            "←/→".bold().fg(color),
            " adjust  ".dark_gray(),
            "g".bold().fg(color),
            " generate  ".dark_gray(),
            "d".bold().fg(color),
            " download".dark_gray(),
        ]),
    }
    Line::from(spans).centered()
}

fn split_body(area: Rect) -> (Rect, Rect) {
    let [sidebar, preview] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)]).areas(area);
    (sidebar, preview)
}

/// A labelled slider: name, value and a bar showing its position in range.
fn slider_lines(name: &str, value: u32, min: u32, max: u32, selected: bool) -> Vec<Line<'static>> {
    let width = (SIDEBAR_WIDTH - 4) as usize;
    let filled = ((value - min) as usize * width) / (max - min).max(1) as usize;
    let marker = if selected { "▶ " } else { "  " };
    let color = if selected { accent() } else { highlight() };
    vec![
        Line::from(vec![
            Span::styled(marker.to_string(), Style::new().fg(accent())),
            Span::raw(format!("{name}: ")),
            Span::styled(value.to_string(), Style::new().fg(color).bold()),
            Span::raw(format!("  ({min}-{max})")).dark_gray(),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("━".repeat(filled), Style::new().fg(color)),
            Span::styled("─".repeat(width - filled), Style::new().fg(Color::DarkGray)),
        ]),
        Line::default(),
    ]
}

fn render_poster_tab(app: &mut App, frame: &mut Frame, area: Rect) {
    let (sidebar, preview) = split_body(area);

    let layers = app.layers;
    let mut lines = slider_lines(
        "Layers",
        layers.get(),
        LayerCount::MIN,
        LayerCount::MAX,
        true,
    );
    lines.push(Line::from("Each change draws a new poster.").dark_gray());
    let sidebar_widget = Paragraph::new(lines).block(Block::bordered().title(" Parameters "));
    frame.render_widget(sidebar_widget, sidebar);

    let block = Block::bordered().title(" Generative Poster ");
    let inner = block.inner(preview);
    frame.render_widget(block, preview);

    let Some(poster) = &app.poster else {
        frame.render_widget(Paragraph::new("No poster").alignment(Alignment::Center), inner);
        return;
    };
    let size = (inner.width, inner.height);
    let cached = app.poster_preview.as_ref().is_some_and(|p| p.area == size);
    if !cached {
        app.poster_preview = Some(PosterPreview {
            area: size,
            lines: poster_lines(poster, size),
        });
    }
    if let Some(preview) = &app.poster_preview {
        frame.render_widget(Paragraph::new(preview.lines.clone()).alignment(Alignment::Center), inner);
    }
}

fn poster_lines(poster: &Poster, (cols, rows): (u16, u16)) -> Vec<Line<'static>> {
    let aspect = POSTER_SIZE.0 as f64 / POSTER_SIZE.1 as f64;
    let (width, height) = fit(cols, rows, aspect);
    match rasterize_poster(poster, width, height) {
        Ok(pixmap) => half_block_lines(&pixmap),
        Err(err) => {
            tracing::debug!(%err, cols, rows, "poster preview skipped");
            Vec::new()
        }
    }
}

fn render_y2k_tab(app: &mut App, frame: &mut Frame, area: Rect) {
    let (sidebar, preview) = split_body(area);
    let [controls, gauge_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(sidebar);

    let mut lines = slider_lines(
        "Frames",
        app.frames.get(),
        FrameCount::MIN,
        FrameCount::MAX,
        app.slider == Slider::Frames,
    );
    lines.extend(slider_lines(
        "FPS",
        app.fps.get(),
        Fps::MIN,
        Fps::MAX,
        app.slider == Slider::Fps,
    ));
    lines.push(Line::from(vec![
        Span::raw("GIF length: "),
        Span::styled(
            format!("{:.1} s", app.frames.duration_secs(app.fps)),
            Style::new().fg(highlight()).bold(),
        ),
    ]));
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Parameters ")),
        controls,
    );

    if let Some(progress) = app.progress {
        let gauge = Gauge::default()
            .block(Block::bordered().title(" Rendering "))
            .gauge_style(Style::new().fg(accent()))
            .ratio(progress.fraction().clamp(0.0, 1.0))
            .label(format!("{}/{} frames", progress.completed, progress.total));
        frame.render_widget(gauge, gauge_area);
    }

    let block = Block::bordered().title(" Y2K Animation ");
    let inner = block.inner(preview);
    frame.render_widget(block, preview);
    // One row stays free for the frame caption.
    app.preview_area = (inner.width, inner.height.saturating_sub(1));

    match &app.playback {
        Some(playback) => {
            let [view, caption] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
            frame.render_widget(
                Paragraph::new(playback.current().to_vec()).alignment(Alignment::Center),
                view,
            );
            let position = format!("frame {}/{}", playback.current_index() + 1, playback.frame_count());
            frame.render_widget(Line::from(position).dark_gray().centered(), caption);
        }
        None if app.progress.is_some() => {}
        None => {
            let hint = Paragraph::new(vec![
                Line::default(),
                Line::from("Rotating cube, noise surface and lost text."),
                Line::from(vec!["Press ".into(), "g".bold().fg(accent()), " to generate the GIF.".into()]),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
        }
    }
}
