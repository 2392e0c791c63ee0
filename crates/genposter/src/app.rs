use std::{path::PathBuf, time::Duration};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use genposter_config::Config;
use genposter_core::{Fps, FrameCount, LayerCount};
use genposter_render::{
    RenderError,
    animation::{AnimationOptions, GIF_FILENAME, GIF_MIME, Progress, export_gif},
    frame::Stage,
    poster::{self, Poster},
};
use ratatui::{DefaultTerminal, text::Line};

use crate::{download, playback::Playback, ui};

/// Preview area used before the first draw reports a real one.
const DEFAULT_PREVIEW_AREA: (u16, u16) = (48, 24);

/// The two demos, one per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Poster,
    Y2k,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Poster, Tab::Y2k];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Poster => "Poster",
            Tab::Y2k => "Y2K GIF",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Poster => 0,
            Tab::Y2k => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Poster => Tab::Y2k,
            Tab::Y2k => Tab::Poster,
        }
    }
}

/// Slider focused on the Y2K tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slider {
    #[default]
    Frames,
    Fps,
}

impl Slider {
    pub fn next(self) -> Self {
        match self {
            Slider::Frames => Slider::Fps,
            Slider::Fps => Slider::Frames,
        }
    }
}

/// Poster preview lines cached for one area size.
#[derive(Debug)]
pub struct PosterPreview {
    pub area: (u16, u16),
    pub lines: Vec<Line<'static>>,
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    pub tab: Tab,
    pub layers: LayerCount,
    pub frames: FrameCount,
    pub fps: Fps,
    pub slider: Slider,
    /// Current poster, `None` if composing failed.
    pub poster: Option<Poster>,
    pub poster_preview: Option<PosterPreview>,
    pub stage: Stage,
    /// Set while a GIF export is running.
    pub progress: Option<Progress>,
    pub playback: Option<Playback>,
    /// Last exported GIF.
    pub gif_path: Option<PathBuf>,
    /// Size of the Y2K preview area at the last draw.
    pub preview_area: (u16, u16),
    pub status: Option<String>,
    generate_requested: bool,
}

impl App {
    /// Construct a new instance of [`App`] starting from `config`'s slider values.
    pub fn new(config: Config) -> Self {
        let mut app = Self {
            running: false,
            tab: Tab::default(),
            layers: config.layers,
            frames: config.frames,
            fps: config.fps,
            slider: Slider::default(),
            poster: None,
            poster_preview: None,
            stage: Stage::y2k(),
            progress: None,
            playback: None,
            gif_path: None,
            preview_area: DEFAULT_PREVIEW_AREA,
            status: None,
            generate_requested: false,
        };
        app.refresh_poster();
        app
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| ui::render(&mut self, frame))?;
            self.handle_crossterm_events()?;
            if std::mem::take(&mut self.generate_requested) {
                self.generate_gif(&mut terminal);
            }
        }
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a short timeout so playback keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(40))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(_, _) => self.poster_preview = None,
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.tab = self.tab.next(),
            _ => match self.tab {
                Tab::Poster => self.on_poster_key(key.code),
                Tab::Y2k => self.on_y2k_key(key.code),
            },
        }
    }

    fn on_poster_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('-') => self.set_layers(self.layers.decrement()),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_layers(self.layers.increment())
            }
            KeyCode::Char('r') => self.refresh_poster(),
            _ => {}
        }
    }

    fn on_y2k_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Down => self.slider = self.slider.next(),
            KeyCode::Left | KeyCode::Char('-') => self.step_slider(false),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.step_slider(true),
            KeyCode::Char('g') => self.generate_requested = true,
            KeyCode::Char('d') => self.download_gif(),
            _ => {}
        }
    }

    /// Changing the layer count recomposes the poster, like moving a slider.
    fn set_layers(&mut self, layers: LayerCount) {
        if layers != self.layers {
            self.layers = layers;
            self.refresh_poster();
        }
    }

    fn step_slider(&mut self, up: bool) {
        match (self.slider, up) {
            (Slider::Frames, true) => self.frames = self.frames.increment(),
            (Slider::Frames, false) => self.frames = self.frames.decrement(),
            (Slider::Fps, true) => self.fps = self.fps.increment(),
            (Slider::Fps, false) => self.fps = self.fps.decrement(),
        }
    }

    /// Compose a fresh poster with a new random seed.
    fn refresh_poster(&mut self) {
        self.poster_preview = None;
        match poster::generate(self.layers) {
            Ok(poster) => self.poster = Some(poster),
            Err(err) => {
                tracing::error!(%err, "failed to compose poster");
                self.poster = None;
                self.status = Some(format!("Poster failed: {err}"));
            }
        }
    }

    /// Export the GIF, redrawing the progress gauge after every frame, then
    /// play the written file back. Failures are reported, not fatal.
    fn generate_gif(&mut self, terminal: &mut DefaultTerminal) {
        let options = self.start_export();
        let path = PathBuf::from(GIF_FILENAME);
        let stage = self.stage.clone();
        let result = export_gif(&path, &stage, &options, |progress| self.show_progress(terminal, progress));
        self.finish_export(path, result);
    }

    /// Forget the previous GIF and show an empty gauge.
    fn start_export(&mut self) -> AnimationOptions {
        let options = AnimationOptions::new(self.frames, self.fps);
        self.playback = None;
        self.gif_path = None;
        self.status = Some(format!("Rendering {} frames...", options.frames));
        self.progress = Some(Progress {
            completed: 0,
            total: options.frames,
        });
        options
    }

    fn finish_export(&mut self, path: PathBuf, result: Result<(), RenderError>) {
        self.progress = None;
        if let Err(err) = result {
            tracing::error!(%err, "GIF export failed");
            self.status = Some(format!("Export failed: {err}"));
            return;
        }

        self.status = Some(format!(
            "Saved {} ({:.1} s). Press d to download.",
            path.display(),
            self.frames.duration_secs(self.fps)
        ));
        match Playback::load(&path, self.preview_area) {
            Ok(playback) => self.playback = Some(playback),
            Err(err) => tracing::warn!(%err, "failed to load preview"),
        }
        self.gif_path = Some(path);
    }

    fn show_progress(&mut self, terminal: &mut DefaultTerminal, progress: Progress) {
        self.progress = Some(progress);
        if let Err(err) = terminal.draw(|frame| ui::render(self, frame)) {
            tracing::warn!(%err, "failed to draw progress");
        }
    }

    fn download_gif(&mut self) {
        let Some(source) = &self.gif_path else {
            self.status = Some("Nothing to download yet. Press g to generate.".to_string());
            return;
        };
        self.status = Some(match download::deliver(source, &download::download_dir()) {
            Ok(target) => format!("Downloaded {} ({GIF_MIME})", target.display()),
            Err(err) => {
                tracing::error!(%err, "download failed");
                format!("Download failed: {err}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
