//! Looping terminal playback of the exported animation.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use genposter_render::{
    RenderError,
    preview::{PreviewFrame, gif_preview},
};
use ratatui::text::Line;

/// Frames decoded from a GIF file and the clock that picks one.
#[derive(Debug)]
pub struct Playback {
    frames: Vec<PreviewFrame>,
    started: Instant,
}

impl Playback {
    /// Decode the GIF at `path`, scaled down to a `cols × rows` area.
    pub fn load(path: &Path, (cols, rows): (u16, u16)) -> Result<Self, RenderError> {
        let frames = gif_preview(path, cols, rows)?;
        tracing::debug!(path = %path.display(), frames = frames.len(), "loaded playback");
        Ok(Self {
            frames,
            started: Instant::now(),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame shown `elapsed` after playback started, following each frame's
    /// own delay and looping forever.
    pub fn index_at(&self, elapsed: Duration) -> usize {
        let cycle: Duration = self.frames.iter().map(|f| f.delay).sum();
        if cycle.is_zero() {
            return 0;
        }
        let mut offset = Duration::from_nanos((elapsed.as_nanos() % cycle.as_nanos()) as u64);
        for (index, frame) in self.frames.iter().enumerate() {
            if offset < frame.delay {
                return index;
            }
            offset -= frame.delay;
        }
        0
    }

    pub fn current_index(&self) -> usize {
        self.index_at(self.started.elapsed())
    }

    /// Lines of the frame due now.
    pub fn current(&self) -> &[Line<'static>] {
        self.frames
            .get(self.current_index())
            .map(|f| f.lines.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use genposter_render::{
        animation::{AnimationOptions, GIF_FILENAME, export_gif},
        frame::Stage,
    };

    use super::*;

    fn timed(delays_ms: &[u64]) -> Playback {
        Playback {
            frames: delays_ms
                .iter()
                .map(|&ms| PreviewFrame {
                    lines: Vec::new(),
                    delay: Duration::from_millis(ms),
                })
                .collect(),
            started: Instant::now(),
        }
    }

    #[test]
    fn test_plays_exported_gif() {
        let dir = std::env::temp_dir().join(format!("genposter-playback-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(GIF_FILENAME);
        let options = AnimationOptions {
            frames: 4,
            fps: 10,
            width: 24,
            height: 24,
        };
        export_gif(&path, &Stage::y2k(), &options, |_| {}).unwrap();

        let playback = Playback::load(&path, (8, 4)).unwrap();
        assert_eq!(playback.frame_count(), 4);
        let lines = playback.current();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].spans.len(), 8);
        // 100 ms per frame, as written to the file.
        assert_eq!(playback.index_at(Duration::from_millis(250)), 2);
        assert_eq!(playback.index_at(Duration::from_millis(410)), 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_index_follows_frame_delays_and_loops() {
        let playback = timed(&[100, 50, 200]);
        assert_eq!(playback.index_at(Duration::ZERO), 0);
        assert_eq!(playback.index_at(Duration::from_millis(99)), 0);
        assert_eq!(playback.index_at(Duration::from_millis(120)), 1);
        assert_eq!(playback.index_at(Duration::from_millis(150)), 2);
        assert_eq!(playback.index_at(Duration::from_millis(349)), 2);
        assert_eq!(playback.index_at(Duration::from_millis(350)), 0);
        assert_eq!(playback.index_at(Duration::from_millis(470)), 1);
    }

    #[test]
    fn test_without_delays_stays_on_first_frame() {
        assert_eq!(timed(&[]).index_at(Duration::from_secs(3)), 0);
        assert!(timed(&[]).current().is_empty());
        assert_eq!(timed(&[0, 0]).index_at(Duration::from_secs(3)), 0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("genposter-playback-missing.gif");
        assert!(matches!(Playback::load(&missing, (8, 4)), Err(RenderError::Io(_))));
    }
}
