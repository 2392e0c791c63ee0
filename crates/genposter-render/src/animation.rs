//! GIF export of the Y2K animation.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Seek, Write},
    path::{Path, PathBuf},
};

use genposter_core::{Fps, FrameCount};
use image::{
    AnimationDecoder, Delay, Frame,
    codecs::gif::{GifDecoder, GifEncoder, Repeat},
};

use crate::{
    RenderError,
    frame::Stage,
    raster::{FRAME_SIZE, rasterize_frame, to_rgba_image},
};

/// File the export writes to, relative to the working directory.
pub const GIF_FILENAME: &str = "animated_poster.gif";

/// Name offered when the export is downloaded.
pub const DOWNLOAD_FILENAME: &str = "y2k_poster.gif";

pub const GIF_MIME: &str = "image/gif";

/// Quantizer speed, 1 (best) to 30 (fastest).
const ENCODE_SPEED: i32 = 10;

/// How many frames to render, how fast to play them and at what size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOptions {
    pub frames: u32,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
}

impl AnimationOptions {
    pub fn new(frames: FrameCount, fps: Fps) -> Self {
        Self {
            frames: frames.get(),
            fps: fps.get(),
            width: FRAME_SIZE.0,
            height: FRAME_SIZE.1,
        }
    }

    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Display time of one frame.
    pub fn delay(&self) -> Delay {
        Delay::from_numer_denom_ms(1000, self.fps)
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.frames == 0 {
            return Err(RenderError::NoFrames);
        }
        if self.fps == 0 {
            return Err(RenderError::ZeroFps);
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Canvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self::new(FrameCount::default(), Fps::default())
    }
}

/// Frames encoded so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u32,
    pub total: u32,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Render frames `0..options.frames` in order and encode them as a looping
/// GIF into `writer`.
///
/// `on_progress` runs after each frame is encoded. Nothing is written when
/// the options are invalid.
pub fn encode_gif<W: Write>(
    writer: W,
    stage: &Stage,
    options: &AnimationOptions,
    mut on_progress: impl FnMut(Progress),
) -> Result<(), RenderError> {
    options.validate()?;
    tracing::info!(
        frames = options.frames,
        fps = options.fps,
        width = options.width,
        height = options.height,
        "encoding animation"
    );

    let mut encoder = GifEncoder::new_with_speed(writer, ENCODE_SPEED);
    encoder.set_repeat(Repeat::Infinite)?;

    for index in 0..options.frames {
        let scene = stage.render(index);
        let pixmap = rasterize_frame(&scene, options.width, options.height)?;
        let frame = Frame::from_parts(to_rgba_image(&pixmap), 0, 0, options.delay());
        encoder.encode_frame(frame)?;
        tracing::trace!(frame = index, "encoded frame");
        on_progress(Progress {
            completed: index + 1,
            total: options.frames,
        });
    }

    tracing::info!(frames = options.frames, "animation encoded");
    Ok(())
}

/// [`encode_gif`] into the file at `path`.
///
/// Frames go to a `.part` file next to `path`, which replaces `path` only
/// once the GIF is complete. On failure any earlier file at `path` is left
/// as it was.
pub fn export_gif(
    path: &Path,
    stage: &Stage,
    options: &AnimationOptions,
    on_progress: impl FnMut(Progress),
) -> Result<(), RenderError> {
    options.validate()?;
    let partial = partial_path(path);
    if let Err(err) = write_gif(&partial, stage, options, on_progress) {
        if let Err(cleanup) = fs::remove_file(&partial) {
            tracing::warn!(path = %partial.display(), %cleanup, "failed to remove partial GIF");
        }
        return Err(err);
    }
    fs::rename(&partial, path)?;
    tracing::info!(path = %path.display(), "wrote animation");
    Ok(())
}

fn write_gif(
    path: &Path,
    stage: &Stage,
    options: &AnimationOptions,
    on_progress: impl FnMut(Progress),
) -> Result<(), RenderError> {
    let mut file = BufWriter::new(File::create(path)?);
    encode_gif(&mut file, stage, options, on_progress)?;
    file.flush()?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

/// Decode every frame of a GIF, each composited to the full canvas.
pub fn decode_gif<R: BufRead + Seek>(reader: R) -> Result<Vec<Frame>, RenderError> {
    Ok(GifDecoder::new(reader)?.into_frames().collect_frames()?)
}

/// [`decode_gif`] from a file.
pub fn read_gif(path: &Path) -> Result<Vec<Frame>, RenderError> {
    decode_gif(BufReader::new(File::open(path)?))
}
