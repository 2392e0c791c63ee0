//! Configuration for the genposter app.
//!
//! The config file only supplies starting values for the sliders. It lives at
//! `<config dir>/genposter/config.toml`:
//!
//! ```toml
//! [poster]
//! layers = 12
//!
//! [animation]
//! frames = 100
//! fps = 24
//! ```
//!
//! Missing files and missing keys fall back to defaults. Values outside the
//! slider ranges are rejected.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use genposter_core::{Fps, FrameCount, LayerCount, RangeError};
use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value in {}: {source}", .path.display())]
    Range {
        path: PathBuf,
        #[source]
        source: RangeError,
    },
}

/// Raw file contents, before range validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    poster: PosterSection,
    animation: AnimationSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct PosterSection {
    layers: u32,
}

impl Default for PosterSection {
    fn default() -> Self {
        Self {
            layers: LayerCount::default().get(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct AnimationSection {
    frames: u32,
    fps: u32,
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            frames: FrameCount::default().get(),
            fps: Fps::default().get(),
        }
    }
}

/// Validated starting values for the sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub layers: LayerCount,
    pub frames: FrameCount,
    pub fps: Fps,
}

impl Config {
    /// Platform config file path, if a home directory can be determined.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "genposter").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform config file, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::parse(&contents, path)?;
        tracing::info!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse TOML text; `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        file.validate().map_err(|source| ConfigError::Range {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ConfigFile {
    fn validate(self) -> Result<Config, RangeError> {
        Ok(Config {
            layers: LayerCount::new(self.poster.layers)?,
            frames: FrameCount::new(self.animation.frames)?,
            fps: Fps::new(self.animation.fps)?,
        })
    }
}
