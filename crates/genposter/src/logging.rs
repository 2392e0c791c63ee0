//! Log file setup. The terminal belongs to the UI, so logs go to a file.

use std::{
    fs::{self, File},
    path::PathBuf,
    sync::Mutex,
};

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "genposter.log";

/// Install the global subscriber, appending to `genposter.log` in the
/// platform cache directory. `RUST_LOG` overrides the default `info` level.
///
/// Returns the log path, or `None` when no cache directory is available and
/// logging stays off.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dirs) = ProjectDirs::from("", "", "genposter") else {
        return Ok(None);
    };
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::options().create(true).append(true).open(&path)?;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(rust_log.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(Some(path))
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| "info".into())
}
