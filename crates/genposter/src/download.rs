//! Delivery of the exported GIF as a download.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::UserDirs;
use genposter_render::animation::DOWNLOAD_FILENAME;

/// The user's download directory, or the working directory when the platform
/// has none.
pub fn download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Copy `source` into `dir` as [`DOWNLOAD_FILENAME`], replacing any earlier
/// download.
pub fn deliver(source: &Path, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(DOWNLOAD_FILENAME);
    fs::copy(source, &target)?;
    tracing::info!(from = %source.display(), to = %target.display(), "delivered download");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deliver_copies_under_download_name() {
        let root = std::env::temp_dir().join(format!("genposter-download-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        let source = root.join("animated_poster.gif");
        fs::write(&source, b"GIF89a-test").unwrap();

        let dir = root.join("downloads");
        let target = deliver(&source, &dir).unwrap();
        assert_eq!(target, dir.join("y2k_poster.gif"));
        assert_eq!(fs::read(&target).unwrap(), b"GIF89a-test");

        // A second delivery overwrites the first.
        fs::write(&source, b"GIF89a-again").unwrap();
        deliver(&source, &dir).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"GIF89a-again");

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = std::env::temp_dir().join(format!("genposter-missing-{}", std::process::id()));
        let err = deliver(&dir.join("nope.gif"), &dir).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        fs::remove_dir_all(&dir).unwrap();
    }
}
