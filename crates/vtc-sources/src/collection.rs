use std::path::{Path, PathBuf};

use tracing::debug;
use vtc_core::{Error, Result};

use crate::source::SourceOptions;

pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// List image files in `dir`, sorted by path.
///
/// Only immediate children are listed unless `options.recursive` is set.
pub fn list_images(dir: &Path, options: &SourceOptions) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::Other(anyhow::anyhow!(
            "Directory does not exist: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();

    if options.recursive {
        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if entry.file_type().is_file() && is_image_file(entry.path(), &options.extensions) {
                files.push(entry.into_path());
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && is_image_file(&path, &options.extensions) {
                files.push(path);
            }
        }
    }

    // Sort for determinism
    files.sort();

    debug!(dir = %dir.display(), count = files.len(), "listed image files");
    Ok(files)
}

/// Whether `path` has one of `extensions` (case-insensitive)
pub fn is_image_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}
