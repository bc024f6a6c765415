//! Image source selection

use std::path::PathBuf;

use vtc_core::{Error, ImageDimensions, Result};

use crate::collection::DEFAULT_EXTENSIONS;

/// Options for directory scanning
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Accepted file extensions, compared case-insensitively
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
        }
    }
}

/// Where the images to estimate come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A single image file
    File(PathBuf),
    /// Every image file in a directory
    Directory(PathBuf),
    /// A blank canvas of the given size; only its dimensions matter
    Blank(ImageDimensions),
}

impl ImageSource {
    /// Pick the source from the `--image` / `--size` arguments.
    ///
    /// Exactly one of them must be present. An image path that names a
    /// directory selects directory mode.
    pub fn resolve(image: Option<&str>, size: Option<&[String]>) -> Result<Self> {
        match (image, size) {
            (Some(_), Some(_)) => Err(Error::AmbiguousInput(
                "--image and --size cannot be used together".to_string(),
            )),
            (None, None) => Err(Error::AmbiguousInput(
                "provide either --image <PATH> or --size <WIDTH> <HEIGHT>".to_string(),
            )),
            (None, Some(size)) => Ok(ImageSource::Blank(ImageDimensions::parse_pair(size)?)),
            (Some(path), None) => {
                let path = PathBuf::from(path);
                if path.is_dir() {
                    Ok(ImageSource::Directory(path))
                } else {
                    Ok(ImageSource::File(path))
                }
            }
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> String {
        match self {
            ImageSource::File(path) | ImageSource::Directory(path) => path.display().to_string(),
            ImageSource::Blank(dims) => format!("Dummy image ({})", dims),
        }
    }
}
