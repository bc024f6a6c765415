use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported model: {model}. Supported models: {}", .supported.join(", "))]
    UnsupportedModel {
        model: String,
        supported: Vec<String>,
    },

    #[error("Failed to decode image {path}: {reason}")]
    ImageDecode { path: String, reason: String },

    #[error("Exactly one image source is required: {0}")]
    AmbiguousInput(String),

    #[error("Absolute aspect ratio must be smaller than {limit}, got {ratio:.2}")]
    AspectRatioTooLarge { ratio: f64, limit: f64 },

    #[error("No image files found in directory: {0}")]
    NoImagesFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Errors tied to a single input file; batch runs skip them instead of aborting
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Error::ImageDecode { .. } | Error::AspectRatioTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
