//! Pixel dimensions before and after alignment

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Width and height of a source image in pixels (both positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Validate a raw (width, height) pair
    pub fn new(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions(format!(
                "width and height must be positive, got {} x {}",
                width, height
            )));
        }

        let width = u32::try_from(width)
            .map_err(|_| Error::InvalidDimensions(format!("width {} is too large", width)))?;
        let height = u32::try_from(height)
            .map_err(|_| Error::InvalidDimensions(format!("height {} is too large", height)))?;

        Ok(Self { width, height })
    }

    /// Parse a `WIDTH HEIGHT` pair as given on the command line
    pub fn parse_pair(values: &[String]) -> Result<Self> {
        let [width, height] = values else {
            return Err(Error::InvalidDimensions(format!(
                "expected WIDTH and HEIGHT, got {} value(s)",
                values.len()
            )));
        };

        let parse = |label: &str, raw: &str| {
            raw.trim().parse::<i64>().map_err(|_| {
                Error::InvalidDimensions(format!("{} must be an integer, got '{}'", label, raw))
            })
        };

        Self::new(parse("width", width)?, parse("height", height)?)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Dimensions after the model's resize and grid alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignedDimensions {
    pub width: u32,
    pub height: u32,
}

impl AlignedDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for AlignedDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}
