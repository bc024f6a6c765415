//! Vision token estimation for a resolved model

use tracing::debug;
use vtc_core::{AlignedDimensions, ImageDimensions, Result, TokenReport};

use crate::models::{Layout, ModelConfig, resolve_model};
use crate::resize::align;

/// Estimates image tokens for one model without running it
#[derive(Debug, Clone)]
pub struct VisionTokenEstimator {
    model: String,
    config: ModelConfig,
}

impl VisionTokenEstimator {
    /// Resolve `model` (alias or repository id) and build an estimator for it
    pub fn new(model: &str) -> Result<Self> {
        Ok(Self::with_config(model, resolve_model(model)?))
    }

    /// Use an explicit configuration, e.g. one with overridden pixel bounds
    pub fn with_config(model: impl Into<String>, config: ModelConfig) -> Self {
        Self {
            model: model.into(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Align `dims` and count the resulting tokens
    pub fn estimate(&self, dims: ImageDimensions) -> Result<TokenReport> {
        let aligned = align(dims, &self.config)?;
        let tokens = token_count(aligned, &self.config);
        let patches = patch_count(aligned, &self.config);

        debug!(
            model = %self.model,
            original = %dims,
            aligned = %aligned,
            tokens,
            "estimated image tokens"
        );

        let report = TokenReport::new(
            self.model.clone(),
            dims,
            aligned,
            patches,
            tokens,
            self.config.token_info(),
        );

        Ok(match self.config.layout {
            Layout::Tiled { tile_size, .. } => {
                report.with_tiles(tile_count(aligned, tile_size) as u32)
            }
            _ => report,
        })
    }
}

/// Image tokens for an aligned resolution.
///
/// One token per `unit x unit` block; tiled layouts add a thumbnail tile when
/// more than one tile is used. Clamped to the family's token bounds, if any.
pub fn token_count(aligned: AlignedDimensions, config: &ModelConfig) -> u64 {
    let unit = u64::from(config.unit());
    let grid_tokens = (u64::from(aligned.width) / unit) * (u64::from(aligned.height) / unit);

    let tokens = match config.layout {
        Layout::Tiled {
            tile_size,
            thumbnail,
            ..
        } if thumbnail && tile_count(aligned, tile_size) > 1 => {
            let per_tile = u64::from(tile_size) / unit;
            grid_tokens + per_tile * per_tile
        }
        _ => grid_tokens,
    };

    match config.token_bounds {
        Some((min_tokens, max_tokens)) => tokens.clamp(min_tokens, max_tokens),
        None => tokens,
    }
}

/// Vision encoder patches before merging, thumbnail included
pub fn patch_count(aligned: AlignedDimensions, config: &ModelConfig) -> u64 {
    let patch = u64::from(config.patch_size);
    let grid_patches = (u64::from(aligned.width) / patch) * (u64::from(aligned.height) / patch);

    match config.layout {
        Layout::Tiled {
            tile_size,
            thumbnail,
            ..
        } if thumbnail && tile_count(aligned, tile_size) > 1 => {
            let per_tile = u64::from(tile_size) / patch;
            grid_patches + per_tile * per_tile
        }
        _ => grid_patches,
    }
}

fn tile_count(aligned: AlignedDimensions, tile_size: u32) -> u64 {
    u64::from(aligned.width / tile_size) * u64::from(aligned.height / tile_size)
}
