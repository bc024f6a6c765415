//! Per-image token report

use serde::{Deserialize, Serialize};

use crate::{AlignedDimensions, ImageDimensions};

/// Special tokens a model places in the sequence for one image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub image_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_start_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_end_token: Option<String>,
}

impl TokenInfo {
    /// Number of start/end tokens wrapped around the image tokens
    pub fn wrapper_count(&self) -> u64 {
        u64::from(self.image_start_token.is_some()) + u64::from(self.image_end_token.is_some())
    }
}

/// Result of estimating one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenReport {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub original: ImageDimensions,
    pub aligned: AlignedDimensions,
    pub patches: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<u32>,
    pub image_tokens: u64,
    pub token_info: TokenInfo,
    pub total_tokens: u64,
}

impl TokenReport {
    pub fn new(
        model: String,
        original: ImageDimensions,
        aligned: AlignedDimensions,
        patches: u64,
        image_tokens: u64,
        token_info: TokenInfo,
    ) -> Self {
        let total_tokens = image_tokens + token_info.wrapper_count();
        Self {
            model,
            source: None,
            original,
            aligned,
            patches,
            tiles: None,
            image_tokens,
            token_info,
            total_tokens,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_tiles(mut self, tiles: u32) -> Self {
        self.tiles = Some(tiles);
        self
    }
}
