//! Supported model families and identifier resolution

use serde::Serialize;
use tracing::debug;
use vtc_core::{Error, Result, TokenInfo};

/// Model used when neither the command line nor the config names one
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-VL-7B-Instruct";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    Qwen2Vl,
    Qwen25Vl,
    Gemma3,
    InternVl3,
    Llava,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 5] = [
        ModelFamily::Qwen2Vl,
        ModelFamily::Qwen25Vl,
        ModelFamily::Gemma3,
        ModelFamily::InternVl3,
        ModelFamily::Llava,
    ];

    /// Short name accepted on the command line
    pub fn alias(self) -> &'static str {
        match self {
            ModelFamily::Qwen2Vl => "qwen2-vl",
            ModelFamily::Qwen25Vl => "qwen2.5-vl",
            ModelFamily::Gemma3 => "gemma3",
            ModelFamily::InternVl3 => "internvl3",
            ModelFamily::Llava => "llava",
        }
    }

    /// Repository id prefixes that belong to this family
    pub fn repo_prefixes(self) -> &'static [&'static str] {
        match self {
            ModelFamily::Qwen2Vl => &["Qwen/Qwen2-VL-"],
            ModelFamily::Qwen25Vl => &["Qwen/Qwen2.5-VL-"],
            // gemma-3-1b is text only
            ModelFamily::Gemma3 => &[
                "google/gemma-3-4b",
                "google/gemma-3-12b",
                "google/gemma-3-27b",
            ],
            ModelFamily::InternVl3 => &["OpenGVLab/InternVL3-"],
            ModelFamily::Llava => &["llava-hf/llava-1.5-"],
        }
    }

    /// A representative repository id, used for listings
    pub fn reference_repo(self) -> &'static str {
        match self {
            ModelFamily::Qwen2Vl => "Qwen/Qwen2-VL-7B-Instruct",
            ModelFamily::Qwen25Vl => "Qwen/Qwen2.5-VL-7B-Instruct",
            ModelFamily::Gemma3 => "google/gemma-3-4b-it",
            ModelFamily::InternVl3 => "OpenGVLab/InternVL3-1B-hf",
            ModelFamily::Llava => "llava-hf/llava-1.5-7b-hf",
        }
    }

    pub fn config(self) -> ModelConfig {
        match self {
            ModelFamily::Qwen2Vl | ModelFamily::Qwen25Vl => ModelConfig {
                family: self,
                patch_size: 14,
                merge_size: 2,
                min_pixels: 56 * 56,
                max_pixels: 28 * 28 * 16_384,
                token_bounds: Some((4, 16_384)),
                layout: Layout::SmartResize,
                image_token: "<|image_pad|>",
                image_start_token: Some("<|vision_start|>"),
                image_end_token: Some("<|vision_end|>"),
            },
            // SigLIP at 896px, 64x64 patches average-pooled 4x4 into 256 soft tokens
            ModelFamily::Gemma3 => ModelConfig {
                family: self,
                patch_size: 14,
                merge_size: 4,
                min_pixels: 896 * 896,
                max_pixels: 896 * 896,
                token_bounds: Some((256, 256)),
                layout: Layout::Fixed {
                    width: 896,
                    height: 896,
                },
                image_token: "<image_soft_token>",
                image_start_token: Some("<start_of_image>"),
                image_end_token: Some("<end_of_image>"),
            },
            // pixel shuffle with ratio 0.5 merges 2x2 patches
            ModelFamily::InternVl3 => ModelConfig {
                family: self,
                patch_size: 14,
                merge_size: 2,
                min_pixels: 448 * 448,
                max_pixels: 12 * 448 * 448,
                token_bounds: None,
                layout: Layout::Tiled {
                    tile_size: 448,
                    min_tiles: 1,
                    max_tiles: 12,
                    thumbnail: true,
                },
                image_token: "<IMG_CONTEXT>",
                image_start_token: Some("<img>"),
                image_end_token: Some("</img>"),
            },
            ModelFamily::Llava => ModelConfig {
                family: self,
                patch_size: 14,
                merge_size: 1,
                min_pixels: 336 * 336,
                max_pixels: 336 * 336,
                token_bounds: Some((576, 576)),
                layout: Layout::Fixed {
                    width: 336,
                    height: 336,
                },
                image_token: "<image>",
                image_start_token: None,
                image_end_token: None,
            },
        }
    }

    fn matches(self, identifier: &str) -> bool {
        identifier == self.alias()
            || self
                .repo_prefixes()
                .iter()
                .any(|prefix| identifier.starts_with(prefix))
    }
}

/// How a family turns an arbitrary image into its input resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layout {
    /// Keep aspect ratio, snap to the patch-merge grid, fit the pixel bounds
    SmartResize,
    /// Always resized to one resolution
    Fixed { width: u32, height: u32 },
    /// Split into square tiles on the grid closest to the image aspect ratio
    Tiled {
        tile_size: u32,
        min_tiles: u32,
        max_tiles: u32,
        thumbnail: bool,
    },
}

/// Patch and merge constants for one model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    pub family: ModelFamily,
    pub patch_size: u32,
    pub merge_size: u32,
    pub min_pixels: u64,
    pub max_pixels: u64,
    /// Absolute (min, max) image tokens, when the family fixes them
    pub token_bounds: Option<(u64, u64)>,
    pub layout: Layout,
    pub image_token: &'static str,
    pub image_start_token: Option<&'static str>,
    pub image_end_token: Option<&'static str>,
}

impl ModelConfig {
    /// Side length in pixels of the area that becomes one token
    pub fn unit(&self) -> u32 {
        self.patch_size * self.merge_size
    }

    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            image_token: self.image_token.to_string(),
            image_start_token: self.image_start_token.map(str::to_string),
            image_end_token: self.image_end_token.map(str::to_string),
        }
    }

    /// Replace the pixel bounds of a smart-resize family
    pub fn with_pixel_bounds(
        mut self,
        min_pixels: Option<u64>,
        max_pixels: Option<u64>,
    ) -> Result<Self> {
        if min_pixels.is_none() && max_pixels.is_none() {
            return Ok(self);
        }

        if self.layout != Layout::SmartResize {
            return Err(Error::Config(format!(
                "pixel bounds cannot be overridden for {}: it uses a fixed input layout",
                self.family.alias()
            )));
        }

        let min_pixels = min_pixels.unwrap_or(self.min_pixels);
        let max_pixels = max_pixels.unwrap_or(self.max_pixels);
        let unit_area = u64::from(self.unit()).pow(2);

        if max_pixels < unit_area {
            return Err(Error::Config(format!(
                "max_pixels must be at least {} for {}, got {}",
                unit_area,
                self.family.alias(),
                max_pixels
            )));
        }
        if min_pixels > max_pixels {
            return Err(Error::Config(format!(
                "min_pixels ({}) exceeds max_pixels ({})",
                min_pixels, max_pixels
            )));
        }

        self.min_pixels = min_pixels;
        self.max_pixels = max_pixels;
        // token bounds follow the pixel bounds for smart-resize families
        self.token_bounds = Some((
            (min_pixels / unit_area).max(1),
            (max_pixels / unit_area).max(1),
        ));
        Ok(self)
    }
}

/// Resolve a short alias or repository id to its family configuration.
///
/// Aliases match exactly; repository ids match by prefix. Matching is
/// case-sensitive.
pub fn resolve_model(identifier: &str) -> Result<ModelConfig> {
    let family = ModelFamily::ALL
        .into_iter()
        .find(|family| family.matches(identifier))
        .ok_or_else(|| Error::UnsupportedModel {
            model: identifier.to_string(),
            supported: supported_models(),
        })?;

    debug!(model = identifier, family = family.alias(), "resolved model");
    Ok(family.config())
}

/// Every accepted alias followed by the repository prefixes it covers
pub fn supported_models() -> Vec<String> {
    ModelFamily::ALL
        .iter()
        .map(|family| {
            let prefixes: Vec<String> = family
                .repo_prefixes()
                .iter()
                .map(|prefix| format!("{}*", prefix))
                .collect();
            format!("{} ({})", family.alias(), prefixes.join(", "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_model("qwen2-vl").unwrap().family, ModelFamily::Qwen2Vl);
        assert_eq!(resolve_model("qwen2.5-vl").unwrap().family, ModelFamily::Qwen25Vl);
        assert_eq!(resolve_model("gemma3").unwrap().family, ModelFamily::Gemma3);
        assert_eq!(resolve_model("internvl3").unwrap().family, ModelFamily::InternVl3);
        assert_eq!(resolve_model("llava").unwrap().family, ModelFamily::Llava);
    }

    #[test]
    fn test_resolve_repository_ids() {
        let config = resolve_model(DEFAULT_MODEL).unwrap();
        assert_eq!(config.family, ModelFamily::Qwen25Vl);
        assert_eq!(config.unit(), 28);

        assert_eq!(
            resolve_model("Qwen/Qwen2-VL-2B-Instruct").unwrap().family,
            ModelFamily::Qwen2Vl
        );
        assert_eq!(
            resolve_model("Qwen/Qwen2.5-VL-72B-Instruct").unwrap().family,
            ModelFamily::Qwen25Vl
        );
        assert_eq!(
            resolve_model("google/gemma-3-27b-it").unwrap().family,
            ModelFamily::Gemma3
        );
        assert_eq!(
            resolve_model("OpenGVLab/InternVL3-1B-hf").unwrap().family,
            ModelFamily::InternVl3
        );
        assert_eq!(
            resolve_model("llava-hf/llava-1.5-7b-hf").unwrap().family,
            ModelFamily::Llava
        );
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        for identifier in ["gpt-4o", "Qwen2.5-VL", "QWEN2.5-VL", "google/gemma-3-1b-it", ""] {
            match resolve_model(identifier) {
                Err(Error::UnsupportedModel { model, supported }) => {
                    assert_eq!(model, identifier);
                    assert_eq!(supported.len(), ModelFamily::ALL.len());
                }
                other => panic!("expected UnsupportedModel for {:?}, got {:?}", identifier, other),
            }
        }
    }

    #[test]
    fn test_supported_models_listing() {
        let models = supported_models();
        assert!(models[1].starts_with("qwen2.5-vl (Qwen/Qwen2.5-VL-*"));
        assert!(models.iter().any(|m| m.starts_with("internvl3")));
    }

    #[test]
    fn test_pixel_bound_override() {
        let config = ModelFamily::Qwen25Vl
            .config()
            .with_pixel_bounds(Some(256 * 28 * 28), Some(1280 * 28 * 28))
            .unwrap();
        assert_eq!(config.min_pixels, 200_704);
        assert_eq!(config.max_pixels, 1_003_520);
        assert_eq!(config.token_bounds, Some((256, 1280)));

        let unchanged = ModelFamily::Qwen25Vl.config().with_pixel_bounds(None, None).unwrap();
        assert_eq!(unchanged, ModelFamily::Qwen25Vl.config());
    }

    #[test]
    fn test_invalid_pixel_overrides() {
        let qwen = ModelFamily::Qwen2Vl.config();
        assert!(matches!(
            qwen.with_pixel_bounds(Some(10_000), Some(5_000)),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            qwen.with_pixel_bounds(None, Some(100)),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ModelFamily::Gemma3.config().with_pixel_bounds(None, Some(1_000_000)),
            Err(Error::Config(_))
        ));
    }
}
