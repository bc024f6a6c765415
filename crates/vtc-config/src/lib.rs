use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Optional user configuration for vt-calc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model used when `--model-path` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Extensions picked up in directory mode
    #[serde(default = "default_extensions")]
    pub image_extensions: Vec<String>,

    /// Pixel bound overrides keyed by model alias (e.g. "qwen2.5-vl")
    #[serde(default)]
    pub overrides: BTreeMap<String, PixelOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pixels: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: None,
            image_extensions: default_extensions(),
            overrides: BTreeMap::new(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![
        "jpg".to_string(),
        "jpeg".to_string(),
        "png".to_string(),
        "webp".to_string(),
    ]
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load config from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vt-calc", "vt-calc")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Pixel override for a model alias, if configured
    pub fn pixel_override(&self, alias: &str) -> Option<&PixelOverride> {
        self.overrides.get(alias)
    }
}
