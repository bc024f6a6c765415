//! Vision token estimation
//!
//! Model table, resize/alignment rules and the per-family token formula.

pub mod estimator;
pub mod models;
pub mod resize;

pub use estimator::{VisionTokenEstimator, patch_count, token_count};
pub use models::{DEFAULT_MODEL, Layout, ModelConfig, ModelFamily, resolve_model, supported_models};
pub use resize::{align, optimal_tile_grid, smart_resize};
