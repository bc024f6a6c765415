//! Core domain models for vt-calc
//!
//! This crate contains:
//! - Image and aligned dimensions
//! - Per-image token reports
//! - Batch statistics
//! - The shared error type

pub mod dimensions;
pub mod error;
pub mod report;
pub mod stats;

pub use dimensions::{AlignedDimensions, ImageDimensions};
pub use error::{Error, Result};
pub use report::{TokenInfo, TokenReport};
pub use stats::{BatchStatistics, BatchSummary, FailedFile, ProcessedFile};
