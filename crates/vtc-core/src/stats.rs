//! Aggregate statistics for directory runs

use serde::{Deserialize, Serialize};

use crate::ImageDimensions;

/// Summary over the token counts of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub count: usize,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
    /// Sample standard deviation (N - 1); zero for fewer than two values
    pub std_dev: f64,
}

impl BatchStatistics {
    /// Returns `None` for an empty batch
    pub fn from_counts(counts: &[u64]) -> Option<Self> {
        let min = *counts.iter().min()?;
        let max = *counts.iter().max()?;
        let count = counts.len();

        let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / count as f64;
        let std_dev = if count < 2 {
            0.0
        } else {
            let squares: f64 = counts
                .iter()
                .map(|&c| {
                    let diff = c as f64 - mean;
                    diff * diff
                })
                .sum();
            (squares / (count - 1) as f64).sqrt()
        };

        Some(Self {
            count,
            mean,
            min,
            max,
            std_dev,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFile {
    pub filename: String,
    pub size: ImageDimensions,
    pub tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedFile {
    pub filename: String,
    pub error: String,
}

/// Everything a directory run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub model: String,
    pub directory: String,
    pub processed: Vec<ProcessedFile>,
    pub failed: Vec<FailedFile>,
}

impl BatchSummary {
    pub fn new(model: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            directory: directory.into(),
            processed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record_success(&mut self, filename: String, size: ImageDimensions, tokens: u64) {
        self.processed.push(ProcessedFile {
            filename,
            size,
            tokens,
        });
    }

    pub fn record_failure(&mut self, filename: String, error: String) {
        self.failed.push(FailedFile { filename, error });
    }

    /// Statistics over successfully processed files
    pub fn statistics(&self) -> Option<BatchStatistics> {
        let counts: Vec<u64> = self.processed.iter().map(|f| f.tokens).collect();
        BatchStatistics::from_counts(&counts)
    }
}
