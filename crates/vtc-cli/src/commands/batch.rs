use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tracing::warn;
use vtc_core::{BatchSummary, Error};
use vtc_sources::{SourceOptions, list_images, read_dimensions};
use vtc_tokens::VisionTokenEstimator;

use crate::report;

/// Estimate every image in `dir` and report aggregate statistics.
///
/// Unreadable images are recorded and skipped. The run fails only when no
/// image could be processed.
pub fn handle(
    estimator: &VisionTokenEstimator,
    dir: &Path,
    options: &SourceOptions,
    json: bool,
) -> Result<()> {
    let files = list_images(dir, options)?;
    if files.is_empty() {
        return Err(Error::NoImagesFound(dir.display().to_string()).into());
    }

    if !json {
        report::print_directory_info(dir, files.len());
    }

    let mut summary = BatchSummary::new(estimator.model(), dir.display().to_string());
    let total = files.len();

    for (index, path) in files.iter().enumerate() {
        let filename = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .display()
            .to_string();

        if !json {
            print!("[{}/{}] Processing: {} ", index + 1, total, filename);
            std::io::stdout().flush()?;
        }

        match read_dimensions(path).and_then(|dims| estimator.estimate(dims)) {
            Ok(token_report) => {
                if !json {
                    println!("✓ ({} tokens)", token_report.image_tokens);
                }
                summary.record_success(filename, token_report.original, token_report.image_tokens);
            }
            Err(e) if e.is_per_file() => {
                warn!(file = %filename, error = %e, "skipping image");
                if !json {
                    println!("✗ (Error: {})", e);
                }
                summary.record_failure(filename, e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }

    let statistics = summary.statistics();
    if json {
        report::print_batch_json(&summary, statistics.as_ref())?;
    } else {
        report::print_batch(&summary, statistics.as_ref());
    }

    if summary.processed.is_empty() {
        anyhow::bail!("No images could be processed in {}", dir.display());
    }

    Ok(())
}
