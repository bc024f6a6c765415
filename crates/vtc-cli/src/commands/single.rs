use anyhow::Result;
use vtc_sources::{ImageSource, read_dimensions};
use vtc_tokens::VisionTokenEstimator;

use crate::report;

/// Estimate one image file or blank canvas
pub fn handle(estimator: &VisionTokenEstimator, source: &ImageSource, json: bool) -> Result<()> {
    let dims = match source {
        ImageSource::File(path) => read_dimensions(path)?,
        ImageSource::Blank(dims) => *dims,
        ImageSource::Directory(dir) => {
            anyhow::bail!("{} is a directory", dir.display())
        }
    };

    let token_report = estimator.estimate(dims)?.with_source(source.label());

    if json {
        println!("{}", serde_json::to_string_pretty(&token_report)?);
    } else {
        report::print_single(&token_report);
    }

    Ok(())
}
