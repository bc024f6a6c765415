pub mod batch;
pub mod models;
pub mod single;

use anyhow::Result;
use tracing::debug;
use vtc_config::Config;
use vtc_sources::{ImageSource, SourceOptions};
use vtc_tokens::{DEFAULT_MODEL, VisionTokenEstimator, resolve_model};

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.list_models {
        return models::handle(cli.json);
    }

    let source = ImageSource::resolve(cli.image.as_deref(), cli.size.as_deref())?;
    let estimator = build_estimator(&cli, &config)?;

    match source {
        ImageSource::Directory(dir) => {
            let options = SourceOptions {
                extensions: config.image_extensions.clone(),
                recursive: cli.recursive,
            };
            batch::handle(&estimator, &dir, &options, cli.json)
        }
        source => single::handle(&estimator, &source, cli.json),
    }
}

/// Resolve the model and apply pixel overrides.
///
/// Config file overrides apply first, then the command line ones.
fn build_estimator(cli: &Cli, config: &Config) -> Result<VisionTokenEstimator> {
    let model = cli
        .model
        .clone()
        .or_else(|| config.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let mut model_config = resolve_model(&model)?;

    if let Some(pixels) = config.pixel_override(model_config.family.alias()) {
        debug!(model = %model, ?pixels, "applying configured pixel bounds");
        model_config = model_config.with_pixel_bounds(pixels.min_pixels, pixels.max_pixels)?;
    }
    model_config = model_config.with_pixel_bounds(cli.min_pixels, cli.max_pixels)?;

    Ok(VisionTokenEstimator::with_config(model, model_config))
}
