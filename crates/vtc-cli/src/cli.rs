use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vt-calc")]
#[command(about = "Estimate how many vision tokens an image costs in a VLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to an image file or a directory of images
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<String>,

    /// Size of a blank dummy image, e.g. "--size 1920 1080"
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        allow_negative_numbers = true
    )]
    pub size: Option<Vec<String>>,

    /// Model alias (qwen2.5-vl, internvl3, ...) or repository id
    /// (default: Qwen/Qwen2.5-VL-7B-Instruct)
    #[arg(
        short = 'm',
        long = "model-path",
        visible_alias = "model-name",
        env = "VTC_MODEL",
        value_name = "MODEL"
    )]
    pub model: Option<String>,

    /// Override the minimum pixel count (smart-resize models only)
    #[arg(long, value_name = "PIXELS")]
    pub min_pixels: Option<u64>,

    /// Override the maximum pixel count (smart-resize models only)
    #[arg(long, value_name = "PIXELS")]
    pub max_pixels: Option<u64>,

    /// Descend into subdirectories in directory mode
    #[arg(short, long)]
    pub recursive: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// List supported models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Config file (default: platform config dir, e.g. ~/.config/vt-calc/config.toml)
    #[arg(long, env = "VTC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_size_and_model_alias() {
        let cli = Cli::try_parse_from([
            "vt-calc",
            "--size",
            "1920",
            "1080",
            "--model-name",
            "internvl3",
        ])
        .unwrap();
        assert_eq!(cli.size, Some(vec!["1920".to_string(), "1080".to_string()]));
        assert_eq!(cli.model.as_deref(), Some("internvl3"));
        assert!(cli.image.is_none());
    }

    #[test]
    fn test_negative_size_reaches_validation() {
        let cli = Cli::try_parse_from(["vt-calc", "-s", "-5", "10"]).unwrap();
        assert_eq!(cli.size, Some(vec!["-5".to_string(), "10".to_string()]));
    }

    #[test]
    fn test_size_needs_two_values() {
        assert!(Cli::try_parse_from(["vt-calc", "--size", "640"]).is_err());
    }
}
