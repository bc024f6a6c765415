use anyhow::Result;
use serde::Serialize;
use vtc_tokens::{DEFAULT_MODEL, ModelConfig, ModelFamily};

#[derive(Serialize)]
struct ModelEntry {
    alias: &'static str,
    repo_prefixes: &'static [&'static str],
    reference_repo: &'static str,
    config: ModelConfig,
}

/// Print every supported model family
pub fn handle(json: bool) -> Result<()> {
    if json {
        let entries: Vec<ModelEntry> = ModelFamily::ALL
            .into_iter()
            .map(|family| ModelEntry {
                alias: family.alias(),
                repo_prefixes: family.repo_prefixes(),
                reference_repo: family.reference_repo(),
                config: family.config(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Supported models:");
    for family in ModelFamily::ALL {
        let config = family.config();
        println!(
            "  {:<12} {:<34} unit {} px",
            family.alias(),
            family
                .repo_prefixes()
                .iter()
                .map(|prefix| format!("{}*", prefix))
                .collect::<Vec<_>>()
                .join(", "),
            config.unit()
        );
    }
    println!();
    println!("Default: {}", DEFAULT_MODEL);

    Ok(())
}
