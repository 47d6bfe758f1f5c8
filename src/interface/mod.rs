pub mod cli;
pub mod config;
pub mod output;

use crate::build::{BuildSystem, GenerationSummary, CONFIG_FILE_NAME};
use crate::error::Result;
use std::path::Path;

pub use cli::*;
pub use config::*;
pub use output::*;

/// Generate Objective-C sources for every AST file the configuration names.
pub fn generate_from_config(config: &config::GenerateConfig) -> Result<GenerationSummary> {
    let logger = output::Logger::new(config.is_verbose(), false);
    logger.verbose(&format!(
        "Translating {} into {}",
        config.input_path, config.output_path
    ));

    let summary = BuildSystem::new(config.is_verbose(), false).generate(config)?;

    if !summary.failed.is_empty() {
        logger.warning(&format!(
            "{} unit(s) failed to generate: {}",
            summary.failed.len(),
            summary
                .failed
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    Ok(summary)
}

/// The configuration for a `generate` run: the `--config` file, else a
/// `java2objc.json` in the working directory, else defaults. Command-line
/// values are applied on top; validation happens when generation starts.
pub fn resolve_config(args: &cli::GenerateArgs) -> Result<config::GenerateConfig> {
    let default_path = Path::new(CONFIG_FILE_NAME);
    let mut config = match &args.config_file {
        Some(path) => read_config(path)?,
        None if default_path.is_file() => read_config(default_path)?,
        None => config::GenerateConfig::default(),
    };
    args.apply_to(&mut config);
    Ok(config)
}

fn read_config(path: &Path) -> Result<config::GenerateConfig> {
    let content = std::fs::read_to_string(path).map_err(config::ConfigError::from)?;
    Ok(serde_json::from_str(&content).map_err(config::ConfigError::from)?)
}

/// Write `config` to `path`. An existing file is kept unless `force` is set.
pub fn init_config(path: &Path, config: &config::GenerateConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(config::ConfigError::InvalidConfig(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        ))
        .into());
    }
    config.translation.validate()?;
    config.save_to_file(path)?;
    Ok(())
}
