//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Example configuration written by `synesthesia init`
pub const EXAMPLE_CONFIG: &str = include_str!("../../synesthesia.example.yaml");

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<SynesthesiaConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let config: SynesthesiaConfig = if contents.trim().is_empty() {
        SynesthesiaConfig::default()
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {:?}", path))?
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration, using defaults when the file does not exist
pub fn load_or_default(path: &Path) -> Result<SynesthesiaConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        Ok(SynesthesiaConfig::default())
    }
}
