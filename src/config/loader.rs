//! Loading of sweep grid config files

use super::schema::{SweepConfig, SweepGrid};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Load a sweep grid.
///
/// With no path the default grid is returned; no file is searched for.
pub fn load_grid(path: Option<&Path>) -> Result<SweepGrid, ConfigError> {
    match path {
        Some(p) => Ok(load_config_file(p)?.grid()),
        None => Ok(SweepGrid::default()),
    }
}

/// Load and validate a config from a specific file path.
pub fn load_config_file(path: &Path) -> Result<SweepConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SweepConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    log::debug!("Loaded sweep config from {}", path.display());
    Ok(config)
}
