//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GreeterConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, or use defaults when no path is given.
///
/// The result is not validated yet; callers apply CLI and environment
/// overrides first, then run [`validate_config`](crate::config::validate_config).
pub fn load_config(path: Option<&Path>) -> Result<GreeterConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(GreeterConfig::default());
    };

    let content = fs::read_to_string(path)?;
    let config: GreeterConfig = toml::from_str(&content)?;
    Ok(config)
}
