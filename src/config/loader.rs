//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Settings;
use crate::config::validation::{validate_config, ValidationError};

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

/// Parse and validate settings from TOML text.
pub fn parse_config(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content)?;
    check(settings)
}

/// Load and validate settings from a TOML file.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    check(read_config(path)?)
}

/// Load settings from a TOML file without semantic validation.
///
/// For callers that layer overrides on top; they must call [`check`] once
/// the final settings are assembled.
pub fn read_config(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Validate assembled settings.
pub fn check(settings: Settings) -> Result<Settings, ConfigError> {
    validate_config(&settings).map_err(ConfigError::Validation)?;
    Ok(settings)
}
