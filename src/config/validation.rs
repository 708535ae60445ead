//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::Settings;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("admin.host must not be empty")]
    EmptyHost,

    #[error("admin.port must be non-zero")]
    ZeroPort,

    #[error("admin.server_name must not be empty")]
    EmptyServerName,

    #[error("admin.server_name '{0}' must be a single path segment without '/', '#', '?' or dot segments")]
    InvalidServerName(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate settings, collecting every problem found.
pub fn validate_config(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let admin = &settings.admin;

    if admin.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if admin.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if admin.server_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServerName);
    } else if !is_path_segment(&admin.server_name) {
        errors.push(ValidationError::InvalidServerName(admin.server_name.clone()));
    }
    if admin.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("admin.request_timeout_secs"));
    }
    if admin.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("admin.connect_timeout_secs"));
    }

    let level = settings.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            settings.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// The name is spliced into `/apps/http/servers/{name}/routes`.
fn is_path_segment(name: &str) -> bool {
    !matches!(name, "." | "..") && !name.contains(['/', '#', '?'])
}
