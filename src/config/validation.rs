//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts, TTL and radius > 0)
//! - Check the API base URL parses and the password hash is SHA-256 hex
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: QuestConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::QuestConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Run every semantic check against `config`.
pub fn validate_config(config: &QuestConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "api.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("api.base_url", e.to_string())),
    }

    if !config.api.media_base_url.is_empty() {
        if let Err(e) = Url::parse(&config.api.media_base_url) {
            errors.push(ValidationError::new("api.media_base_url", e.to_string()));
        }
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::new("api.timeout_secs", "must be greater than 0"));
    }

    let radius = config.geofence.visit_radius_km;
    if !(radius.is_finite() && radius > 0.0) {
        errors.push(ValidationError::new(
            "geofence.visit_radius_km",
            "must be a positive number",
        ));
    }

    let hash = &config.admin.password_hash;
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        errors.push(ValidationError::new(
            "admin.password_hash",
            "must be a 64-character hex SHA-256 digest",
        ));
    }

    if config.admin.session_ttl_secs == 0 {
        errors.push(ValidationError::new("admin.session_ttl_secs", "must be greater than 0"));
    }

    if config.admin.session_path.trim().is_empty() {
        errors.push(ValidationError::new("admin.session_path", "must not be empty"));
    }

    if config.progress.state_dir.trim().is_empty() {
        errors.push(ValidationError::new("progress.state_dir", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
