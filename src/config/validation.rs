//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::AppConfig;

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

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if url::Url::parse(&config.github.api_url).is_err() {
        errors.push(ValidationError::new("github.api_url", "must be an absolute URL"));
    }
    if config.github.token_prefix.trim().is_empty() {
        errors.push(ValidationError::new("github.token_prefix", "must not be empty"));
    }
    if config.github.timeout_secs == 0 {
        errors.push(ValidationError::new("github.timeout_secs", "must be greater than 0"));
    }

    if url::Url::parse(&config.telemetry.endpoint).is_err() {
        errors.push(ValidationError::new("telemetry.endpoint", "must be an absolute URL"));
    }
    if config.telemetry.timeout_ms == 0 {
        errors.push(ValidationError::new("telemetry.timeout_ms", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            "must be a socket address when metrics are enabled",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
