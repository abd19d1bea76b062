//! Configuration loading from disk and environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides from the process environment, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, std::env::vars());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay deployment environment variables on top of file configuration.
///
/// - `GA_MEASUREMENT_ID`, `GA_API_SECRET`: analytics identifiers
/// - `VERCEL`: any non-empty value marks the production deployment
/// - `PORT`: listen on `0.0.0.0:<PORT>`
/// - `LOG_LEVEL`: default log level
pub fn apply_env_overrides<I, K, V>(config: &mut AppConfig, vars: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(_, v)| !v.is_empty())
        .collect();

    if let Some(id) = vars.get("GA_MEASUREMENT_ID") {
        config.telemetry.measurement_id = Some(id.clone());
    }
    if let Some(secret) = vars.get("GA_API_SECRET") {
        config.telemetry.api_secret = Some(secret.clone());
    }
    if vars.contains_key("VERCEL") {
        config.telemetry.deployed = true;
    }
    if let Some(port) = vars.get("PORT") {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }
    if let Some(level) = vars.get("LOG_LEVEL") {
        config.observability.log_level = level.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            [
                ("GA_MEASUREMENT_ID", "G-TEST"),
                ("GA_API_SECRET", "SECRET"),
                ("VERCEL", "1"),
                ("PORT", "8123"),
                ("UNRELATED", "x"),
            ],
        );

        assert_eq!(config.telemetry.measurement_id.as_deref(), Some("G-TEST"));
        assert_eq!(config.telemetry.api_secret.as_deref(), Some("SECRET"));
        assert!(config.telemetry.deployed);
        assert!(config.telemetry.is_enabled());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8123");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, [("VERCEL", ""), ("GA_API_SECRET", "")]);
        assert!(!config.telemetry.deployed);
        assert!(config.telemetry.api_secret.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("cards-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cards.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[cache]\ncontrol = \"no-store\"").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.cache.control, "no-store");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let dir = std::env::temp_dir().join(format!("cards-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cards.toml");
        fs::write(&path, "[github\n").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }
}
