//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the card
//! service. All types derive Serde traits for deserialization from config
//! files; every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// GitHub API access.
    pub github: GithubConfig,

    /// Usage analytics.
    pub telemetry: TelemetryConfig,

    /// Response caching policy.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// GitHub API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GithubConfig {
    /// REST/GraphQL base URL.
    pub api_url: String,

    /// Environment variable prefix for the token pool (`<prefix>_<n>`).
    pub token_prefix: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` sent to GitHub.
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_prefix: "GITHUB_TOKEN".to_string(),
            timeout_secs: 10,
            user_agent: concat!("github-profile-cards/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Analytics (Measurement Protocol) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Collector endpoint.
    pub endpoint: String,

    /// Measurement identifier.
    pub measurement_id: Option<String>,

    /// API secret for the collector.
    pub api_secret: Option<String>,

    /// Set when running in the production deployment environment.
    pub deployed: bool,

    /// Delivery timeout in milliseconds.
    pub timeout_ms: u64,
}

impl TelemetryConfig {
    /// Events are only sent from a deployment with both identifiers set.
    pub fn is_enabled(&self) -> bool {
        self.deployed
            && self.measurement_id.as_deref().is_some_and(|s| !s.is_empty())
            && self.api_secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.google-analytics.com/mp/collect".to_string(),
            measurement_id: None,
            api_secret: None,
            deployed: false,
            timeout_ms: 2000,
        }
    }
}

/// Caching policy applied to successful cards.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `Cache-Control` header value.
    pub control: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            control: "public, max-age=14400, s-maxage=14400, stale-while-revalidate=86400".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
