//! GitHub profile cards.
//!
//! Serves SVG cards summarizing a GitHub user's activity. Every card request
//! runs its GitHub query through a credential-rotating executor so one
//! rate-limited or revoked token never takes the service down.

// Core subsystems
pub mod cards;
pub mod config;
pub mod credentials;
pub mod github;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod telemetry;

pub use config::AppConfig;
pub use credentials::{CredentialSource, EnvCredentialSource, StaticCredentialSource};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
