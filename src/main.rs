//! GitHub profile cards server.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /api/cards/*        ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http (query check) ─▶ resilience executor  │
//!                             │                              │      ▲        │
//!                             │                   credential │      │ 401/403│
//!                             │                              ▼      │ rotate │
//!                             │                  credentials ─▶ github client ┼──▶ GitHub API
//!                             │                                     │        │
//!     SVG (card or error)     │                                     ▼        │
//!     ◀───────────────────────┼── cards (render) ◀──────────────────┘        │
//!                             │        │                                     │
//!                             │        └─▶ telemetry (detached) ─────────────┼──▶ collector
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use github_profile_cards::config::load_config;
use github_profile_cards::credentials::EnvCredentialSource;
use github_profile_cards::lifecycle::Shutdown;
use github_profile_cards::observability::{logging, metrics};
use github_profile_cards::HttpServer;

#[derive(Parser)]
#[command(name = "github-profile-cards")]
#[command(about = "Serve GitHub profile SVG cards", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "github-profile-cards starting");

    let credentials = EnvCredentialSource::from_env(&config.github.token_prefix);
    if credentials.pool_size() == 0 {
        tracing::warn!(prefix = %config.github.token_prefix, "No GitHub tokens configured; every card will fail");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        github_api = %config.github.api_url,
        tokens = credentials.pool_size(),
        telemetry = config.telemetry.is_enabled(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(&config, Arc::new(credentials))?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.watch_signals();

    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
