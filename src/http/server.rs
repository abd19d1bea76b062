//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the card and health handlers
//! - Wire up middleware (request id, tracing, panic recovery)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::credentials::CredentialSource;
use crate::github::{GithubClient, GithubError};
use crate::http::cards::{most_commit_language_card, productive_time_card, stats_card};
use crate::http::request::X_REQUEST_ID;
use crate::http::response::panic_response;
use crate::lifecycle::Shutdown;
use crate::resilience::RequestExecutor;
use crate::telemetry::{TelemetryError, TelemetrySink};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build GitHub client: {0}")]
    Github(#[from] GithubError),

    #[error("failed to build telemetry sink: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("invalid cache control header '{0}'")]
    InvalidHeader(String),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: RequestExecutor,
    pub github: GithubClient,
    pub telemetry: TelemetrySink,
    pub cache_control: HeaderValue,
}

/// HTTP server for the card endpoints.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server over the given credential pool.
    pub fn new(config: &AppConfig, credentials: Arc<dyn CredentialSource>) -> Result<Self, ServerError> {
        let cache_control = HeaderValue::from_str(&config.cache.control)
            .map_err(|_| ServerError::InvalidHeader(config.cache.control.clone()))?;

        let state = AppState {
            executor: RequestExecutor::new(credentials),
            github: GithubClient::new(&config.github)?,
            telemetry: TelemetrySink::new(config.telemetry.clone())?,
            cache_control,
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        request_id = %id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(CatchPanicLayer::custom(panic_response));

        Router::new()
            .route("/api/cards/stats", get(stats_card))
            .route("/api/cards/productive-time", get(productive_time_card))
            .route("/api/cards/most-commit-language", get(most_commit_language_card))
            .route("/health", get(health))
            .with_state(state)
            .layer(middleware)
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
