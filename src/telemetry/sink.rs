//! Best-effort delivery of analytics events.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::TelemetryConfig;
use crate::observability::metrics;
use crate::telemetry::payload::{build_payload, RequestMetadata};

/// Errors that can occur while delivering an event.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Collector answered with a non-success status.
    #[error("collector responded with {status}: {body}")]
    Rejected { status: reqwest::StatusCode, body: String },

    /// Connection failure or timeout.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Collector URL could not be built.
    #[error("invalid collector URL: {0}")]
    Url(#[from] url::ParseError),
}

/// What happened to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Telemetry is not configured for this deployment.
    Skipped,
    /// The collector accepted the event.
    Sent,
}

/// Fire-and-forget analytics reporter; cheap to clone.
#[derive(Clone)]
pub struct TelemetrySink {
    http: reqwest::Client,
    config: Arc<TelemetryConfig>,
}

impl TelemetrySink {
    pub fn new(config: TelemetryConfig) -> Result<Self, TelemetryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Report an event on a detached task.
    ///
    /// Never fails and never delays the caller; delivery errors are logged
    /// and dropped. The returned handle may be ignored.
    pub fn report(&self, event_name: &str, params: Map<String, Value>, metadata: RequestMetadata) -> JoinHandle<()> {
        let sink = self.clone();
        let event_name = event_name.to_string();
        tokio::spawn(async move {
            match sink.deliver(&event_name, params, &metadata).await {
                Ok(Delivery::Sent) => metrics::record_telemetry("sent"),
                Ok(Delivery::Skipped) => metrics::record_telemetry("skipped"),
                Err(e) => {
                    metrics::record_telemetry("failed");
                    tracing::warn!(event = %event_name, error = %e, "Analytics error (ignored)");
                }
            }
        })
    }

    /// Send an event and wait for the collector's answer.
    pub async fn deliver(
        &self,
        event_name: &str,
        params: Map<String, Value>,
        metadata: &RequestMetadata,
    ) -> Result<Delivery, TelemetryError> {
        let (Some(measurement_id), Some(api_secret)) = (&self.config.measurement_id, &self.config.api_secret) else {
            return Ok(Delivery::Skipped);
        };
        if !self.config.is_enabled() {
            return Ok(Delivery::Skipped);
        }

        let url = url::Url::parse_with_params(
            &self.config.endpoint,
            &[("measurement_id", measurement_id), ("api_secret", api_secret)],
        )?;
        let payload = build_payload(event_name, params, metadata);

        let response = self.http.post(url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelemetryError::Rejected { status, body });
        }

        tracing::debug!(event = %event_name, "Analytics event delivered");
        Ok(Delivery::Sent)
    }
}

impl std::fmt::Debug for TelemetrySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetrySink")
            .field("endpoint", &self.config.endpoint)
            .field("enabled", &self.config.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    type Hits = Arc<Mutex<Vec<(HashMap<String, String>, Value)>>>;

    /// Start a collector that records every hit and answers with `status`.
    async fn collector(status: StatusCode) -> (String, Hits) {
        let hits: Hits = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route(
                "/mp/collect",
                post(
                    move |State(hits): State<Hits>, Query(q): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                        hits.lock().unwrap().push((q, body));
                        (status, "collector says no")
                    },
                ),
            )
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{}/mp/collect", addr), hits)
    }

    fn config(endpoint: &str) -> TelemetryConfig {
        TelemetryConfig {
            endpoint: endpoint.to_string(),
            measurement_id: Some("G-TEST".into()),
            api_secret: Some("SECRET".into()),
            deployed: true,
            timeout_ms: 2000,
        }
    }

    fn params(username: &str) -> Map<String, Value> {
        json!({ "username": username, "theme": "dark" }).as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_not_deployed_makes_no_call() {
        let (endpoint, hits) = collector(StatusCode::OK).await;
        let mut cfg = config(&endpoint);
        cfg.deployed = false;
        let sink = TelemetrySink::new(cfg).unwrap();

        let delivery = sink.deliver("stats-card", params("alice"), &RequestMetadata::default()).await;
        assert_eq!(delivery.unwrap(), Delivery::Skipped);
        sink.report("stats-card", params("alice"), RequestMetadata::default()).await.unwrap();
        assert!(hits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_secret_makes_no_call() {
        let (endpoint, hits) = collector(StatusCode::OK).await;
        let mut cfg = config(&endpoint);
        cfg.api_secret = None;
        let sink = TelemetrySink::new(cfg).unwrap();

        let delivery = sink.deliver("stats-card", params("alice"), &RequestMetadata::default()).await;
        assert_eq!(delivery.unwrap(), Delivery::Skipped);
        assert!(hits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sends_pseudonymous_payload() {
        let (endpoint, hits) = collector(StatusCode::OK).await;
        let sink = TelemetrySink::new(config(&endpoint)).unwrap();
        let meta = RequestMetadata {
            client_ip: "127.0.0.1".into(),
            user_agent: "Mozilla/5.0 Test".into(),
        };

        assert_eq!(sink.deliver("stats-card", params("alice"), &meta).await.unwrap(), Delivery::Sent);
        assert_eq!(sink.deliver("stats-card", params("alice"), &meta).await.unwrap(), Delivery::Sent);

        let hits = hits.lock().unwrap();
        assert_eq!(hits.len(), 2);
        let (query, body) = &hits[0];
        assert_eq!(query["measurement_id"], "G-TEST");
        assert_eq!(query["api_secret"], "SECRET");
        assert_eq!(body["ip_override"], "127.0.0.1");
        assert_eq!(body["user_agent"], "Mozilla/5.0 Test");
        assert_eq!(body["events"][0]["name"], "stats-card");
        assert_eq!(body["events"][0]["params"]["theme"], "dark");
        assert!(body["events"][0]["params"].get("username").is_none());
        assert!(!body.to_string().contains("alice"));
        assert_eq!(hits[0].1["client_id"], hits[1].1["client_id"]);
    }

    #[tokio::test]
    async fn test_rejection_is_reported_not_raised() {
        let (endpoint, hits) = collector(StatusCode::BAD_REQUEST).await;
        let sink = TelemetrySink::new(config(&endpoint)).unwrap();

        let err = sink
            .deliver("stats-card", params("alice"), &RequestMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TelemetryError::Rejected { status, .. } if status == StatusCode::BAD_REQUEST));

        // The detached task swallows the same failure.
        sink.report("stats-card", params("alice"), RequestMetadata::default()).await.unwrap();
        assert_eq!(hits.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_collector_is_swallowed() {
        let sink = TelemetrySink::new(config("http://127.0.0.1:1/mp/collect")).unwrap();
        let handle = sink.report("stats-card", params("alice"), RequestMetadata::default());
        assert!(handle.await.is_ok());
    }
}
