//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cards_requests_total` (counter): card requests by card, outcome
//! - `cards_request_duration_seconds` (histogram): end-to-end card latency
//! - `cards_credential_rotations_total` (counter): rotations by target slot
//! - `cards_telemetry_events_total` (counter): analytics deliveries by outcome
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished card request.
pub fn record_card_request(card: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!("cards_requests_total", "card" => card, "outcome" => outcome).increment(1);
    metrics::histogram!("cards_request_duration_seconds", "card" => card)
        .record(start.elapsed().as_secs_f64());
}

/// Record a move to the credential at `slot`.
pub fn record_credential_rotation(slot: usize) {
    metrics::counter!("cards_credential_rotations_total", "slot" => slot.to_string()).increment(1);
}

/// Record the result of an analytics delivery.
pub fn record_telemetry(outcome: &'static str) {
    metrics::counter!("cards_telemetry_events_total", "outcome" => outcome).increment(1);
}
