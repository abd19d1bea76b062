//! Analytics event shaping.
//!
//! # Responsibilities
//! - Derive a pseudonymous client id from the username
//! - Remove the username from event parameters
//! - Pull caller IP and user agent out of request headers

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{header::USER_AGENT, HeaderMap};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

const FORWARDED_FOR: &str = "x-forwarded-for";
const ENGAGEMENT_TIME_MSEC: u64 = 100;

/// Caller details forwarded to the collector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub client_ip: String,
    pub user_agent: String,
}

impl RequestMetadata {
    /// Read caller IP (first `x-forwarded-for` hop) and user agent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let client_ip = first_header(headers, FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(|ip| ip.trim().to_string())
            .unwrap_or_default();
        let user_agent = first_header(headers, USER_AGENT.as_str())
            .map(str::to_string)
            .unwrap_or_default();

        Self { client_ip, user_agent }
    }
}

fn first_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get_all(name).iter().next().and_then(|v| v.to_str().ok())
}

/// SHA-256 of the username as hex; a fresh random id without one.
pub fn client_id(username: Option<&str>) -> String {
    match username.filter(|u| !u.is_empty()) {
        Some(username) => {
            let mut hasher = Sha256::new();
            hasher.update(username.as_bytes());
            hex::encode(hasher.finalize())
        }
        None => uuid::Uuid::new_v4().to_string(),
    }
}

/// Measurement Protocol request body.
#[derive(Debug, Clone, Serialize)]
pub struct Payload {
    pub client_id: String,
    pub user_agent: String,
    pub ip_override: String,
    pub events: Vec<EventPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub name: String,
    pub params: Map<String, Value>,
}

/// Build the collector payload. The `username` parameter is consumed
/// for the client id and never forwarded.
pub fn build_payload(event_name: &str, mut params: Map<String, Value>, metadata: &RequestMetadata) -> Payload {
    let username = params.remove("username");
    let client_id = client_id(username.as_ref().and_then(Value::as_str));

    let has_session = params
        .get("session_id")
        .is_some_and(|v| !v.is_null() && v.as_str() != Some(""));
    if !has_session {
        params.insert("session_id".to_string(), Value::String(epoch_millis().to_string()));
    }
    params.insert("engagement_time_msec".to_string(), Value::from(ENGAGEMENT_TIME_MSEC));

    Payload {
        client_id,
        user_agent: metadata.user_agent.clone(),
        ip_override: metadata.client_ip.clone(),
        events: vec![EventPayload {
            name: event_name.to_string(),
            params,
        }],
    }
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
