//! Shared utilities for integration testing.
//!
//! Spins up a programmable mock GitHub API and a mock analytics collector on
//! ephemeral ports, then runs the real card server against them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use github_profile_cards::config::AppConfig;
use github_profile_cards::credentials::CredentialSource;
use github_profile_cards::{HttpServer, Shutdown};

/// Login the mock GitHub does not know.
pub const UNKNOWN_USER: &str = "ghost";

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Mock GitHub API.
///
/// Tokens starting with `bad` are answered with 403, anything else succeeds.
/// Every token presented is recorded in arrival order.
#[derive(Clone)]
pub struct MockGithub {
    pub url: String,
    tokens: Arc<Mutex<Vec<String>>>,
}

impl MockGithub {
    pub async fn start() -> Self {
        let tokens: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/graphql", post(graphql))
            .route("/search/commits", get(search_commits))
            .with_state(tokens.clone());
        Self {
            url: serve(router).await,
            tokens,
        }
    }

    /// Tokens seen so far, in order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

type Tokens = Arc<Mutex<Vec<String>>>;

/// Record the presented token; reject it if it is a `bad` one.
fn authorize(tokens: &Tokens, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .map(|(_, token)| token.to_string())
        .unwrap_or_default();
    tokens.lock().unwrap().push(token.clone());

    if token.starts_with("bad") {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "API rate limit exceeded for this token" })),
        )
            .into_response());
    }
    Ok(())
}

async fn graphql(State(tokens): State<Tokens>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = authorize(&tokens, &headers) {
        return rejection;
    }

    let login = body["variables"]["login"].as_str().unwrap_or_default();
    if login == UNKNOWN_USER {
        return Json(json!({ "data": { "user": null } })).into_response();
    }

    let query = body["query"].as_str().unwrap_or_default();
    if query.contains("commitContributionsByRepository") {
        Json(json!({
            "data": { "user": { "contributionsCollection": { "commitContributionsByRepository": [
                { "repository": { "primaryLanguage": { "name": "Rust", "color": "#dea584" } },
                  "contributions": { "totalCount": 40 } },
                { "repository": { "primaryLanguage": { "name": "TypeScript", "color": "#3178c6" } },
                  "contributions": { "totalCount": 25 } },
                { "repository": { "primaryLanguage": null },
                  "contributions": { "totalCount": 3 } },
                { "repository": { "primaryLanguage": { "name": "Rust", "color": "#dea584" } },
                  "contributions": { "totalCount": 2 } }
            ] } } }
        }))
        .into_response()
    } else {
        Json(json!({
            "data": { "user": {
                "login": login,
                "name": null,
                "contributionsCollection": {
                    "totalCommitContributions": 1200,
                    "restrictedContributionsCount": 34
                },
                "repositoriesContributedTo": { "totalCount": 9 },
                "pullRequests": { "totalCount": 57 },
                "issues": { "totalCount": 21 },
                "repositories": { "nodes": [
                    { "stargazers": { "totalCount": 1500 } },
                    { "stargazers": { "totalCount": 42 } }
                ] }
            } }
        }))
        .into_response()
    }
}

async fn search_commits(
    State(tokens): State<Tokens>,
    headers: HeaderMap,
    Query(_params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&tokens, &headers) {
        return rejection;
    }
    Json(json!({
        "total_count": 3,
        "items": [
            { "commit": { "author": { "date": "2024-03-01T01:15:00Z" } } },
            { "commit": { "author": { "date": "2024-03-02T01:45:00Z" } } },
            { "commit": { "author": { "date": "2024-03-02T14:00:00+02:00" } } }
        ]
    }))
    .into_response()
}

/// One hit on the analytics collector: query string and JSON body.
pub type CollectorHit = (HashMap<String, String>, Value);

/// Mock analytics collector that records every event it receives.
#[derive(Clone)]
pub struct MockCollector {
    pub endpoint: String,
    hits: Arc<Mutex<Vec<CollectorHit>>>,
}

impl MockCollector {
    pub async fn start() -> Self {
        let hits: Arc<Mutex<Vec<CollectorHit>>> = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route(
                "/mp/collect",
                post(
                    |State(hits): State<Arc<Mutex<Vec<CollectorHit>>>>,
                     Query(query): Query<HashMap<String, String>>,
                     Json(body): Json<Value>| async move {
                        hits.lock().unwrap().push((query, body));
                        StatusCode::OK
                    },
                ),
            )
            .with_state(hits.clone());
        Self {
            endpoint: format!("{}/mp/collect", serve(router).await),
            hits,
        }
    }

    pub fn hits(&self) -> Vec<CollectorHit> {
        self.hits.lock().unwrap().clone()
    }

    /// Poll until at least `count` hits arrived or the deadline passes.
    pub async fn wait_for(&self, count: usize, deadline: Duration) -> Vec<CollectorHit> {
        let start = tokio::time::Instant::now();
        loop {
            let hits = self.hits();
            if hits.len() >= count || start.elapsed() >= deadline {
                return hits;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

/// Configuration pointing at the mocks, with telemetry disabled.
pub fn config_for(github: &MockGithub) -> AppConfig {
    let mut config = AppConfig::default();
    config.github.api_url = github.url.clone();
    config.github.timeout_secs = 2;
    config
}

/// Enable telemetry against `collector`.
pub fn with_telemetry(mut config: AppConfig, collector: &MockCollector) -> AppConfig {
    config.telemetry.endpoint = collector.endpoint.clone();
    config.telemetry.measurement_id = Some("G-TEST".into());
    config.telemetry.api_secret = Some("secret".into());
    config.telemetry.deployed = true;
    config
}

/// A running card server.
pub struct TestServer {
    pub url: String,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start(config: &AppConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        let server = HttpServer::new(config, credentials).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let shutdown = Shutdown::new();
        let stop = shutdown.clone();
        tokio::spawn(async move {
            server.run(listener, stop).await.unwrap();
        });
        Self { url, shutdown }
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        reqwest::get(format!("{}{}", self.url, path_and_query)).await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
