//! Card endpoint handlers.
//!
//! Every handler follows the same shape: validate the query, run a GitHub
//! producer through the credential-rotating executor, render, then either
//! report the success to analytics or fall back to the themed error card.

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::Response,
};
use serde_json::{Map, Value};

use crate::cards::{self, commit_language, productive_time, stats, CardKind, DEFAULT_THEME};
use crate::credentials::Credential;
use crate::github::GithubError;
use crate::http::request::{CommitLanguageQuery, ProductiveTimeQuery, QueryError, QueryParams, StatsQuery};
use crate::http::response::{bad_request, error_card_response, svg_response};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::ExecuteError;
use crate::telemetry::RequestMetadata;

/// `GET /api/cards/stats`
pub async fn stats_card(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let params = QueryParams::parse(raw.as_deref());
    let query = match StatsQuery::from_params(&params) {
        Ok(query) => query,
        Err(e) => return rejected(CardKind::Stats, e, &params, start),
    };

    let github = state.github.clone();
    let username = query.username.clone();
    let result = state
        .executor
        .execute(|credential: Credential| {
            let github = github.clone();
            let username = username.clone();
            async move { github.profile_stats(&credential, &username).await }
        })
        .await
        .map(|profile| stats::render_stats_card(&profile, cards::theme(&query.theme)));

    let event = event_params(&query.username, &query.theme);
    finish(&state, CardKind::Stats, &query.theme, event, &headers, result, start)
}

/// `GET /api/cards/productive-time`
pub async fn productive_time_card(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let params = QueryParams::parse(raw.as_deref());
    let query = match ProductiveTimeQuery::from_params(&params) {
        Ok(query) => query,
        Err(e) => return rejected(CardKind::ProductiveTime, e, &params, start),
    };

    let github = state.github.clone();
    let username = query.username.clone();
    let result = state
        .executor
        .execute(|credential: Credential| {
            let github = github.clone();
            let username = username.clone();
            async move { github.commit_times(&credential, &username).await }
        })
        .await
        .map(|times| {
            let hours = productive_time::hourly_histogram(&times, query.utc_offset);
            productive_time::render_productive_time_card(&hours, query.utc_offset, cards::theme(&query.theme))
        });

    let mut event = event_params(&query.username, &query.theme);
    event.insert("utcOffset".into(), Value::String(query.utc_offset_raw.clone()));
    finish(&state, CardKind::ProductiveTime, &query.theme, event, &headers, result, start)
}

/// `GET /api/cards/most-commit-language`
pub async fn most_commit_language_card(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let params = QueryParams::parse(raw.as_deref());
    let query = match CommitLanguageQuery::from_params(&params) {
        Ok(query) => query,
        Err(e) => return rejected(CardKind::MostCommitLanguage, e, &params, start),
    };

    let github = state.github.clone();
    let username = query.username.clone();
    let result = state
        .executor
        .execute(|credential: Credential| {
            let github = github.clone();
            let username = username.clone();
            async move { github.commit_languages(&credential, &username).await }
        })
        .await
        .map(|languages| {
            let shown = commit_language::select_languages(&languages, &query.exclude);
            commit_language::render_commit_language_card(&shown, cards::theme(&query.theme))
        });

    let event = event_params(&query.username, &query.theme);
    finish(&state, CardKind::MostCommitLanguage, &query.theme, event, &headers, result, start)
}

fn event_params(username: &str, theme: &str) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("username".into(), Value::String(username.to_string()));
    params.insert("theme".into(), Value::String(theme.to_string()));
    params
}

/// A missing or non-string parameter is a 400. A well-typed value that
/// does not parse still answers with an image, as the error card.
fn rejected(card: CardKind, err: QueryError, params: &QueryParams, start: Instant) -> Response {
    tracing::debug!(card = card.event_name(), error = %err, "Rejected card query");
    match err {
        QueryError::NotAString(_) => {
            metrics::record_card_request(card.event_name(), "bad_request", start);
            bad_request(err)
        }
        QueryError::NotANumber(_) => {
            let theme = params
                .string_or("theme", DEFAULT_THEME)
                .unwrap_or_else(|_| DEFAULT_THEME.to_string());
            metrics::record_card_request(card.event_name(), "invalid", start);
            error_card_response(&err.to_string(), &theme)
        }
    }
}

fn finish(
    state: &AppState,
    card: CardKind,
    theme: &str,
    params: Map<String, Value>,
    headers: &HeaderMap,
    result: Result<String, ExecuteError<GithubError>>,
    start: Instant,
) -> Response {
    match result {
        Ok(svg) => {
            state
                .telemetry
                .report(card.event_name(), params, RequestMetadata::from_headers(headers));
            metrics::record_card_request(card.event_name(), "ok", start);
            svg_response(svg, &state.cache_control)
        }
        Err(e) => {
            tracing::error!(card = card.event_name(), error = %e, "Card request failed");
            metrics::record_card_request(card.event_name(), "error", start);
            error_card_response(&e.to_string(), theme)
        }
    }
}
