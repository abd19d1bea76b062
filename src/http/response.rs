//! Response construction.
//!
//! # Responsibilities
//! - Successful cards: SVG body, image content type, shared cache policy
//! - Failed cards: themed error card, still status 200 so it embeds as an image
//! - Invalid queries: 400 with a plain-text explanation
//!
//! # Design Decisions
//! - Error cards carry no cache header, so a transient failure is not pinned
//! - Raw error internals never reach the client, only the error's message

use std::any::Any;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::cards::{render_error_card, DEFAULT_THEME};
use crate::http::request::QueryError;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub fn svg_response(svg: String, cache_control: &HeaderValue) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(SVG_CONTENT_TYPE)),
            (header::CACHE_CONTROL, cache_control.clone()),
        ],
        svg,
    )
        .into_response()
}

pub fn error_card_response(message: &str, theme: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(SVG_CONTENT_TYPE))],
        render_error_card(message, theme),
    )
        .into_response()
}

pub fn bad_request(err: QueryError) -> Response {
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

/// Turn a handler panic into the default error card.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Card handler panicked");
    error_card_response("Internal error while rendering the card", DEFAULT_THEME)
}
