//! Failure classification.
//!
//! # Responsibilities
//! - Decide whether a failed attempt should rotate to the next credential
//!
//! # Design Decisions
//! - Only the attached HTTP status is consulted, never messages or variants
//! - 401 and 403 rotate; everything else stops the loop
//! - Errors without a status (network, timeout, decode) are terminal

use axum::http::StatusCode;

/// Errors that may carry the status of an upstream HTTP response.
pub trait ResponseStatus {
    /// Status of the upstream response that caused this error, if any.
    fn response_status(&self) -> Option<StatusCode>;
}

/// Outcome of classifying a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The credential was rejected or rate limited; try the next one.
    RetryableAuth,
    /// Not attributable to the credential; stop.
    Terminal,
}

/// Classify an error by its attached response status.
pub fn classify<E: ResponseStatus + ?Sized>(error: &E) -> Classification {
    match error.response_status() {
        Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => Classification::RetryableAuth,
        _ => Classification::Terminal,
    }
}
