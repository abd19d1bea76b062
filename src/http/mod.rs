//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, tracing, panic recovery)
//!     → cards.rs (one handler per card)
//!     → request.rs (parse and validate the query)
//!     → resilience executor + GitHub client
//!     → response.rs (SVG, error card, or 400)
//!     → Send to client
//! ```

pub mod cards;
pub mod request;
pub mod response;
pub mod server;

pub use request::{QueryError, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
