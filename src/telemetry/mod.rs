//! Usage analytics.
//!
//! # Data Flow
//! ```text
//! card served successfully
//!     → sink.rs report() (detached task)
//!     → payload.rs (client id hash, strip username, caller IP / UA)
//!     → collector (bounded timeout)
//!     → failure: logged, dropped
//! ```
//!
//! # Design Decisions
//! - Only runs in the production deployment with both identifiers configured
//! - Raw usernames never leave the process
//! - Nothing here can change the response already chosen for the caller

pub mod payload;
pub mod sink;

pub use payload::RequestMetadata;
pub use sink::{Delivery, TelemetryError, TelemetrySink};
