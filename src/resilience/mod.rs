//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Card request:
//!     → executor.rs (take credential for slot 0, run the upstream operation)
//!     → On failure: classifier.rs (credential problem or not?)
//!     → credential problem: next slot, run again
//!     → anything else, or no slot left: terminal error to the handler
//! ```
//!
//! # Design Decisions
//! - Rotation, not waiting: a different credential has its own rate limit
//! - The pool size is the only retry bound
//! - Every upstream call has its own deadline (enforced by the GitHub client)

pub mod classifier;
pub mod executor;

pub use classifier::{classify, Classification, ResponseStatus};
pub use executor::{ExecuteError, RequestExecutor};
