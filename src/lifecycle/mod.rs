//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::watch_signals → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger (latched) → every signalled() future resolves
//!     → server stops accepting, drains
//! ```
//!
//! # Design Decisions
//! - One latched coordinator; anything long-running waits on it
//! - In-flight card requests finish before the server returns

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
