//! Credential pool subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (GITHUB_TOKEN_<n>, GITHUB_TOKEN)
//!     → env.rs (snapshot once at startup)
//!     → CredentialSource::credential(slot)
//!     → resilience::executor (one lookup per attempt)
//! ```
//!
//! # Design Decisions
//! - The pool is read-only after startup; concurrent lookups need no locking
//! - Slots are dense: the first missing slot ends the pool
//! - Secrets never appear in `Debug` output or logs

pub mod env;
pub mod types;

pub use env::EnvCredentialSource;
pub use types::{Credential, CredentialError, Slot, StaticCredentialSource};

/// An ordered, indexable pool of API credentials.
pub trait CredentialSource: Send + Sync {
    /// Return the credential stored at `slot`.
    ///
    /// Fails with [`CredentialError::Exhausted`] once no credential exists
    /// for the slot. Implementations must eventually fail for increasing
    /// slots, since the executor relies on that to terminate.
    fn credential(&self, slot: Slot) -> Result<Credential, CredentialError>;
}
