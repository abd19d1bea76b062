//! GitHub API integration.
//!
//! # Responsibilities
//! - Fetch the data each card needs (stats, commit languages, commit times)
//! - Report upstream failures with their HTTP status attached
//!
//! # Design Decisions
//! - One credential per call; the caller decides what to do on rejection
//! - Every call carries the configured deadline

pub mod client;
pub mod types;

pub use client::GithubClient;
pub use types::{GithubError, GithubResult, LanguageCount, ProfileStats};
