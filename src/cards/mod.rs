//! SVG card rendering.
//!
//! # Data Flow
//! ```text
//! GitHub data (github module)
//!     → stats.rs / commit_language.rs / productive_time.rs
//!     → svg.rs (shared frame, escaping) + theme.rs (colors)
//!     → SVG string
//!
//! Terminal failure:
//!     → error.rs (themed error card)
//! ```
//!
//! # Design Decisions
//! - Rendering is pure and infallible; all I/O happens before it
//! - Every piece of user-controlled text is XML-escaped
//! - Unknown theme names fall back to the default theme

pub mod commit_language;
pub mod error;
pub mod productive_time;
pub mod stats;
pub mod svg;
pub mod theme;
pub mod translate;

pub use error::render_error_card;
pub use theme::{theme, Theme, DEFAULT_THEME};

/// The cards served by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Stats,
    ProductiveTime,
    MostCommitLanguage,
}

impl CardKind {
    /// Analytics event name, also used as the metrics label.
    pub fn event_name(self) -> &'static str {
        match self {
            CardKind::Stats => "stats-card",
            CardKind::ProductiveTime => "productive-time-card",
            CardKind::MostCommitLanguage => "most-commit-language-card",
        }
    }
}
