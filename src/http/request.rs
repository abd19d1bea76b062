//! Request parsing and validation.
//!
//! # Responsibilities
//! - Parse the raw query string into named parameters
//! - Validate each card's parameters and apply defaults
//! - Name the offending parameter in every validation error
//!
//! # Design Decisions
//! - A parameter is a string only when it appears exactly once; a missing
//!   required parameter or a repeated one (an array) is rejected
//! - Checks run in a fixed order (theme, username, card specific) so the
//!   first reported problem is stable
//! - `NotAString` becomes a 400; `NotANumber` is a well-typed value and is
//!   answered with the error card instead

use std::collections::HashMap;
use thiserror::Error;

use crate::cards::translate::parse_exclude_list;
use crate::cards::DEFAULT_THEME;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Invalid card query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),
}

/// Query parameters, keeping every occurrence of each name.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, Vec<String>>);

impl QueryParams {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            params.entry(name.into_owned()).or_default().push(value.into_owned());
        }
        Self(params)
    }

    /// A required single-valued parameter.
    pub fn string(&self, name: &'static str) -> Result<String, QueryError> {
        match self.0.get(name).map(Vec::as_slice) {
            Some([value]) => Ok(value.clone()),
            _ => Err(QueryError::NotAString(name)),
        }
    }

    /// An optional single-valued parameter with a default.
    pub fn string_or(&self, name: &'static str, default: &str) -> Result<String, QueryError> {
        match self.0.get(name).map(Vec::as_slice) {
            None => Ok(default.to_string()),
            Some([value]) => Ok(value.clone()),
            Some(_) => Err(QueryError::NotAString(name)),
        }
    }
}

/// `GET /api/cards/stats`
#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuery {
    pub username: String,
    pub theme: String,
}

impl StatsQuery {
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        let theme = params.string_or("theme", DEFAULT_THEME)?;
        let username = params.string("username")?;
        Ok(Self { username, theme })
    }
}

/// `GET /api/cards/productive-time`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductiveTimeQuery {
    pub username: String,
    pub theme: String,
    /// The offset as given, for analytics.
    pub utc_offset_raw: String,
    pub utc_offset: f64,
}

impl ProductiveTimeQuery {
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        let theme = params.string_or("theme", DEFAULT_THEME)?;
        let username = params.string("username")?;
        let utc_offset_raw = params.string_or("utcOffset", "0")?;
        let utc_offset = parse_offset(&utc_offset_raw).ok_or(QueryError::NotANumber("utcOffset"))?;
        Ok(Self {
            username,
            theme,
            utc_offset_raw,
            utc_offset,
        })
    }
}

/// Hours east of UTC; an empty value means `0`. Must lie within ±14 hours.
fn parse_offset(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (-14.0..=14.0).contains(v))
}

/// `GET /api/cards/most-commit-language`
#[derive(Debug, Clone, PartialEq)]
pub struct CommitLanguageQuery {
    pub username: String,
    pub theme: String,
    /// Lowercased language names, aliases translated.
    pub exclude: Vec<String>,
}

impl CommitLanguageQuery {
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        let theme = params.string_or("theme", DEFAULT_THEME)?;
        let username = params.string("username")?;
        let exclude = params.string_or("exclude", "")?;
        Ok(Self {
            username,
            theme,
            exclude: parse_exclude_list(&exclude),
        })
    }
}
