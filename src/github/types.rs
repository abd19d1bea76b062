//! GitHub response shapes and error definitions.

use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::resilience::ResponseStatus;

/// Errors that can occur while talking to GitHub.
#[derive(Debug, Error)]
pub enum GithubError {
    /// GitHub answered with a non-success status.
    #[error("GitHub API responded with {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The call did not complete within the configured deadline.
    #[error("GitHub request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection or protocol failure before a response arrived.
    #[error("GitHub request failed: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected GitHub response: {0}")]
    Decode(String),

    /// GraphQL-level errors reported inside a successful response.
    #[error("{0}")]
    GraphQl(String),

    /// The login does not resolve to a user.
    #[error("Could not resolve to a User with the login of '{0}'.")]
    UserNotFound(String),

    /// Client could not be constructed.
    #[error("GitHub client setup failed: {0}")]
    Setup(String),
}

impl ResponseStatus for GithubError {
    fn response_status(&self) -> Option<StatusCode> {
        match self {
            GithubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// Aggregated profile numbers shown on the stats card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub login: String,
    pub name: Option<String>,
    pub total_stars: u64,
    pub total_commits: u64,
    pub total_pull_requests: u64,
    pub total_issues: u64,
    pub contributed_to: u64,
}

/// Commits attributed to one primary language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCount {
    pub name: String,
    pub color: String,
    pub commits: u64,
}

/// GraphQL envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorEntry {
    pub message: String,
}

/// Body of a REST error response.
#[derive(Debug, Deserialize)]
pub(crate) struct RestErrorBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData<U> {
    pub user: Option<U>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TotalCount {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsUser {
    pub login: String,
    pub name: Option<String>,
    pub contributions_collection: StatsContributions,
    pub repositories_contributed_to: TotalCount,
    pub pull_requests: TotalCount,
    pub issues: TotalCount,
    pub repositories: StarredRepositories,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsContributions {
    pub total_commit_contributions: u64,
    pub restricted_contributions_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StarredRepositories {
    pub nodes: Vec<StarredRepository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StarredRepository {
    pub stargazers: TotalCount,
}

impl From<StatsUser> for ProfileStats {
    fn from(user: StatsUser) -> Self {
        Self {
            login: user.login,
            name: user.name,
            total_stars: user.repositories.nodes.iter().map(|r| r.stargazers.total_count).sum(),
            total_commits: user.contributions_collection.total_commit_contributions
                + user.contributions_collection.restricted_contributions_count,
            total_pull_requests: user.pull_requests.total_count,
            total_issues: user.issues.total_count,
            contributed_to: user.repositories_contributed_to.total_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LanguageUser {
    pub contributions_collection: LanguageContributions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LanguageContributions {
    pub commit_contributions_by_repository: Vec<RepositoryContribution>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryContribution {
    pub repository: ContributedRepository,
    pub contributions: TotalCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributedRepository {
    pub primary_language: Option<PrimaryLanguage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrimaryLanguage {
    pub name: String,
    pub color: Option<String>,
}

/// `GET /search/commits` response.
#[derive(Debug, Deserialize)]
pub(crate) struct CommitSearch {
    pub items: Vec<CommitSearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitSearchItem {
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitAuthor {
    pub date: DateTime<FixedOffset>,
}
