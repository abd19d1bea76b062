//! GitHub API client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue GraphQL and REST calls authenticated with one credential
//! - Map non-success responses to errors that keep their status
//! - Turn GraphQL error arrays and missing users into terminal errors
//!
//! The client never retries on its own; credential rotation happens one
//! level up in the request executor.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::GithubConfig;
use crate::credentials::Credential;
use crate::github::types::*;

const STATS_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    login
    name
    contributionsCollection {
      totalCommitContributions
      restrictedContributionsCount
    }
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST, REPOSITORY]) {
      totalCount
    }
    pullRequests(first: 1) {
      totalCount
    }
    issues {
      totalCount
    }
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}) {
      nodes {
        stargazers {
          totalCount
        }
      }
    }
  }
}
"#;

const COMMIT_LANGUAGE_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    contributionsCollection {
      commitContributionsByRepository(maxRepositories: 100) {
        repository {
          primaryLanguage {
            name
            color
          }
        }
        contributions {
          totalCount
        }
      }
    }
  }
}
"#;

/// Fallback color for languages GitHub has no color for.
const UNKNOWN_LANGUAGE_COLOR: &str = "#586e75";

/// Thin GitHub client; cheap to clone.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    timeout_secs: u64,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> GithubResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GithubError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Stars, commits, pull requests, issues and contributed-to counts.
    pub async fn profile_stats(&self, credential: &Credential, username: &str) -> GithubResult<ProfileStats> {
        let data: UserData<StatsUser> = self.graphql(credential, STATS_QUERY, json!({ "login": username })).await?;
        let user = data
            .user
            .ok_or_else(|| GithubError::UserNotFound(username.to_string()))?;
        Ok(user.into())
    }

    /// Commit counts per primary language, most used first.
    pub async fn commit_languages(&self, credential: &Credential, username: &str) -> GithubResult<Vec<LanguageCount>> {
        let data: UserData<LanguageUser> = self
            .graphql(credential, COMMIT_LANGUAGE_QUERY, json!({ "login": username }))
            .await?;
        let user = data
            .user
            .ok_or_else(|| GithubError::UserNotFound(username.to_string()))?;

        let mut totals: BTreeMap<String, LanguageCount> = BTreeMap::new();
        for contribution in user.contributions_collection.commit_contributions_by_repository {
            let Some(language) = contribution.repository.primary_language else {
                continue;
            };
            let entry = totals.entry(language.name.clone()).or_insert_with(|| LanguageCount {
                name: language.name,
                color: language.color.unwrap_or_else(|| UNKNOWN_LANGUAGE_COLOR.to_string()),
                commits: 0,
            });
            entry.commits += contribution.contributions.total_count;
        }

        let mut languages: Vec<LanguageCount> = totals.into_values().collect();
        languages.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name)));
        Ok(languages)
    }

    /// Author timestamps of the user's most recent commits.
    pub async fn commit_times(
        &self,
        credential: &Credential,
        username: &str,
    ) -> GithubResult<Vec<chrono::DateTime<chrono::FixedOffset>>> {
        let url = format!("{}/search/commits", self.api_url);
        let query = format!("author:{}", username);
        let request = self
            .http
            .get(url)
            .bearer_auth(credential.expose())
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", query.as_str()),
                ("sort", "author-date"),
                ("order", "desc"),
                ("per_page", "100"),
            ]);

        let search: CommitSearch = self.send_json(request).await?;
        Ok(search.items.into_iter().map(|item| item.commit.author.date).collect())
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        query: &str,
        variables: Value,
    ) -> GithubResult<T> {
        let request = self
            .http
            .post(format!("{}/graphql", self.api_url))
            .header(AUTHORIZATION, format!("bearer {}", credential.expose()))
            .json(&json!({ "query": query, "variables": variables }));

        let envelope: GraphQlResponse<T> = self.send_json(request).await?;
        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(GithubError::GraphQl(messages.join("; ")));
        }
        envelope
            .data
            .ok_or_else(|| GithubError::Decode("GraphQL response has no data".to_string()))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> GithubResult<T> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RestErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(GithubError::Status { status, message });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body).map_err(|e| GithubError::Decode(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> GithubError {
        if e.is_timeout() {
            GithubError::Timeout(self.timeout_secs)
        } else {
            GithubError::Network(e.to_string())
        }
    }
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Slot;
    use axum::{extract::Query, http::HeaderMap, http::StatusCode, routing::{get, post}, Json, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> GithubClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        GithubClient::new(&GithubConfig {
            api_url: format!("http://{}/", addr),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap()
    }

    fn credential() -> Credential {
        Credential::new(Slot::FIRST, "token-0")
    }

    #[tokio::test]
    async fn test_rejected_credential_keeps_status() {
        let router = Router::new().route(
            "/graphql",
            post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Bad credentials" }))) }),
        );
        let client = serve(router).await;

        match client.profile_stats(&credential(), "alice").await {
            Err(GithubError::Status { status, message }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_graphql_errors_are_terminal() {
        let router = Router::new().route(
            "/graphql",
            post(|| async {
                Json(json!({
                    "data": { "user": null },
                    "errors": [{ "message": "Could not resolve to a User with the login of 'ghost'." }]
                }))
            }),
        );
        let client = serve(router).await;

        let err = client.commit_languages(&credential(), "ghost").await.unwrap_err();
        assert!(matches!(err, GithubError::GraphQl(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn test_commit_languages_aggregate_and_sort() {
        let router = Router::new().route(
            "/graphql",
            post(|headers: HeaderMap| async move {
                assert_eq!(headers.get("authorization").unwrap(), "bearer token-0");
                Json(json!({ "data": { "user": { "contributionsCollection": {
                    "commitContributionsByRepository": [
                        { "repository": { "primaryLanguage": { "name": "Rust", "color": "#dea584" } }, "contributions": { "totalCount": 10 } },
                        { "repository": { "primaryLanguage": { "name": "Go", "color": null } }, "contributions": { "totalCount": 25 } },
                        { "repository": { "primaryLanguage": null }, "contributions": { "totalCount": 99 } },
                        { "repository": { "primaryLanguage": { "name": "Rust", "color": "#dea584" } }, "contributions": { "totalCount": 20 } }
                    ]
                } } } }))
            }),
        );
        let client = serve(router).await;

        let languages = client.commit_languages(&credential(), "alice").await.unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].name, "Rust");
        assert_eq!(languages[0].commits, 30);
        assert_eq!(languages[1].color, UNKNOWN_LANGUAGE_COLOR);
    }

    #[tokio::test]
    async fn test_commit_times_from_search() {
        let router = Router::new().route(
            "/search/commits",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("q").map(String::as_str), Some("author:alice"));
                Json(json!({ "items": [
                    { "commit": { "author": { "date": "2024-01-01T10:00:00Z" } } },
                    { "commit": { "author": { "date": "2024-01-02T22:15:00.000+09:00" } } }
                ] }))
            }),
        );
        let client = serve(router).await;

        let times = client.commit_times(&credential(), "alice").await.unwrap();
        assert_eq!(times.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        let client = GithubClient::new(&GithubConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        let err = client.profile_stats(&credential(), "alice").await.unwrap_err();
        assert!(matches!(err, GithubError::Network(_) | GithubError::Timeout(_)));
    }
}
