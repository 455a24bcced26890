use crate::domain::model::{Author, AuthorKind, PullRequest, RepositoryReference};
use crate::domain::ports::{ConfigProvider, PullRequestSource};
use crate::utils::error::{Result, TurnaroundError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_USER_AGENT: &str = "pr-turnaround";

#[derive(Debug, Deserialize)]
struct PullRequestRecord {
    user: Option<UserRecord>,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    login: String,
    #[serde(rename = "type")]
    kind: String,
}

impl From<PullRequestRecord> for PullRequest {
    fn from(record: PullRequestRecord) -> Self {
        // A null user is a deleted account, which GitHub shows as "ghost".
        let author = match record.user {
            Some(user) => Author {
                kind: if user.kind == "Bot" {
                    AuthorKind::Bot
                } else {
                    AuthorKind::Human
                },
                login: user.login,
            },
            None => Author {
                login: "ghost".to_string(),
                kind: AuthorKind::Human,
            },
        };

        PullRequest {
            author,
            created_at: record.created_at,
            closed_at: record.closed_at,
        }
    }
}

/// Lists pull requests through `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(api_base: &str, token: &str, user_agent: &str, per_page: u32) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value("token", &format!("token {}", token))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, header_value("user_agent", user_agent)?);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            per_page,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base(),
            config.token(),
            config.user_agent(),
            config.per_page(),
        )
    }

    fn pulls_url(&self, reference: &RepositoryReference) -> String {
        format!(
            "{}/repos/{}/{}/pulls",
            self.api_base, reference.owner, reference.name
        )
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|e| TurnaroundError::InvalidConfigValue {
        field: field.to_string(),
        value: String::new(),
        reason: format!("Not a valid HTTP header value: {}", e),
    })?;
    header.set_sensitive(field == "token");
    Ok(header)
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn fetch_page(
        &self,
        reference: &RepositoryReference,
        page: u32,
    ) -> Result<Vec<PullRequest>> {
        let response = self
            .client
            .get(self.pulls_url(reference))
            .query(&[
                ("state", "all".to_string()),
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(repo = %reference, page, "API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(TurnaroundError::RemoteNotFound {
                repo: reference.name.clone(),
            });
        }

        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(TurnaroundError::Remote {
                repo: reference.name.clone(),
                status: status.as_u16(),
                payload: body,
            });
        }

        let records: Vec<PullRequestRecord> = serde_json::from_str(&body)?;
        Ok(records.into_iter().map(PullRequest::from).collect())
    }
}
