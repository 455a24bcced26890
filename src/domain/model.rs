use crate::utils::error::{Result, TurnaroundError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Owner and name of a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
}

impl RepositoryReference {
    /// Parses the last two path segments of a repository URL.
    ///
    /// A trailing slash and a trailing `.git` suffix are ignored, so
    /// `https://github.com/acme/widget.git` and `https://github.com/acme/widget/`
    /// give the same reference.
    pub fn parse(url: &str) -> Result<Self> {
        let malformed = || TurnaroundError::MalformedReference {
            url: url.to_string(),
        };

        let trimmed = url.trim();
        let parsed = Url::parse(trimmed)
            .or_else(|_| Url::parse(&format!("https://{}", trimmed)))
            .map_err(|_| malformed())?;
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(malformed());
        }

        let owner = segments[segments.len() - 2];
        let name = segments[segments.len() - 1];
        let name = name.strip_suffix(".git").unwrap_or(name);

        if name.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorKind {
    Human,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub login: String,
    pub kind: AuthorKind,
}

/// The fields of a GitHub pull request that the report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

/// Aggregate turnaround figures for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoReport {
    pub repo: String,
    pub num_prs: usize,
    pub avg_close_time_hours: Option<f64>,
    pub num_open_prs: usize,
    pub avg_age_open_prs_hours: Option<f64>,
}

impl RepoReport {
    /// All counts zero and both means absent.
    pub fn degenerate(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            num_prs: 0,
            avg_close_time_hours: None,
            num_open_prs: 0,
            avg_age_open_prs_hours: None,
        }
    }
}

/// Why the fetcher stopped asking for more pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EmptyPage,
    /// Every considered item on the last page predates the cutoff.
    OlderThanCutoff,
    PageLimit,
}

#[derive(Debug, Clone)]
pub struct FetchedPulls {
    pub reference: RepositoryReference,
    pub pulls: Vec<PullRequest>,
    pub pages_requested: u32,
    pub stop_reason: StopReason,
    pub skipped_bots: usize,
    pub discarded_before_cutoff: usize,
    pub ordering_violated: bool,
}

/// Result of fetching one input row.
#[derive(Debug)]
pub struct RepoFetch {
    /// Repository name, or the raw cell value when it could not be parsed.
    pub label: String,
    pub result: Result<FetchedPulls>,
}

#[derive(Debug)]
pub enum RepoOutcome {
    Analyzed(RepoReport),
    Failed {
        report: RepoReport,
        error: TurnaroundError,
    },
}

impl RepoOutcome {
    pub fn failed(label: impl Into<String>, error: TurnaroundError) -> Self {
        RepoOutcome::Failed {
            report: RepoReport::degenerate(label),
            error,
        }
    }

    pub fn report(&self) -> &RepoReport {
        match self {
            RepoOutcome::Analyzed(report) => report,
            RepoOutcome::Failed { report, .. } => report,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, RepoOutcome::Failed { .. })
    }
}
