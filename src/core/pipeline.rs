use crate::adapters::csv_report;
use crate::adapters::github::GitHubClient;
use crate::adapters::spreadsheet::SpreadsheetSource;
use crate::core::fetcher::{FetchOptions, PullRequestFetcher};
use crate::core::stats;
use crate::domain::model::{RepoFetch, RepoOutcome, RepositoryReference};
use crate::domain::ports::{ConfigProvider, Pipeline, PullRequestSource, Storage};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

/// Spreadsheet in, one CSV row per repository out.
///
/// Repositories are handled one after another. A failure while fetching one
/// repository turns into a degenerate row for that repository only.
pub struct TurnaroundPipeline<St: Storage, C: ConfigProvider, S: PullRequestSource> {
    storage: St,
    config: C,
    fetcher: PullRequestFetcher<S>,
    clock: fn() -> DateTime<Utc>,
}

impl<St: Storage, C: ConfigProvider> TurnaroundPipeline<St, C, GitHubClient> {
    pub fn new(storage: St, config: C) -> Result<Self> {
        let client = GitHubClient::from_config(&config)?;
        Self::with_source(storage, config, client)
    }
}

impl<St: Storage, C: ConfigProvider, S: PullRequestSource> TurnaroundPipeline<St, C, S> {
    pub fn with_source(storage: St, config: C, source: S) -> Result<Self> {
        let options = FetchOptions::from_config(&config)?;
        Ok(Self {
            storage,
            config,
            fetcher: PullRequestFetcher::new(source, options),
            clock: Utc::now,
        })
    }

    /// Fetches one input row. The row is labelled with the repository name, or
    /// with the raw cell value when the URL cannot be parsed.
    async fn fetch_repository(&self, url: &str) -> RepoFetch {
        let result = self.fetcher.fetch(url).await;
        let label = match &result {
            Ok(pulls) => pulls.reference.name.clone(),
            Err(e) => {
                let label = RepositoryReference::parse(url)
                    .map(|reference| reference.name)
                    .unwrap_or_else(|_| url.to_string());
                tracing::warn!(repo = %label, "Repository analysis failed: {}", e);
                label
            }
        };
        RepoFetch { label, result }
    }

    /// Replaces the clock used as "now" for open pull request ages.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait::async_trait]
impl<St: Storage, C: ConfigProvider, S: PullRequestSource> Pipeline
    for TurnaroundPipeline<St, C, S>
{
    async fn extract(&self) -> Result<Vec<RepoFetch>> {
        let urls = SpreadsheetSource::new(&self.storage)
            .load_urls(self.config.source_path())
            .await?;

        let mut fetched = Vec::with_capacity(urls.len());
        for url in urls {
            fetched.push(self.fetch_repository(&url).await);
        }

        Ok(fetched)
    }

    async fn transform(&self, fetched: Vec<RepoFetch>) -> Result<Vec<RepoOutcome>> {
        let outcomes = fetched
            .into_iter()
            .map(|repo| match repo.result {
                Ok(pulls) => {
                    let report = stats::summarize(&repo.label, &pulls.pulls, (self.clock)());
                    tracing::debug!(
                        repo = %pulls.reference,
                        num_prs = report.num_prs,
                        num_open_prs = report.num_open_prs,
                        "Computed turnaround statistics"
                    );
                    RepoOutcome::Analyzed(report)
                }
                Err(error) => RepoOutcome::failed(repo.label, error),
            })
            .collect();

        Ok(outcomes)
    }

    async fn load(&self, outcomes: Vec<RepoOutcome>) -> Result<String> {
        let csv = csv_report::render(outcomes.iter().map(RepoOutcome::report))?;

        tracing::debug!("Writing {} bytes of CSV", csv.len());
        let output_path = self.config.output_path();
        self.storage.write_file(output_path, &csv).await?;

        Ok(output_path.to_string())
    }
}
