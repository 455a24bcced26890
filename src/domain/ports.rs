use crate::domain::model::{PullRequest, RepoFetch, RepoOutcome, RepositoryReference};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn token(&self) -> &str;
    fn api_base(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn per_page(&self) -> u32;
    fn max_pages(&self) -> Option<u32>;
    fn start_date(&self) -> Option<NaiveDate>;
    fn exclude_bot_accounts(&self) -> bool;
    fn bot_login_patterns(&self) -> &[String];
}

/// One page of a repository's pull request listing.
///
/// Implementations must return pull requests newest first; the fetcher
/// relies on that to stop early under a cutoff.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn fetch_page(&self, reference: &RepositoryReference, page: u32)
        -> Result<Vec<PullRequest>>;
}

#[async_trait]
impl<T: PullRequestSource + ?Sized> PullRequestSource for &T {
    async fn fetch_page(
        &self,
        reference: &RepositoryReference,
        page: u32,
    ) -> Result<Vec<PullRequest>> {
        (**self).fetch_page(reference, page).await
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RepoFetch>>;
    async fn transform(&self, fetched: Vec<RepoFetch>) -> Result<Vec<RepoOutcome>>;
    async fn load(&self, outcomes: Vec<RepoOutcome>) -> Result<String>;
}
