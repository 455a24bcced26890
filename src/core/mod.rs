pub mod bot_filter;
pub mod etl;
pub mod fetcher;
pub mod pipeline;
pub mod stats;

pub use crate::domain::model::{FetchedPulls, PullRequest, RepoOutcome, RepoReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, PullRequestSource, Storage};
pub use crate::utils::error::Result;
