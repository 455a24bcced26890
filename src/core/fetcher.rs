//! Paginated pull request retrieval for a single repository.
//!
//! The fetcher walks pages `1, 2, ...` of a [`PullRequestSource`], drops
//! authors matched by the [`BotFilter`] and, when a cutoff date is set, drops
//! pull requests created before it. Pagination ends on an empty page, on the
//! optional page limit, or as soon as a page holds no considered pull request
//! created on or after the cutoff. A page made only of bots satisfies that
//! rule and ends pagination.
//!
//! That last rule assumes the source lists pull requests newest first. The
//! fetcher checks this on every item it considers; once an item is newer than
//! its predecessor the early stop is switched off and the scan continues until
//! an empty page.

use crate::core::bot_filter::BotFilter;
use crate::domain::model::{FetchedPulls, RepositoryReference, StopReason};
use crate::domain::ports::{ConfigProvider, PullRequestSource};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Inclusive lower bound on the creation date.
    pub cutoff: Option<NaiveDate>,
    pub max_pages: Option<u32>,
    pub bot_filter: BotFilter,
}

impl FetchOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self {
            cutoff: config.start_date(),
            max_pages: config.max_pages(),
            bot_filter: BotFilter::new(
                config.exclude_bot_accounts(),
                config.bot_login_patterns(),
            )?,
        })
    }

    /// Midnight UTC at the start of the cutoff date.
    pub fn cutoff_instant(&self) -> Option<DateTime<Utc>> {
        self.cutoff
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }
}

pub struct PullRequestFetcher<S: PullRequestSource> {
    source: S,
    options: FetchOptions,
}

impl<S: PullRequestSource> PullRequestFetcher<S> {
    pub fn new(source: S, options: FetchOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Parses `url` and fetches every qualifying pull request of that repository.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPulls> {
        let reference = RepositoryReference::parse(url)?;
        self.fetch_reference(reference).await
    }

    pub async fn fetch_reference(&self, reference: RepositoryReference) -> Result<FetchedPulls> {
        let cutoff = self.options.cutoff_instant();
        if let Some(cutoff) = cutoff {
            tracing::debug!(repo = %reference, %cutoff, "Filtering pull requests created on or after cutoff");
        }

        let mut pulls = Vec::new();
        let mut pages_requested = 0u32;
        let mut skipped_bots = 0usize;
        let mut discarded_before_cutoff = 0usize;
        let mut ordering_violated = false;
        let mut previous_created: Option<DateTime<Utc>> = None;

        let stop_reason = loop {
            if self
                .options
                .max_pages
                .is_some_and(|max| pages_requested >= max)
            {
                tracing::warn!(
                    repo = %reference,
                    "Hit page limit ({}) before pagination finished. Data may be incomplete.",
                    pages_requested
                );
                break StopReason::PageLimit;
            }

            let page = pages_requested + 1;
            tracing::debug!(repo = %reference, page, "Requesting pull request page");
            let items = self.source.fetch_page(&reference, page).await?;
            pages_requested = page;

            if items.is_empty() {
                break StopReason::EmptyPage;
            }

            let mut any_on_or_after_cutoff = false;

            for pr in items {
                if self.options.bot_filter.is_bot(&pr.author) {
                    skipped_bots += 1;
                    continue;
                }

                if previous_created.is_some_and(|previous| pr.created_at > previous)
                    && !ordering_violated
                {
                    ordering_violated = true;
                    tracing::warn!(
                        repo = %reference,
                        page,
                        "Pull requests are not listed newest first; scanning all pages"
                    );
                }
                previous_created = Some(pr.created_at);

                match cutoff {
                    None => pulls.push(pr),
                    Some(cutoff) if pr.created_at >= cutoff => {
                        any_on_or_after_cutoff = true;
                        pulls.push(pr);
                    }
                    Some(_) => discarded_before_cutoff += 1,
                }
            }

            if cutoff.is_some() && !any_on_or_after_cutoff && !ordering_violated {
                break StopReason::OlderThanCutoff;
            }
        };

        tracing::info!(
            repo = %reference,
            pages = pages_requested,
            skipped_bots,
            "Found {} pull requests",
            pulls.len()
        );

        Ok(FetchedPulls {
            reference,
            pulls,
            pages_requested,
            stop_reason,
            skipped_bots,
            discarded_before_cutoff,
            ordering_violated,
        })
    }
}
