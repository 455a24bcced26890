//! Run configuration.
//!
//! Values resolve in three layers: built-in defaults, then the optional TOML
//! settings file, then command line flags. The result is a [`RunConfig`],
//! which the pipeline reads through the [`ConfigProvider`] port.

#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;

use crate::adapters::github::DEFAULT_API_BASE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_patterns, validate_range, validate_url,
    Validate,
};
use chrono::NaiveDate;
use settings::Settings;
use std::fmt;

pub const DEFAULT_OUTPUT: &str = "pull_requests_analysis.csv";

#[derive(Clone)]
pub struct RunConfig {
    pub source_path: String,
    pub output_path: String,
    pub token: String,
    pub api_base: String,
    pub user_agent: String,
    pub per_page: u32,
    pub max_pages: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub exclude_bot_accounts: bool,
    pub bot_login_patterns: Vec<String>,
}

impl RunConfig {
    pub fn new(source_path: impl Into<String>, token: impl Into<String>) -> Self {
        Self::from_settings(source_path, token, Settings::default())
    }

    pub fn from_settings(
        source_path: impl Into<String>,
        token: impl Into<String>,
        settings: Settings,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            output_path: DEFAULT_OUTPUT.to_string(),
            token: token.into(),
            api_base: settings
                .github
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            user_agent: settings.github.user_agent,
            per_page: settings.github.per_page,
            max_pages: settings.github.max_pages,
            start_date: None,
            exclude_bot_accounts: settings.bots.exclude_bot_accounts,
            bot_login_patterns: settings.bots.login_patterns,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("source_path", &self.source_path)
            .field("output_path", &self.output_path)
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("per_page", &self.per_page)
            .field("max_pages", &self.max_pages)
            .field("start_date", &self.start_date)
            .field("exclude_bot_accounts", &self.exclude_bot_accounts)
            .field("bot_login_patterns", &self.bot_login_patterns)
            .finish()
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("ods", &self.source_path)?;
        validate_path("output", &self.output_path)?;
        validate_non_empty_string("token", &self.token)?;
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("github.user_agent", &self.user_agent)?;
        validate_range("github.per_page", self.per_page, 1, 100)?;
        if let Some(max_pages) = self.max_pages {
            validate_range("github.max_pages", max_pages, 1, u32::MAX)?;
        }
        validate_patterns("bots.login_patterns", &self.bot_login_patterns)?;
        Ok(())
    }
}

impl ConfigProvider for RunConfig {
    fn source_path(&self) -> &str {
        &self.source_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn exclude_bot_accounts(&self) -> bool {
        self.exclude_bot_accounts
    }

    fn bot_login_patterns(&self) -> &[String] {
        &self.bot_login_patterns
    }
}

/// Parses a `YYYY-MM-DD` cutoff date.
pub fn parse_start_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected a date as YYYY-MM-DD ({})", e))
}
