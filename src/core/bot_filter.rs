use crate::domain::model::{Author, AuthorKind};
use crate::utils::error::{Result, TurnaroundError};
use regex::RegexSet;

pub const DEFAULT_BOT_PATTERNS: &[&str] = &["^dependabot"];

/// Decides whether a pull request author is an automation account.
///
/// An author matches when its account kind is `Bot` (if enabled) or when its
/// login matches any of the configured patterns.
#[derive(Debug, Clone)]
pub struct BotFilter {
    exclude_bot_accounts: bool,
    login_patterns: RegexSet,
}

impl BotFilter {
    pub fn new<I, S>(exclude_bot_accounts: bool, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let login_patterns =
            RegexSet::new(patterns).map_err(|e| TurnaroundError::InvalidConfigValue {
                field: "bots.login_patterns".to_string(),
                value: e.to_string(),
                reason: "Invalid regular expression".to_string(),
            })?;

        Ok(Self {
            exclude_bot_accounts,
            login_patterns,
        })
    }

    pub fn is_bot(&self, author: &Author) -> bool {
        (self.exclude_bot_accounts && author.kind == AuthorKind::Bot)
            || self.login_patterns.is_match(&author.login)
    }
}

impl Default for BotFilter {
    fn default() -> Self {
        Self {
            exclude_bot_accounts: true,
            login_patterns: RegexSet::new(DEFAULT_BOT_PATTERNS)
                .unwrap_or_else(|_| RegexSet::empty()),
        }
    }
}
