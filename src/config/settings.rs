use crate::adapters::github::{DEFAULT_PER_PAGE, DEFAULT_USER_AGENT};
use crate::core::bot_filter::DEFAULT_BOT_PATTERNS;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML settings file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub github: GitHubSettings,
    pub bots: BotSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub api_base: Option<String>,
    pub per_page: u32,
    pub user_agent: String,
    pub max_pages: Option<u32>,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: None,
            per_page: DEFAULT_PER_PAGE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_pages: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Skip authors whose account type is `Bot`.
    pub exclude_bot_accounts: bool,
    /// Regular expressions matched against the author login.
    pub login_patterns: Vec<String>,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            exclude_bot_accounts: true,
            login_patterns: DEFAULT_BOT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
