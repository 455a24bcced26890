use super::settings::Settings;
use super::{parse_start_date, RunConfig, DEFAULT_OUTPUT};
use crate::utils::error::Result;
use chrono::NaiveDate;
use clap::Parser;

#[derive(Clone, Parser)]
#[command(name = "pr-turnaround")]
#[command(about = "Pull request turnaround statistics for a spreadsheet of GitHub repositories")]
pub struct CliConfig {
    #[arg(long, help = "Spreadsheet (.ods) whose first column lists repository URLs")]
    pub ods: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub access token")]
    pub token: String,

    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    #[arg(long, value_parser = parse_start_date, help = "Only count pull requests created on or after this date (YYYY-MM-DD)")]
    pub start_date: Option<NaiveDate>,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "GitHub API root, e.g. for GitHub Enterprise")]
    pub api_base: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Merges the settings file (if any) under the command line flags.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        let mut config = RunConfig::from_settings(self.ods, self.token, settings);
        config.output_path = self.output;
        config.start_date = self.start_date;
        if let Some(api_base) = self.api_base {
            config.api_base = api_base;
        }

        Ok(config)
    }
}
