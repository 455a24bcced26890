use thiserror::Error;

#[derive(Error, Debug)]
pub enum TurnaroundError {
    #[error("Cannot read spreadsheet '{path}': {reason}")]
    FileFormat { path: String, reason: String },

    #[error("Cannot derive owner/repo from '{url}'")]
    MalformedReference { url: String },

    #[error("Repository '{repo}' was not found or the token has no access to it")]
    RemoteNotFound { repo: String },

    #[error("GitHub returned HTTP {status} for '{repo}': {payload}")]
    Remote {
        repo: String,
        status: u16,
        payload: String,
    },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Confined to one repository; the batch carries on.
    Low,
    High,
    Critical,
}

impl TurnaroundError {
    /// Errors that only degenerate one repository's report.
    pub fn is_repository_scoped(&self) -> bool {
        matches!(
            self,
            TurnaroundError::MalformedReference { .. }
                | TurnaroundError::RemoteNotFound { .. }
                | TurnaroundError::Remote { .. }
                | TurnaroundError::Transport(_)
                | TurnaroundError::Payload(_)
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            _ if self.is_repository_scoped() => ErrorSeverity::Low,
            TurnaroundError::FileFormat { .. }
            | TurnaroundError::Csv(_)
            | TurnaroundError::Io(_) => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TurnaroundError::FileFormat { .. } => {
                "Check that the file is an .ods/.xlsx spreadsheet with at least one sheet"
            }
            TurnaroundError::MalformedReference { .. } => {
                "Use a full repository URL such as https://github.com/owner/repo"
            }
            TurnaroundError::RemoteNotFound { .. } => {
                "Check the repository name and that the token can read it"
            }
            TurnaroundError::Remote { status, .. } if *status == 401 || *status == 403 => {
                "Check the token and the API rate limit"
            }
            TurnaroundError::Remote { .. } | TurnaroundError::Payload(_) => {
                "Check the API base URL and try again later"
            }
            TurnaroundError::Transport(_) => "Check network connectivity to the GitHub API",
            TurnaroundError::Csv(_) | TurnaroundError::Io(_) => {
                "Check that the output location is writable"
            }
            TurnaroundError::Settings(_) => "Fix the syntax of the settings file",
            TurnaroundError::InvalidConfigValue { .. }
            | TurnaroundError::MissingConfig { .. } => "Review the command line arguments",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TurnaroundError::FileFormat { path, .. } => {
                format!("Could not read the repository list from {}", path)
            }
            TurnaroundError::Transport(_) => "Could not reach the GitHub API".to_string(),
            TurnaroundError::Csv(_) | TurnaroundError::Io(_) => {
                "Could not write the results file".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TurnaroundError>;
