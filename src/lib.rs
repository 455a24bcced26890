pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{github::GitHubClient, storage::LocalStorage};
pub use config::RunConfig;
pub use core::{etl::EtlEngine, pipeline::TurnaroundPipeline};
pub use utils::error::{Result, TurnaroundError};
