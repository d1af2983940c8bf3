//! Shared domain types and configuration for the styleperf workspace.

pub mod app_config;
pub mod config;
pub mod feeds;
pub mod orders;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use feeds::{load_feeds_file, load_feeds_file_or_default, ActionHints, FeedFiles, FeedsFile};
pub use orders::{AggregateRow, ComparativeRow, NormalizedOrder, Platform, StrengthTag};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read feeds file {path}: {source}")]
    FeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feeds file: {0}")]
    FeedsFileParse(#[from] serde_yaml::Error),

    #[error("feeds file validation failed: {0}")]
    Validation(String),
}
