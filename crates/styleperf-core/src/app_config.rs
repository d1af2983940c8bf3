use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings for a comparison run.
///
/// Feed contents never live here; the engine receives ready-to-read tables
/// and this struct only says where to find them and how to tag results.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory holding the catalog and the two marketplace order exports.
    pub feeds_dir: PathBuf,
    /// Optional YAML file overriding feed file names and action hints.
    pub feeds_path: PathBuf,
    /// Multiplier one side must reach over the other to be tagged strong.
    pub strength_ratio: Decimal,
    /// Minimum unit count a side needs before it can be tagged strong.
    pub min_strong_qty: u64,
}
