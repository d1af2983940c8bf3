use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::orders::StrengthTag;
use crate::ConfigError;

/// File names of the three feeds inside the feeds directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedFiles {
    pub catalog: String,
    pub sales_t: String,
    pub sales_s: String,
}

impl Default for FeedFiles {
    fn default() -> Self {
        Self {
            catalog: "catalog.csv".to_string(),
            sales_t: "sales_t.csv".to_string(),
            sales_s: "sales_s.csv".to_string(),
        }
    }
}

/// Canned advice attached to each comparative row, keyed by strength tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionHints {
    pub t_strong: String,
    pub s_strong: String,
    pub balanced: String,
}

impl Default for ActionHints {
    fn default() -> Self {
        Self {
            t_strong: "review S visibility/pricing".to_string(),
            s_strong: "review T pricing or boost visibility".to_string(),
            balanced: "maintain parity".to_string(),
        }
    }
}

impl ActionHints {
    /// Returns the hint for `tag`. Total over every tag.
    #[must_use]
    pub fn hint_for(&self, tag: StrengthTag) -> &str {
        match tag {
            StrengthTag::TStrong => &self.t_strong,
            StrengthTag::SStrong => &self.s_strong,
            StrengthTag::Balanced => &self.balanced,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsFile {
    pub files: FeedFiles,
    pub action_hints: ActionHints,
}

/// Load and validate the feeds configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feeds_file(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let feeds_file: FeedsFile = serde_yaml::from_str(&content)?;

    validate_feeds(&feeds_file)?;

    Ok(feeds_file)
}

/// Like [`load_feeds_file`], but a missing file yields the built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_feeds_file_or_default(path: &Path) -> Result<FeedsFile, ConfigError> {
    if path.exists() {
        load_feeds_file(path)
    } else {
        Ok(FeedsFile::default())
    }
}

fn validate_feeds(feeds_file: &FeedsFile) -> Result<(), ConfigError> {
    let files = &feeds_file.files;
    let mut seen = HashSet::new();

    for (label, name) in [
        ("catalog", &files.catalog),
        ("sales_t", &files.sales_t),
        ("sales_s", &files.sales_s),
    ] {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "file name for '{label}' must be non-empty"
            )));
        }
        if !seen.insert(name.trim()) {
            return Err(ConfigError::Validation(format!(
                "file '{name}' is assigned to more than one feed"
            )));
        }
    }

    let hints = &feeds_file.action_hints;
    for (label, hint) in [
        ("t_strong", &hints.t_strong),
        ("s_strong", &hints.s_strong),
        ("balanced", &hints.balanced),
    ] {
        if hint.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "action hint '{label}' must be non-empty"
            )));
        }
    }

    Ok(())
}
