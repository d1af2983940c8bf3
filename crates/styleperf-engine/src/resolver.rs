//! Style-number resolution against the catalog.
//!
//! [`StyleIndex`] is built once per run from the CATALOG feed and then
//! answers "which style is this label?" for both marketplaces. Lookups try,
//! in order: an exact key match, the style-number pattern, then a substring
//! scan over catalog keys in insertion order. The scan order is part of the
//! contract: when two keys are both substrings of a label, the one listed
//! first in the catalog wins.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::EngineError;
use crate::loader::FeedName;
use crate::table::{cell, Table};

pub const CATALOG_KEY_COLUMN: &str = "product_number";
pub const CATALOG_IMAGE_COLUMN: &str = "image_url";

/// One to three letters, three to five digits, an optional trailing letter or
/// digit.
///
/// Applied to the space-stripped label, so `\b` only fires where the original
/// label had punctuation around the style number (e.g. `"(AB123)"`), not
/// where it had spaces.
static STYLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{1,3}\d{3,5}[A-Z0-9]?)\b").expect("valid style number regex")
});

/// Which lookup step produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact,
    Pattern,
    Substring,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Exact => write!(f, "exact"),
            Resolution::Pattern => write!(f, "pattern"),
            Resolution::Substring => write!(f, "substring"),
        }
    }
}

/// Catalog keys in insertion order plus their image URLs.
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    keys: Vec<String>,
    positions: HashMap<String, usize>,
    images: HashMap<String, String>,
}

impl StyleIndex {
    /// Builds the index from the CATALOG feed.
    ///
    /// A catalog with no columns at all yields an empty index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] if the catalog has columns but no
    /// `product_number` column.
    pub fn from_catalog(catalog: &Table) -> Result<Self, EngineError> {
        let mut index = Self::default();
        if !catalog.has_columns() {
            tracing::warn!(feed = %FeedName::Catalog, "catalog has no columns; index is empty");
            return Ok(index);
        }

        let key_col = catalog.require(FeedName::Catalog, CATALOG_KEY_COLUMN)?;
        let image_col = catalog.column(CATALOG_IMAGE_COLUMN);

        for row in catalog.rows() {
            let image = image_col.map(|idx| cell(row, idx));
            index.insert(cell(row, key_col), image);
        }

        tracing::info!(
            styles = index.len(),
            images = index.images.len(),
            "style index built"
        );
        Ok(index)
    }

    /// Builds an index from bare keys, in order. Mostly useful in tests.
    #[must_use]
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut index = Self::default();
        for key in keys {
            index.insert(key, None);
        }
        index
    }

    /// Adds a catalog entry. Returns `false` if the key was blank or already
    /// present; the first occurrence keeps its position.
    ///
    /// The first http(s) image URL seen for a key is kept.
    pub fn insert(&mut self, raw_key: &str, image_url: Option<&str>) -> bool {
        let key = canonical_key(raw_key);
        if key.is_empty() {
            return false;
        }

        if let Some(url) = image_url.map(str::trim).filter(|u| is_http_url(u)) {
            self.images.entry(key.clone()).or_insert_with(|| url.to_string());
        }

        if self.positions.contains_key(&key) {
            tracing::debug!(style_key = %key, "duplicate catalog key ignored");
            return false;
        }
        self.positions.insert(key.clone(), self.keys.len());
        self.keys.push(key);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `true` if `key` is a canonical catalog key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Canonical keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Image URL for a canonical key, or `""`.
    #[must_use]
    pub fn image_url(&self, key: &str) -> &str {
        self.images.get(key).map_or("", String::as_str)
    }

    /// Resolves a raw product label to a canonical key.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.resolve_with_method(label).map(|(key, _)| key)
    }

    /// Like [`StyleIndex::resolve`], also reporting which step matched.
    #[must_use]
    pub fn resolve_with_method(&self, label: &str) -> Option<(&str, Resolution)> {
        let s_key = canonical_key(label);
        if s_key.is_empty() {
            return None;
        }

        if let Some(key) = self.lookup(&s_key) {
            return Some((key, Resolution::Exact));
        }

        if let Some(found) = STYLE_PATTERN.captures(&s_key).and_then(|c| c.get(1)) {
            let candidate = strip_spaces(found.as_str());
            if let Some(key) = self.lookup(&candidate) {
                return Some((key, Resolution::Pattern));
            }
        }

        self.keys
            .iter()
            .find(|k| s_key.contains(k.as_str()))
            .map(|k| (k.as_str(), Resolution::Substring))
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.positions.get(key).map(|&pos| self.keys[pos].as_str())
    }
}

/// Uppercases and removes ASCII spaces. Other whitespace is kept.
#[must_use]
pub fn canonical_key(raw: &str) -> String {
    strip_spaces(&raw.to_uppercase())
}

fn strip_spaces(s: &str) -> String {
    s.replace(' ', "")
}

fn is_http_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("http://") && lower.len() > "http://".len())
        || (lower.starts_with("https://") && lower.len() > "https://".len())
}
