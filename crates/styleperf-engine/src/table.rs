//! Row-oriented string table with normalized headers.

use crate::error::EngineError;
use crate::loader::FeedName;

/// A feed as loaded: header names plus rows of raw string cells.
///
/// Headers are lowercased and trimmed on construction. Rows shorter than the
/// header are padded with empty cells so column lookups never go out of bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, normalizing headers and padding or truncating every
    /// row to the header width.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Convenience constructor from string slices.
    #[must_use]
    pub fn from_str_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    /// A feed with no columns and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `false` for a feed that arrived with no header at all.
    #[must_use]
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Position of the first column named `name` (already normalized).
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`Table::column`], but a missing column is a schema error for `feed`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] if no column is named `name`.
    pub fn require(&self, feed: FeedName, name: &str) -> Result<usize, EngineError> {
        self.column(name).ok_or_else(|| EngineError::Schema {
            feed,
            column: name.to_string(),
        })
    }
}

/// Returns the cell at `idx`, or `""` past the end of `row`.
#[must_use]
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

/// Lowercases and trims a header; also drops a leading byte-order mark that
/// spreadsheet exports like to prepend to the first column.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}
