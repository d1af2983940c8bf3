//! Feed loading from CSV exports or caller-supplied tables.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use styleperf_core::FeedFiles;

use crate::error::EngineError;
use crate::table::Table;

/// The three inputs of a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedName {
    Catalog,
    SalesT,
    SalesS,
}

impl FeedName {
    pub const ALL: [FeedName; 3] = [FeedName::Catalog, FeedName::SalesT, FeedName::SalesS];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedName::Catalog => "CATALOG",
            FeedName::SalesT => "SALES-T",
            FeedName::SalesS => "SALES-S",
        }
    }
}

impl std::fmt::Display for FeedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can hand the engine a named table.
pub trait TableSource {
    /// Loads `feed` with normalized headers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FeedUnavailable`] if the feed cannot be read.
    fn load(&self, feed: FeedName) -> Result<Table, EngineError>;
}

/// Reads each feed from a CSV file inside one directory.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
    files: FeedFiles,
}

impl CsvDirSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: FeedFiles::default(),
        }
    }

    /// Overrides the default file names.
    #[must_use]
    pub fn with_files(mut self, files: FeedFiles) -> Self {
        self.files = files;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, feed: FeedName) -> PathBuf {
        let name = match feed {
            FeedName::Catalog => &self.files.catalog,
            FeedName::SalesT => &self.files.sales_t,
            FeedName::SalesS => &self.files.sales_s,
        };
        self.dir.join(name.trim())
    }
}

impl TableSource for CsvDirSource {
    fn load(&self, feed: FeedName) -> Result<Table, EngineError> {
        let path = self.path_for(feed);
        let file = File::open(&path).map_err(|e| EngineError::FeedUnavailable {
            feed,
            reason: format!("{}: {e}", path.display()),
        })?;
        let table = read_csv(feed, file)?;
        tracing::info!(
            feed = %feed,
            path = %path.display(),
            rows = table.len(),
            columns = table.columns().len(),
            "feed loaded"
        );
        Ok(table)
    }
}

/// Parses CSV from `reader` into a [`Table`].
///
/// Fields are trimmed, rows may be ragged, and invalid UTF-8 is replaced
/// rather than rejected. An input with no header line yields [`Table::empty`].
///
/// # Errors
///
/// Returns [`EngineError::FeedUnavailable`] if the underlying reader fails.
pub fn read_csv<R: Read>(feed: FeedName, reader: R) -> Result<Table, EngineError> {
    let unavailable = |e: csv::Error| EngineError::FeedUnavailable {
        feed,
        reason: e.to_string(),
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .byte_headers()
        .map_err(unavailable)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Ok(Table::empty());
    }

    let mut rows = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record.map_err(unavailable)?;
        if record.iter().all(<[u8]>::is_empty) {
            continue;
        }
        rows.push(
            record
                .iter()
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect(),
        );
    }

    Ok(Table::new(headers, rows))
}

/// Serves tables the caller already holds in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<FeedName, Table>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, feed: FeedName, table: Table) -> Self {
        self.tables.insert(feed, table);
        self
    }
}

impl TableSource for MemorySource {
    fn load(&self, feed: FeedName) -> Result<Table, EngineError> {
        self.tables
            .get(&feed)
            .cloned()
            .ok_or_else(|| EngineError::FeedUnavailable {
                feed,
                reason: "no table provided".to_string(),
            })
    }
}
