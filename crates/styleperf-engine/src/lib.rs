//! Cross-marketplace reconciliation engine.
//!
//! Loads a catalog and two marketplace order feeds, resolves free-text
//! product labels back to catalog style keys, filters by status and date
//! window, and emits a per-style comparison with strength tags and action
//! hints. The run is a single synchronous pass; see [`pipeline`].

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod loader;
pub mod money;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod resolver;
pub mod stats;
pub mod table;
pub mod tagging;
pub mod view;
pub mod window;

pub use error::EngineError;
pub use loader::{CsvDirSource, FeedName, MemorySource, TableSource};
pub use pipeline::{compare_tables, run_comparison, ComparisonReport};
pub use resolver::{Resolution, StyleIndex};
pub use stats::{DropReason, DropStats};
pub use table::Table;
pub use tagging::TaggingRules;
pub use view::ResultView;
pub use window::Window;
