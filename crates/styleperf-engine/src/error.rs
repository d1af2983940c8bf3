use chrono::NaiveDate;
use thiserror::Error;

use crate::loader::FeedName;

/// Run-level failures surfaced to the caller.
///
/// Row-level problems are never errors; they are dropped and counted in
/// [`crate::DropStats`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required input table could not be read.
    #[error("feed {feed} is unavailable: {reason}")]
    FeedUnavailable { feed: FeedName, reason: String },

    /// A feed has columns but lacks one the engine needs.
    #[error("feed {feed} is missing required column \"{column}\"")]
    Schema { feed: FeedName, column: String },

    /// Nothing survived the window filter on either marketplace.
    #[error("no orders fall inside the requested window")]
    NoData,

    /// The requested window ends before it starts.
    #[error("invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}
