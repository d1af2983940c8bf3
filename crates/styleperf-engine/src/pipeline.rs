//! End-to-end comparison run.
//!
//! Stages run in a fixed order: catalog index, per-feed normalization,
//! window filter, per-platform aggregation, reconciliation. Each stage is a
//! pure function of its inputs; the only I/O is the initial table load.

use styleperf_core::Platform;

use crate::aggregate::aggregate;
use crate::error::EngineError;
use crate::loader::{FeedName, TableSource};
use crate::normalize::{normalize_s_feed, normalize_t_feed};
use crate::reconcile::reconcile;
use crate::resolver::StyleIndex;
use crate::stats::DropStats;
use crate::table::Table;
use crate::tagging::TaggingRules;
use crate::view::ResultView;
use crate::window::Window;

/// Result of one run: the view plus every row that was dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    pub view: ResultView,
    pub drops: DropStats,
}

/// Loads the three feeds from `source` and runs the comparison.
///
/// # Errors
///
/// Returns [`EngineError::FeedUnavailable`] if any feed cannot be loaded, plus
/// every error [`compare_tables`] can return.
pub fn run_comparison(
    source: &impl TableSource,
    window: Window,
    rules: &TaggingRules,
) -> Result<ComparisonReport, EngineError> {
    let catalog = source.load(FeedName::Catalog)?;
    let sales_t = source.load(FeedName::SalesT)?;
    let sales_s = source.load(FeedName::SalesS)?;
    compare_tables(&catalog, &sales_t, &sales_s, window, rules)
}

/// Runs the comparison over tables already in memory.
///
/// # Errors
///
/// - [`EngineError::Schema`] if a feed with columns lacks a required one.
/// - [`EngineError::NoData`] if no order on either marketplace survives the
///   window filter.
pub fn compare_tables(
    catalog: &Table,
    sales_t: &Table,
    sales_s: &Table,
    window: Window,
    rules: &TaggingRules,
) -> Result<ComparisonReport, EngineError> {
    let index = StyleIndex::from_catalog(catalog)?;

    let t_feed = normalize_t_feed(sales_t, &index)?;
    let s_feed = normalize_s_feed(sales_s, &index)?;

    let mut drops = DropStats::default();
    drops.absorb(t_feed.drops);
    drops.absorb(s_feed.drops);

    let t_orders = window.retain(t_feed.orders, &mut drops);
    let s_orders = window.retain(s_feed.orders, &mut drops);

    if t_orders.is_empty() && s_orders.is_empty() {
        tracing::warn!(
            start = %window.start(),
            end = %window.end(),
            dropped = drops.total(),
            "no orders inside window"
        );
        return Err(EngineError::NoData);
    }

    let t_rows = aggregate(&t_orders, Platform::T);
    let s_rows = aggregate(&s_orders, Platform::S);
    let view = ResultView::new(reconcile(&t_rows, &s_rows, &index, rules));

    for (platform, reason, count) in drops.iter() {
        tracing::info!(platform = %platform, reason = %reason, count, "rows dropped");
    }
    tracing::info!(
        styles = view.len(),
        t_orders = t_orders.len(),
        s_orders = s_orders.len(),
        "comparison complete"
    );

    Ok(ComparisonReport { view, drops })
}
