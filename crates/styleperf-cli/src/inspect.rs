//! Diagnostic commands: `resolve` and `validate`.

use styleperf_engine::normalize::{normalize_s_feed, normalize_t_feed};
use styleperf_engine::{FeedName, StyleIndex, TableSource};

/// Prints how each label resolves against the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no
/// `product_number` column.
pub(crate) fn run_resolve(source: &impl TableSource, labels: &[String]) -> anyhow::Result<()> {
    let catalog = source.load(FeedName::Catalog)?;
    let index = StyleIndex::from_catalog(&catalog)?;

    for label in labels {
        println!("{}", resolve_line(&index, label));
    }
    Ok(())
}

pub(crate) fn resolve_line(index: &StyleIndex, label: &str) -> String {
    match index.resolve_with_method(label) {
        Some((key, method)) => format!("{label}\t{key}\t{method}"),
        None => format!("{label}\t-\tunresolved"),
    }
}

/// Loads all three feeds, checks required columns, and prints row counts.
///
/// # Errors
///
/// Returns the first load or schema error encountered.
pub(crate) fn run_validate(source: &impl TableSource) -> anyhow::Result<()> {
    let catalog = source.load(FeedName::Catalog)?;
    let index = StyleIndex::from_catalog(&catalog)?;
    println!(
        "{:<9}{:>8} rows{:>8} styles",
        FeedName::Catalog.as_str(),
        catalog.len(),
        index.len()
    );

    let sales_t = source.load(FeedName::SalesT)?;
    let t_feed = normalize_t_feed(&sales_t, &index)?;
    println!(
        "{:<9}{:>8} rows{:>8} kept{:>8} dropped",
        FeedName::SalesT.as_str(),
        sales_t.len(),
        t_feed.orders.len(),
        t_feed.drops.total()
    );

    let sales_s = source.load(FeedName::SalesS)?;
    let s_feed = normalize_s_feed(&sales_s, &index)?;
    println!(
        "{:<9}{:>8} rows{:>8} kept{:>8} dropped",
        FeedName::SalesS.as_str(),
        sales_s.len(),
        s_feed.orders.len(),
        s_feed.drops.total()
    );

    Ok(())
}
