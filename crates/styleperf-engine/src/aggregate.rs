//! Per-style totals for one marketplace.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use styleperf_core::{AggregateRow, NormalizedOrder, Platform};

/// Sums quantity and sales per style key for orders on `platform`.
///
/// Orders from the other marketplace are ignored. Output is sorted by style
/// key and contains one row per key that had at least one order, even when
/// its totals are zero.
#[must_use]
pub fn aggregate(orders: &[NormalizedOrder], platform: Platform) -> Vec<AggregateRow> {
    let mut totals: BTreeMap<&str, (u64, Decimal)> = BTreeMap::new();

    for order in orders.iter().filter(|o| o.platform == platform) {
        let entry = totals
            .entry(order.style_key.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 = entry.0.saturating_add(order.qty);
        entry.1 += order.gross;
    }

    totals
        .into_iter()
        .map(|(key, (qty, sales))| AggregateRow::new(key.to_string(), platform, qty, sales))
        .collect()
}
