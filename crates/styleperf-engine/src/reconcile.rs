//! Outer join of the two marketplace aggregates.

use std::collections::BTreeMap;

use styleperf_core::{AggregateRow, ComparativeRow, Platform};

use crate::resolver::StyleIndex;
use crate::tagging::TaggingRules;

/// Joins per-platform aggregates on style key.
///
/// Every key present on either side produces one row; the missing side is
/// zero-filled. Rows come back sorted by style key, each carrying the
/// catalog image URL, its strength tag and the matching action hint.
#[must_use]
pub fn reconcile(
    t_rows: &[AggregateRow],
    s_rows: &[AggregateRow],
    index: &StyleIndex,
    rules: &TaggingRules,
) -> Vec<ComparativeRow> {
    let mut joined: BTreeMap<&str, (Option<&AggregateRow>, Option<&AggregateRow>)> =
        BTreeMap::new();
    for row in t_rows {
        joined.entry(row.style_key.as_str()).or_default().0 = Some(row);
    }
    for row in s_rows {
        joined.entry(row.style_key.as_str()).or_default().1 = Some(row);
    }

    joined
        .into_iter()
        .map(|(key, (t, s))| {
            let t = t
                .cloned()
                .unwrap_or_else(|| AggregateRow::zero(key.to_string(), Platform::T));
            let s = s
                .cloned()
                .unwrap_or_else(|| AggregateRow::zero(key.to_string(), Platform::S));
            let tag = rules.tag(t.qty, s.qty);
            ComparativeRow {
                style_key: key.to_string(),
                image_url: index.image_url(key).to_string(),
                t_qty: t.qty,
                t_sales: t.sales,
                t_aov: t.aov,
                s_qty: s.qty,
                s_sales: s.sales,
                s_aov: s.aov,
                tag,
                action_hint: rules.action_hint(tag).to_string(),
            }
        })
        .collect()
}
