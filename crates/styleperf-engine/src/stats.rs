//! Row-drop accounting.

use std::collections::BTreeMap;

use styleperf_core::Platform;

/// Why a raw order row did not make it into the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropReason {
    /// T rows not shipped/delivered, S rows refunded.
    StatusExcluded,
    /// The product label matched no catalog key.
    UnresolvedStyle,
    /// The date column could not be parsed.
    MissingTimestamp,
    /// Parsed, but outside the requested window.
    OutsideWindow,
}

impl DropReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::StatusExcluded => "status_excluded",
            DropReason::UnresolvedStyle => "unresolved_style",
            DropReason::MissingTimestamp => "missing_timestamp",
            DropReason::OutsideWindow => "outside_window",
        }
    }
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `rows_dropped_by_reason`, split per marketplace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropStats {
    counts: BTreeMap<(Platform, DropReason), usize>,
}

impl DropStats {
    pub fn record(&mut self, platform: Platform, reason: DropReason) {
        *self.counts.entry((platform, reason)).or_insert(0) += 1;
    }

    /// Folds another set of counts into this one.
    pub fn absorb(&mut self, other: DropStats) {
        for (key, n) in other.counts {
            *self.counts.entry(key).or_insert(0) += n;
        }
    }

    #[must_use]
    pub fn count(&self, platform: Platform, reason: DropReason) -> usize {
        self.counts.get(&(platform, reason)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Non-zero counts ordered by platform, then reason.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, DropReason, usize)> + '_ {
        self.counts
            .iter()
            .map(|(&(platform, reason), &n)| (platform, reason, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_count() {
        let mut stats = DropStats::default();
        stats.record(Platform::T, DropReason::StatusExcluded);
        stats.record(Platform::T, DropReason::StatusExcluded);
        stats.record(Platform::S, DropReason::UnresolvedStyle);
        assert_eq!(stats.count(Platform::T, DropReason::StatusExcluded), 2);
        assert_eq!(stats.count(Platform::S, DropReason::UnresolvedStyle), 1);
        assert_eq!(stats.count(Platform::S, DropReason::OutsideWindow), 0);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn absorb_adds_counts() {
        let mut a = DropStats::default();
        a.record(Platform::S, DropReason::MissingTimestamp);
        let mut b = DropStats::default();
        b.record(Platform::S, DropReason::MissingTimestamp);
        b.record(Platform::T, DropReason::OutsideWindow);
        a.absorb(b);
        assert_eq!(a.count(Platform::S, DropReason::MissingTimestamp), 2);
        assert_eq!(a.count(Platform::T, DropReason::OutsideWindow), 1);
    }

    #[test]
    fn iter_orders_by_platform_then_reason() {
        let mut stats = DropStats::default();
        stats.record(Platform::S, DropReason::StatusExcluded);
        stats.record(Platform::T, DropReason::OutsideWindow);
        stats.record(Platform::T, DropReason::StatusExcluded);
        let order: Vec<_> = stats.iter().map(|(p, r, _)| (p, r)).collect();
        assert_eq!(
            order,
            vec![
                (Platform::T, DropReason::StatusExcluded),
                (Platform::T, DropReason::OutsideWindow),
                (Platform::S, DropReason::StatusExcluded),
            ]
        );
    }

    #[test]
    fn reason_labels() {
        assert_eq!(DropReason::UnresolvedStyle.to_string(), "unresolved_style");
        assert!(DropStats::default().is_empty());
    }
}
