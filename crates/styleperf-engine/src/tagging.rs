//! Strength tagging and action hints.

use rust_decimal::Decimal;
use styleperf_core::{ActionHints, AppConfig, StrengthTag};

/// Default multiplier one side must reach over the other.
pub const DEFAULT_STRENGTH_RATIO: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// Default minimum units before a side can be called strong.
pub const DEFAULT_MIN_STRONG_QTY: u64 = 3;

/// Thresholds and hint texts used to label each comparative row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggingRules {
    pub strength_ratio: Decimal,
    pub min_strong_qty: u64,
    pub hints: ActionHints,
}

impl Default for TaggingRules {
    fn default() -> Self {
        Self {
            strength_ratio: DEFAULT_STRENGTH_RATIO,
            min_strong_qty: DEFAULT_MIN_STRONG_QTY,
            hints: ActionHints::default(),
        }
    }
}

impl TaggingRules {
    #[must_use]
    pub fn from_config(config: &AppConfig, hints: ActionHints) -> Self {
        Self {
            strength_ratio: config.strength_ratio,
            min_strong_qty: config.min_strong_qty,
            hints,
        }
    }

    /// Labels a style from its unit counts on each side.
    ///
    /// T is checked first: `t_qty >= ratio * s_qty` with at least
    /// `min_strong_qty` units. The S check mirrors it. Anything else is
    /// balanced. Comparisons are exact decimal arithmetic.
    #[must_use]
    pub fn tag(&self, t_qty: u64, s_qty: u64) -> StrengthTag {
        if self.is_strong(t_qty, s_qty) {
            StrengthTag::TStrong
        } else if self.is_strong(s_qty, t_qty) {
            StrengthTag::SStrong
        } else {
            StrengthTag::Balanced
        }
    }

    #[must_use]
    pub fn action_hint(&self, tag: StrengthTag) -> &str {
        self.hints.hint_for(tag)
    }

    fn is_strong(&self, side: u64, other: u64) -> bool {
        if side < self.min_strong_qty {
            return false;
        }
        Decimal::from(side) >= self.strength_ratio * Decimal::from(other)
    }
}
