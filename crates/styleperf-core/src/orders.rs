use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marketplace an order row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    T,
    S,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::T => write!(f, "T"),
            Platform::S => write!(f, "S"),
        }
    }
}

/// Which marketplace outperforms for a style within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrengthTag {
    #[serde(rename = "T-strong")]
    TStrong,
    #[serde(rename = "S-strong")]
    SStrong,
    #[serde(rename = "balanced")]
    Balanced,
}

impl StrengthTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthTag::TStrong => "T-strong",
            StrengthTag::SStrong => "S-strong",
            StrengthTag::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for StrengthTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One order line from either marketplace after date, money, status and
/// style-key normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOrder {
    /// Canonical catalog key the raw product label resolved to.
    pub style_key: String,
    /// Naive wall-clock time as reported by the marketplace. `None` when the
    /// raw date could not be parsed; the window filter drops those rows.
    pub ts: Option<NaiveDateTime>,
    /// Lowercased order status.
    pub status: String,
    pub qty: u64,
    /// Line revenue; never negative.
    pub gross: Decimal,
    pub platform: Platform,
}

/// Per-`(style_key, platform)` totals for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub style_key: String,
    pub platform: Platform,
    pub qty: u64,
    pub sales: Decimal,
    pub aov: Decimal,
}

impl AggregateRow {
    /// Builds a row from totals, deriving `aov`.
    #[must_use]
    pub fn new(style_key: String, platform: Platform, qty: u64, sales: Decimal) -> Self {
        let aov = average_order_value(sales, qty);
        Self {
            style_key,
            platform,
            qty,
            sales,
            aov,
        }
    }

    /// The zero row used when a style has no orders on `platform`.
    #[must_use]
    pub fn zero(style_key: String, platform: Platform) -> Self {
        Self::new(style_key, platform, 0, Decimal::ZERO)
    }
}

/// `sales / qty` when `qty > 0`, otherwise zero.
#[must_use]
pub fn average_order_value(sales: Decimal, qty: u64) -> Decimal {
    if qty == 0 {
        return Decimal::ZERO;
    }
    sales
        .checked_div(Decimal::from(qty))
        .unwrap_or(Decimal::ZERO)
}

/// One line of the reconciled cross-marketplace view.
///
/// Field order matches the published column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparativeRow {
    pub style_key: String,
    /// Catalog image URL, or empty when absent or not http(s).
    pub image_url: String,
    pub t_qty: u64,
    pub t_sales: Decimal,
    pub t_aov: Decimal,
    pub s_qty: u64,
    pub s_sales: Decimal,
    pub s_aov: Decimal,
    pub tag: StrengthTag,
    pub action_hint: String,
}
