//! Currency strings to decimals.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a marketplace money string such as `"$1,234.50"` or `"USD 12.00"`.
///
/// Every character other than ASCII digits, `.` and `-` is discarded before
/// parsing. Returns `None` when nothing numeric remains or the remainder is
/// not a valid decimal (e.g. `"1.2.3"`).
#[must_use]
pub fn parse_money(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
