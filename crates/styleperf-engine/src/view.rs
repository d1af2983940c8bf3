//! Final flat table and its CSV / JSON renderings.

use std::io::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use styleperf_core::ComparativeRow;

/// Published column order.
pub const COLUMNS: [&str; 10] = [
    "style_key",
    "image_url",
    "t_qty",
    "t_sales",
    "t_aov",
    "s_qty",
    "s_sales",
    "s_aov",
    "tag",
    "action_hint",
];

/// Comparative rows sorted by style key.
///
/// Values stay exact; rounding to two fractional digits happens only when
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    rows: Vec<ComparativeRow>,
}

/// One output line with money columns already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow<'a> {
    pub style_key: &'a str,
    pub image_url: &'a str,
    pub t_qty: u64,
    pub t_sales: String,
    pub t_aov: String,
    pub s_qty: u64,
    pub s_sales: String,
    pub s_aov: String,
    pub tag: &'static str,
    pub action_hint: &'a str,
}

impl ResultView {
    #[must_use]
    pub fn new(mut rows: Vec<ComparativeRow>) -> Self {
        rows.sort_by(|a, b| a.style_key.cmp(&b.style_key));
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ComparativeRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row for a canonical style key.
    #[must_use]
    pub fn get(&self, style_key: &str) -> Option<&ComparativeRow> {
        self.rows
            .binary_search_by(|row| row.style_key.as_str().cmp(style_key))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn rendered(&self) -> impl Iterator<Item = RenderedRow<'_>> {
        self.rows.iter().map(render_row)
    }

    /// Writes the view as CSV with a header line.
    ///
    /// # Errors
    ///
    /// Returns a `csv::Error` if writing to `writer` fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(COLUMNS)?;
        for row in self.rendered() {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the view as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization or the write fails.
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let rows: Vec<RenderedRow<'_>> = self.rendered().collect();
        serde_json::to_writer_pretty(writer, &rows)
    }
}

fn render_row(row: &ComparativeRow) -> RenderedRow<'_> {
    RenderedRow {
        style_key: &row.style_key,
        image_url: &row.image_url,
        t_qty: row.t_qty,
        t_sales: format_money(row.t_sales),
        t_aov: format_money(row.t_aov),
        s_qty: row.s_qty,
        s_sales: format_money(row.s_sales),
        s_aov: format_money(row.s_aov),
        tag: row.tag.as_str(),
        action_hint: &row.action_hint,
    }
}

/// Two fractional digits, midpoints rounded to even.
#[must_use]
pub fn format_money(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use styleperf_core::StrengthTag;

    use super::*;

    fn row(key: &str, t_sales: Decimal, t_aov: Decimal) -> ComparativeRow {
        ComparativeRow {
            style_key: key.to_string(),
            image_url: String::new(),
            t_qty: 3,
            t_sales,
            t_aov,
            s_qty: 0,
            s_sales: Decimal::ZERO,
            s_aov: Decimal::ZERO,
            tag: StrengthTag::TStrong,
            action_hint: "review S visibility/pricing".to_string(),
        }
    }

    #[test]
    fn format_money_pads_and_rounds_to_even() {
        assert_eq!(format_money(dec!(10)), "10.00");
        assert_eq!(format_money(dec!(3.3333333)), "3.33");
        assert_eq!(format_money(dec!(0.125)), "0.12");
        assert_eq!(format_money(dec!(0.135)), "0.14");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }

    #[test]
    fn new_sorts_by_style_key() {
        let view = ResultView::new(vec![
            row("X99", dec!(1), dec!(1)),
            row("AB123", dec!(1), dec!(1)),
        ]);
        let keys: Vec<_> = view.rows().iter().map(|r| r.style_key.as_str()).collect();
        assert_eq!(keys, ["AB123", "X99"]);
        assert!(view.get("X99").is_some());
        assert!(view.get("BT1234").is_none());
    }

    #[test]
    fn csv_has_header_and_formatted_money() {
        let view = ResultView::new(vec![row("BT1234", dec!(10.00), dec!(10.00) / dec!(3))]);
        let mut out = Vec::new();
        view.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("BT1234,,3,10.00,3.33,0,0.00,0.00,T-strong,review S visibility/pricing")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_view_still_writes_header() {
        let mut out = Vec::new();
        ResultView::default().write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn json_uses_column_names_and_tag_labels() {
        let view = ResultView::new(vec![row("BT1234", dec!(10.00), dec!(10.00) / dec!(3))]);
        let mut out = Vec::new();
        view.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let first = &value[0];
        assert_eq!(first["style_key"], "BT1234");
        assert_eq!(first["t_qty"], 3);
        assert_eq!(first["t_aov"], "3.33");
        assert_eq!(first["tag"], "T-strong");
    }
}
