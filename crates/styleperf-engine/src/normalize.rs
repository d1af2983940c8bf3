//! Per-marketplace normalization into [`NormalizedOrder`] rows.
//!
//! Date and money parsing live in [`crate::dates`] and [`crate::money`]; this
//! module maps each feed's columns and status semantics onto the shared row
//! shape and resolves product labels through the [`StyleIndex`].

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use styleperf_core::{NormalizedOrder, Platform};

use crate::dates::{parse_s_date, parse_t_date};
use crate::error::EngineError;
use crate::loader::FeedName;
use crate::money::parse_money;
use crate::resolver::StyleIndex;
use crate::stats::{DropReason, DropStats};
use crate::table::{cell, Table};

/// Column names in the Marketplace-T order export.
pub mod t_columns {
    pub const PRODUCT_NUMBER: &str = "product number";
    pub const PURCHASE_DATE: &str = "purchase date";
    pub const STATUS: &str = "order item status";
    pub const QUANTITY: &str = "quantity shipped";
    pub const AMOUNT: &str = "base price total";
}

/// Column names in the Marketplace-S order export.
pub mod s_columns {
    pub const DESCRIPTION: &str = "product description";
    pub const PROCESSED_ON: &str = "order processed on";
    pub const STATUS: &str = "order status";
    pub const PRICE: &str = "product price";
}

/// Marketplace-T statuses that count as a sale.
pub const T_KEPT_STATUSES: [&str; 2] = ["shipped", "delivered"];

/// Marketplace-S status that removes a row.
pub const S_REFUNDED_STATUS: &str = "customer refunded";

/// Rows that survived normalization plus what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct NormalizedFeed {
    pub orders: Vec<NormalizedOrder>,
    pub drops: DropStats,
}

/// Normalizes the Marketplace-T order feed.
///
/// Keeps only shipped or delivered lines. Quantity comes from
/// `quantity shipped` (rounded half-to-even, `0` when missing or negative);
/// revenue from `base price total`. A table with no columns yields no rows.
///
/// # Errors
///
/// Returns [`EngineError::Schema`] if a required column is missing.
pub fn normalize_t_feed(table: &Table, index: &StyleIndex) -> Result<NormalizedFeed, EngineError> {
    let mut feed = NormalizedFeed::default();
    if !table.has_columns() {
        tracing::warn!(feed = %FeedName::SalesT, "feed has no columns; treating as empty");
        return Ok(feed);
    }

    let product_col = table.require(FeedName::SalesT, t_columns::PRODUCT_NUMBER)?;
    let date_col = table.require(FeedName::SalesT, t_columns::PURCHASE_DATE)?;
    let status_col = table.require(FeedName::SalesT, t_columns::STATUS)?;
    let qty_col = table.require(FeedName::SalesT, t_columns::QUANTITY)?;
    let amount_col = table.require(FeedName::SalesT, t_columns::AMOUNT)?;

    for row in table.rows() {
        let status = normalize_status(cell(row, status_col));
        if !T_KEPT_STATUSES.contains(&status.as_str()) {
            feed.drops.record(Platform::T, DropReason::StatusExcluded);
            continue;
        }

        let label = cell(row, product_col);
        let Some(style_key) = index.resolve(label) else {
            tracing::debug!(platform = %Platform::T, label, "dropping row; style not in catalog");
            feed.drops.record(Platform::T, DropReason::UnresolvedStyle);
            continue;
        };

        feed.orders.push(NormalizedOrder {
            style_key: style_key.to_string(),
            ts: parse_t_date(cell(row, date_col)),
            status,
            qty: parse_quantity(cell(row, qty_col)),
            gross: non_negative_amount(cell(row, amount_col)),
            platform: Platform::T,
        });
    }

    log_feed_summary(FeedName::SalesT, table.len(), &feed);
    Ok(feed)
}

/// Normalizes the Marketplace-S order feed.
///
/// Every row is one unit. Refunded rows are dropped; every other status is
/// kept. The style key is extracted from the free-text description.
///
/// # Errors
///
/// Returns [`EngineError::Schema`] if a required column is missing.
pub fn normalize_s_feed(table: &Table, index: &StyleIndex) -> Result<NormalizedFeed, EngineError> {
    let mut feed = NormalizedFeed::default();
    if !table.has_columns() {
        tracing::warn!(feed = %FeedName::SalesS, "feed has no columns; treating as empty");
        return Ok(feed);
    }

    let description_col = table.require(FeedName::SalesS, s_columns::DESCRIPTION)?;
    let date_col = table.require(FeedName::SalesS, s_columns::PROCESSED_ON)?;
    let status_col = table.require(FeedName::SalesS, s_columns::STATUS)?;
    let price_col = table.require(FeedName::SalesS, s_columns::PRICE)?;

    for row in table.rows() {
        let status = normalize_status(cell(row, status_col));
        if status == S_REFUNDED_STATUS {
            feed.drops.record(Platform::S, DropReason::StatusExcluded);
            continue;
        }

        let label = cell(row, description_col);
        let Some(style_key) = index.resolve(label) else {
            tracing::debug!(platform = %Platform::S, label, "dropping row; style not in catalog");
            feed.drops.record(Platform::S, DropReason::UnresolvedStyle);
            continue;
        };

        feed.orders.push(NormalizedOrder {
            style_key: style_key.to_string(),
            ts: parse_s_date(cell(row, date_col)),
            status,
            qty: 1,
            gross: non_negative_amount(cell(row, price_col)),
            platform: Platform::S,
        });
    }

    log_feed_summary(FeedName::SalesS, table.len(), &feed);
    Ok(feed)
}

fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Numeric quantity rounded half-to-even. Missing, non-numeric, negative or
/// out-of-range values count as `0`.
fn parse_quantity(raw: &str) -> u64 {
    Decimal::from_str(raw.trim())
        .ok()
        .map(|q| q.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
        .filter(|q| q.is_sign_positive())
        .and_then(|q| q.to_u64())
        .unwrap_or(0)
}

/// Money value or `0`. Negative amounts are clamped to `0` so line revenue
/// never reduces a style's sales.
fn non_negative_amount(raw: &str) -> Decimal {
    match parse_money(raw) {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            tracing::debug!(raw, "negative amount clamped to zero");
            Decimal::ZERO
        }
        Some(value) => value,
        None => Decimal::ZERO,
    }
}

fn log_feed_summary(feed: FeedName, input_rows: usize, normalized: &NormalizedFeed) {
    tracing::info!(
        feed = %feed,
        input_rows,
        kept = normalized.orders.len(),
        dropped = normalized.drops.total(),
        "feed normalized"
    );
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
