use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

const T_HEADERS: &[&str] = &[
    "Product Number",
    "Purchase Date",
    "Order Item Status",
    "Quantity Shipped",
    "Base Price Total",
];

const S_HEADERS: &[&str] = &[
    "Product Description",
    "Order Processed On",
    "Order Status",
    "Product Price",
];

fn index() -> StyleIndex {
    StyleIndex::from_keys(["BT1234", "AB123"])
}

// -----------------------------------------------------------------------
// normalize_t_feed
// -----------------------------------------------------------------------

#[test]
fn t_feed_maps_columns() {
    let table = Table::from_str_rows(
        T_HEADERS,
        &[&["bt1234", "2024-05-03 10:00:00 (PDT)", "Shipped", "2", "$1,010.50"]],
    );
    let feed = normalize_t_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders.len(), 1);
    let order = &feed.orders[0];
    assert_eq!(order.style_key, "BT1234");
    assert_eq!(
        order.ts,
        NaiveDate::from_ymd_opt(2024, 5, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
    );
    assert_eq!(order.status, "shipped");
    assert_eq!(order.qty, 2);
    assert_eq!(order.gross, dec!(1010.50));
    assert_eq!(order.platform, Platform::T);
}

#[test]
fn t_feed_keeps_only_shipped_and_delivered() {
    let table = Table::from_str_rows(
        T_HEADERS,
        &[
            &["BT1234", "2024-05-03", "shipped", "1", "$10.00"],
            &["BT1234", "2024-05-03", " DELIVERED ", "1", "$10.00"],
            &["BT1234", "2024-05-03", "cancelled", "1", "$10.00"],
            &["BT1234", "2024-05-03", "pending", "1", "$10.00"],
        ],
    );
    let feed = normalize_t_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders.len(), 2);
    assert_eq!(feed.drops.count(Platform::T, DropReason::StatusExcluded), 2);
}

#[test]
fn t_feed_drops_unresolved_product() {
    let table = Table::from_str_rows(
        T_HEADERS,
        &[&["ZZ-NOPE", "2024-05-03", "shipped", "1", "$10.00"]],
    );
    let feed = normalize_t_feed(&table, &index()).unwrap();
    assert!(feed.orders.is_empty());
    assert_eq!(feed.drops.count(Platform::T, DropReason::UnresolvedStyle), 1);
}

#[test]
fn t_feed_bad_date_survives_with_no_timestamp() {
    let table = Table::from_str_rows(
        T_HEADERS,
        &[&["BT1234", "not a date", "shipped", "1", "$10.00"]],
    );
    let feed = normalize_t_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders.len(), 1);
    assert!(feed.orders[0].ts.is_none());
}

#[test]
fn t_feed_bad_quantity_and_amount_become_zero() {
    let table = Table::from_str_rows(
        T_HEADERS,
        &[&["BT1234", "2024-05-03", "shipped", "n/a", "--"]],
    );
    let feed = normalize_t_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders[0].qty, 0);
    assert_eq!(feed.orders[0].gross, Decimal::ZERO);
}

#[test]
fn t_feed_negative_amount_is_clamped() {
    let table = Table::from_str_rows(
        T_HEADERS,
        &[&["BT1234", "2024-05-03", "shipped", "1", "-$4.00"]],
    );
    let feed = normalize_t_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders[0].gross, Decimal::ZERO);
}

#[test]
fn t_feed_missing_column_is_schema_error() {
    let table = Table::from_str_rows(
        &["product number", "purchase date", "order item status", "base price total"],
        &[],
    );
    let err = normalize_t_feed(&table, &index()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Schema { feed: FeedName::SalesT, ref column } if column == "quantity shipped"
    ));
}

#[test]
fn t_feed_without_columns_is_empty() {
    let feed = normalize_t_feed(&Table::empty(), &index()).unwrap();
    assert!(feed.orders.is_empty());
    assert!(feed.drops.is_empty());
}

// -----------------------------------------------------------------------
// normalize_s_feed
// -----------------------------------------------------------------------

#[test]
fn s_feed_maps_columns_with_implicit_quantity() {
    let table = Table::from_str_rows(
        S_HEADERS,
        &[&["Summer Top (AB123) red", "2024-05-04T08:30:00", "Completed", "$12.00"]],
    );
    let feed = normalize_s_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders.len(), 1);
    let order = &feed.orders[0];
    assert_eq!(order.style_key, "AB123");
    assert_eq!(order.qty, 1);
    assert_eq!(order.gross, dec!(12.00));
    assert_eq!(order.status, "completed");
    assert_eq!(order.platform, Platform::S);
    assert!(order.ts.is_some());
}

#[test]
fn s_feed_drops_customer_refunded_only() {
    let table = Table::from_str_rows(
        S_HEADERS,
        &[
            &["BT1234 dress", "2024-05-04", "Customer Refunded", "$12.00"],
            &["BT1234 dress", "2024-05-04", "shipped", "$12.00"],
            &["BT1234 dress", "2024-05-04", "", "$12.00"],
        ],
    );
    let feed = normalize_s_feed(&table, &index()).unwrap();
    assert_eq!(feed.orders.len(), 2);
    assert_eq!(feed.drops.count(Platform::S, DropReason::StatusExcluded), 1);
}

#[test]
fn s_feed_drops_unknown_item() {
    let table = Table::from_str_rows(
        S_HEADERS,
        &[&["unknown item", "2024-05-04", "completed", "$12.00"]],
    );
    let feed = normalize_s_feed(&table, &index()).unwrap();
    assert!(feed.orders.is_empty());
    assert_eq!(feed.drops.count(Platform::S, DropReason::UnresolvedStyle), 1);
}

#[test]
fn s_feed_missing_column_is_schema_error() {
    let table = Table::from_str_rows(&["product description", "order status"], &[]);
    let err = normalize_s_feed(&table, &index()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Schema { feed: FeedName::SalesS, ref column } if column == "order processed on"
    ));
}

// -----------------------------------------------------------------------
// helpers
// -----------------------------------------------------------------------

#[test]
fn parse_quantity_rounds_half_to_even() {
    assert_eq!(parse_quantity("2"), 2);
    assert_eq!(parse_quantity(" 2.0 "), 2);
    assert_eq!(parse_quantity("2.5"), 2);
    assert_eq!(parse_quantity("3.5"), 4);
    assert_eq!(parse_quantity("2.6"), 3);
}

#[test]
fn parse_quantity_invalid_or_negative_is_zero() {
    assert_eq!(parse_quantity(""), 0);
    assert_eq!(parse_quantity("two"), 0);
    assert_eq!(parse_quantity("-3"), 0);
}
