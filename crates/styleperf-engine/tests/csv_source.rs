//! Comparison runs over CSV exports on disk.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use styleperf_core::{FeedFiles, StrengthTag};
use styleperf_engine::{
    run_comparison, CsvDirSource, EngineError, FeedName, TableSource, TaggingRules, Window,
};

const CATALOG_CSV: &str = "\u{feff}Product_Number,Image_URL,Neckline
BT1234,https://img.example.com/bt1234.jpg,v-neck
AB123,,crew
";

const SALES_T_CSV: &str = "Order ID,Product Number,Purchase Date,Order Item Status,Quantity Shipped,Base Price Total
1001,BT1234,2024-05-03 10:00:00 (PDT),Shipped,2,\"$1,000.00\"
1002,BT1234,2024-05-04 11:30:00 (PDT),Delivered,2,$20.00
1003,AB123,2024-05-05 09:00:00 (PDT),Cancelled,1,$9.00
";

const SALES_S_CSV: &str = "Order Number,Product Description,Order Processed On,Order Status,Product Price
S-1,\"Summer Top (AB123) red, size S\",2024-05-06T08:00:00Z,Completed,$14.50
S-2,Summer Top (AB123) blue,2024/05/07 13:15:00,Shipped,$14.50
S-3,Summer Top (AB123) red,2024-05-08,Customer Refunded,$14.50
";

fn write_feeds(dir: &Path, files: &FeedFiles) {
    fs::write(dir.join(&files.catalog), CATALOG_CSV).unwrap();
    fs::write(dir.join(&files.sales_t), SALES_T_CSV).unwrap();
    fs::write(dir.join(&files.sales_s), SALES_S_CSV).unwrap();
}

fn may_2024() -> Window {
    Window::new(
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
    )
    .unwrap()
}

#[test]
fn compares_csv_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_feeds(dir.path(), &FeedFiles::default());

    let source = CsvDirSource::new(dir.path());
    let report = run_comparison(&source, may_2024(), &TaggingRules::default()).unwrap();

    let bt = report.view.get("BT1234").unwrap();
    assert_eq!(bt.t_qty, 4);
    assert_eq!(bt.t_sales, dec!(1020.00));
    assert_eq!(bt.t_aov, dec!(255));
    assert_eq!(bt.s_qty, 0);
    assert_eq!(bt.image_url, "https://img.example.com/bt1234.jpg");
    assert_eq!(bt.tag, StrengthTag::TStrong);

    let ab = report.view.get("AB123").unwrap();
    assert_eq!(ab.t_qty, 0);
    assert_eq!(ab.s_qty, 2);
    assert_eq!(ab.s_sales, dec!(29.00));
    assert_eq!(ab.tag, StrengthTag::Balanced);
}

#[test]
fn csv_output_matches_expected_text() {
    let dir = tempfile::tempdir().unwrap();
    write_feeds(dir.path(), &FeedFiles::default());

    let report = run_comparison(
        &CsvDirSource::new(dir.path()),
        may_2024(),
        &TaggingRules::default(),
    )
    .unwrap();
    let mut out = Vec::new();
    report.view.write_csv(&mut out).unwrap();

    let expected = "\
style_key,image_url,t_qty,t_sales,t_aov,s_qty,s_sales,s_aov,tag,action_hint
AB123,,0,0.00,0.00,2,29.00,14.50,balanced,maintain parity
BT1234,https://img.example.com/bt1234.jpg,4,1020.00,255.00,0,0.00,0.00,T-strong,review S visibility/pricing
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn custom_file_names_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    let files = FeedFiles {
        catalog: "styles.csv".to_string(),
        sales_t: "t_orders.csv".to_string(),
        sales_s: "s_orders.csv".to_string(),
    };
    write_feeds(dir.path(), &files);

    let source = CsvDirSource::new(dir.path()).with_files(files);
    let report = run_comparison(&source, may_2024(), &TaggingRules::default()).unwrap();
    assert_eq!(report.view.len(), 2);
}

#[test]
fn missing_sales_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("catalog.csv"), CATALOG_CSV).unwrap();
    fs::write(dir.path().join("sales_t.csv"), SALES_T_CSV).unwrap();

    let err = run_comparison(
        &CsvDirSource::new(dir.path()),
        may_2024(),
        &TaggingRules::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::FeedUnavailable { feed: FeedName::SalesS, .. }
    ));
}

#[test]
fn empty_sales_file_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_feeds(dir.path(), &FeedFiles::default());
    fs::write(dir.path().join("sales_s.csv"), "").unwrap();

    let source = CsvDirSource::new(dir.path());
    assert!(!source.load(FeedName::SalesS).unwrap().has_columns());

    let report = run_comparison(&source, may_2024(), &TaggingRules::default()).unwrap();
    assert_eq!(report.view.len(), 1);
    assert_eq!(report.view.rows()[0].style_key, "BT1234");
}
