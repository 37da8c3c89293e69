//! Batch export round trips and the end-to-end file scenario.

use chrono::NaiveDate;
use order_gen_core::{
    clock::GenClock,
    config::{default_platforms, GenConfig},
    export::{export_batch, read_orders_csv, UTF8_BOM},
    generator::OrderGenerator,
    order::{RefundStatus, COLUMNS},
};

fn clock() -> GenClock {
    GenClock::fixed(
        NaiveDate::from_ymd_opt(2025, 9, 15)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid anchor"),
    )
}

fn file_text(path: &std::path::Path) -> String {
    let bytes = std::fs::read(path).expect("read file");
    assert!(bytes.starts_with(UTF8_BOM), "missing UTF-8 signature");
    String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).expect("utf-8 body")
}

#[test]
fn ten_records_from_pool_of_five() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fake_orders.csv");

    let generator =
        OrderGenerator::build_test(GenConfig::default_test(), clock()).expect("generator");
    let report = export_batch(&generator, 10, &path).expect("export");
    assert_eq!(report.rows, 10);
    assert!(report.path.is_absolute());

    let text = file_text(&path);
    assert_eq!(text.lines().count(), 11, "header plus ten rows");

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .unwrap_or_else(|| panic!("missing column {name}"))
    };
    let (qty, platform, payable, product) = (
        col("quantity"),
        col("platform"),
        col("payable_amount"),
        col("product_amount"),
    );

    let platforms = default_platforms();
    assert_eq!(platforms.len(), 7);
    for row in reader.records() {
        let row = row.expect("row");
        let q: u32 = row[qty].parse().expect("quantity");
        assert!((1..=3).contains(&q), "quantity {q}");
        assert!(platforms.iter().any(|p| p == &row[platform]), "platform {}", &row[platform]);
        let payable: f64 = row[payable].parse().expect("payable");
        let product: f64 = row[product].parse().expect("product");
        assert!(payable <= product + 1e-9, "{payable} > {product}");
    }
}

#[test]
fn reparse_yields_same_rows_and_schema() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("orders.csv");
    let config = GenConfig {
        catalog_size: 30,
        ..GenConfig::default_test()
    };
    let generator = OrderGenerator::build_test(config, clock()).expect("generator");
    let records = generator.generate(250);
    order_gen_core::export::write_orders_csv(&path, &records).expect("write");

    let text = file_text(&path);
    let header: Vec<&str> = text.lines().next().expect("header").split(',').collect();
    assert_eq!(header, COLUMNS.to_vec());
    assert_eq!(text.lines().count(), 251);

    let back = read_orders_csv(&path).expect("reparse");
    assert_eq!(back.len(), records.len());
    for (a, b) in records.iter().zip(&back) {
        assert_eq!(a.internal_order_number, b.internal_order_number);
        assert_eq!(a.order_time, b.order_time);
        assert_eq!(a.shipping_date, b.shipping_date);
        assert_eq!(a.refund_status, b.refund_status);
        assert_eq!(a.is_gift, b.is_gift);
        assert_eq!(a.paid_amount, b.paid_amount);
    }
}

#[test]
fn timestamps_use_fixed_format_and_blank_shipping() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("orders.csv");
    let generator =
        OrderGenerator::build_test(GenConfig::default_test(), clock()).expect("generator");
    let records = generator.generate(200);
    order_gen_core::export::write_orders_csv(&path, &records).expect("write");

    let text = file_text(&path);
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    let idx = |name: &str| headers.iter().position(|h| h == name).expect("column");
    let (order_time, payment, shipping, refund) = (
        idx("order_time"),
        idx("payment_date"),
        idx("shipping_date"),
        idx("refund_status"),
    );

    let fmt = "%Y-%m-%d %H:%M:%S";
    for row in reader.records() {
        let row = row.expect("row");
        assert_eq!(row[order_time].len(), 19);
        chrono::NaiveDateTime::parse_from_str(&row[order_time], fmt).expect("order_time");
        chrono::NaiveDateTime::parse_from_str(&row[payment], fmt).expect("payment_date");
        if &row[refund] == RefundStatus::Refunded.label() {
            assert_eq!(&row[shipping], "");
        } else {
            chrono::NaiveDateTime::parse_from_str(&row[shipping], fmt).expect("shipping_date");
        }
    }
}
