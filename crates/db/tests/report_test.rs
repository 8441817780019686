//! Integration tests for spending summaries and grouped receipt reports.

mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

use recivo_core::receipt::period::{PeriodBucket, ReceiptSummary, SummaryCutoffs};
use recivo_db::repositories::{ReceiptRepository, ReportRepository};
use recivo_shared::types::PageRequest;

use common::{receipt_input, seed_merchant, setup_db, utc};

fn cutoffs_for_late_august_2026() -> SummaryCutoffs {
    let at = |y, m, d| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    };
    // As of Wednesday 2026-08-26: week started Sunday the 23rd.
    SummaryCutoffs {
        start_of_year: at(2026, 1, 1),
        start_of_month: at(2026, 8, 1),
        start_of_week: at(2026, 8, 23),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_summary_sums_each_period() {
    let db = setup_db().await;
    let receipts = ReceiptRepository::new(db.clone());
    let reports = ReportRepository::new(db.clone());
    let merchant = seed_merchant(&db, "u1", "Acme").await;

    let rows = [
        ("R-1", utc(2025, 12, 30), dec!(10.00)), // previous year
        ("R-2", utc(2026, 3, 5), dec!(20.00)),   // this year only
        ("R-3", utc(2026, 8, 10), dec!(30.00)),  // this month
        ("R-4", utc(2026, 8, 25), dec!(40.00)),  // this week
    ];
    for (number, when, amount) in rows {
        receipts
            .create(receipt_input("u1", merchant.id, number, when, amount))
            .await
            .expect("create");
    }

    let summary = reports
        .summary("u1", &cutoffs_for_late_august_2026())
        .await
        .expect("summary");

    assert_eq!(summary.total, dec!(100.00));
    assert_eq!(summary.this_year, dec!(90.00));
    assert_eq!(summary.this_month, dec!(70.00));
    assert_eq!(summary.this_week, dec!(40.00));
}

#[tokio::test]
async fn test_summary_is_tenant_scoped() {
    let db = setup_db().await;
    let receipts = ReceiptRepository::new(db.clone());
    let reports = ReportRepository::new(db.clone());
    let merchant = seed_merchant(&db, "u1", "Acme").await;

    receipts
        .create(receipt_input("u1", merchant.id, "R-1", utc(2026, 8, 25), dec!(40.00)))
        .await
        .expect("create");

    let other = reports
        .summary("u2", &cutoffs_for_late_august_2026())
        .await
        .expect("summary");
    assert_eq!(other, ReceiptSummary::default());
}

#[tokio::test]
async fn test_grouped_by_month_buckets_and_subtotals() {
    let db = setup_db().await;
    let receipts = ReceiptRepository::new(db.clone());
    let reports = ReportRepository::new(db.clone());
    let merchant = seed_merchant(&db, "u1", "Acme").await;

    receipts
        .create(receipt_input("u1", merchant.id, "R-1", utc(2026, 7, 3), dec!(5.00)))
        .await
        .expect("create");
    receipts
        .create(receipt_input("u1", merchant.id, "R-2", utc(2026, 8, 10), dec!(30.00)))
        .await
        .expect("create");
    receipts
        .create(receipt_input("u1", merchant.id, "R-3", utc(2026, 8, 25), dec!(40.00)))
        .await
        .expect("create");

    let response = reports
        .grouped("u1", PeriodBucket::Month, &PageRequest::new(1, 10))
        .await
        .expect("grouped");

    assert_eq!(response.meta.total, 2);
    assert_eq!(response.data.len(), 2);

    let august = &response.data[0];
    assert_eq!(august.period_start, date(2026, 8, 1));
    assert_eq!(august.subtotal, dec!(70.00));
    assert_eq!(august.receipts.len(), 2);
    assert_eq!(august.receipts[0].receipt_number, "R-3", "newest first");

    let july = &response.data[1];
    assert_eq!(july.period_start, date(2026, 7, 1));
    assert_eq!(july.subtotal, dec!(5.00));
    assert_eq!(july.receipts.len(), 1);
}

#[tokio::test]
async fn test_grouped_by_week_crosses_month_boundary() {
    let db = setup_db().await;
    let receipts = ReceiptRepository::new(db.clone());
    let reports = ReportRepository::new(db.clone());
    let merchant = seed_merchant(&db, "u1", "Acme").await;

    // Sunday 2026-08-30 starts a week that spans into September.
    receipts
        .create(receipt_input("u1", merchant.id, "R-1", utc(2026, 8, 31), dec!(10.00)))
        .await
        .expect("create");
    receipts
        .create(receipt_input("u1", merchant.id, "R-2", utc(2026, 9, 2), dec!(20.00)))
        .await
        .expect("create");

    let response = reports
        .grouped("u1", PeriodBucket::Week, &PageRequest::new(1, 10))
        .await
        .expect("grouped");

    assert_eq!(response.meta.total, 1, "both receipts share one week bucket");
    assert_eq!(response.data[0].period_start, date(2026, 8, 30));
    assert_eq!(response.data[0].subtotal, dec!(30.00));
}

#[tokio::test]
async fn test_grouped_pages_over_buckets() {
    let db = setup_db().await;
    let receipts = ReceiptRepository::new(db.clone());
    let reports = ReportRepository::new(db.clone());
    let merchant = seed_merchant(&db, "u1", "Acme").await;

    for (i, month) in [5u32, 6, 7].iter().enumerate() {
        receipts
            .create(receipt_input(
                "u1",
                merchant.id,
                &format!("R-{i}"),
                utc(2026, *month, 15),
                dec!(1.00),
            ))
            .await
            .expect("create");
    }

    let first = reports
        .grouped("u1", PeriodBucket::Month, &PageRequest::new(1, 2))
        .await
        .expect("grouped");
    assert_eq!(first.meta.total, 3);
    assert_eq!(first.meta.total_pages, 2);
    assert_eq!(first.data.len(), 2);
    assert_eq!(first.data[0].period_start, date(2026, 7, 1));

    let second = reports
        .grouped("u1", PeriodBucket::Month, &PageRequest::new(2, 2))
        .await
        .expect("grouped");
    assert_eq!(second.data.len(), 1);
    assert_eq!(second.data[0].period_start, date(2026, 5, 1));
}
