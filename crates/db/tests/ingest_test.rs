//! End-to-end ingestion tests: analysis result in, receipt aggregate out.

mod common;

use rust_decimal_macros::dec;

use recivo_core::analysis::{AnalyzedLineItem, DocumentAnalysisResult};
use recivo_db::entities::sea_orm_active_enums::ReceiptStatus;
use recivo_db::ingest::ReceiptIngestService;
use recivo_db::repositories::{CategoryRepository, ItemNameRepository, ReceiptRepository};
use recivo_shared::config::ReceiptConfig;

use common::{setup_db, utc};

fn line(name: &str, quantity: rust_decimal::Decimal, unit_price: rust_decimal::Decimal) -> AnalyzedLineItem {
    AnalyzedLineItem {
        name: name.to_string(),
        description: None,
        quantity,
        quantity_unit: None,
        unit_price,
        total_price: None,
        category: None,
        sku: None,
    }
}

fn acme_analysis() -> DocumentAnalysisResult {
    DocumentAnalysisResult {
        merchant_name: Some("Acme".to_string()),
        merchant_address: Some("1 Main St".to_string()),
        merchant_phone: None,
        transaction_date: Some(utc(2026, 8, 20)),
        receipt_number: Some("A-100".to_string()),
        sub_total: Some(dec!(11.00)),
        tax: Some(dec!(1.10)),
        total: Some(dec!(12.10)),
        reward: None,
        currency: Some("USD".to_string()),
        items: vec![line("Milk", dec!(2), dec!(3.50)), line("Eggs", dec!(1), dec!(4.00))],
        raw_text: Some("ACME ...".to_string()),
        is_success: true,
        error_message: None,
    }
}

#[tokio::test]
async fn test_ingest_persists_full_aggregate() {
    let db = setup_db().await;
    let service = ReceiptIngestService::new(db.clone(), ReceiptConfig::default());

    let created = service
        .ingest("u1", acme_analysis())
        .await
        .expect("ingest");

    assert_eq!(created.receipt.status, ReceiptStatus::Processed);
    assert_eq!(created.receipt.receipt_number, "A-100");
    assert_eq!(created.receipt.total_amount, dec!(12.10));
    assert_eq!(created.merchant.as_ref().map(|m| m.name.as_str()), Some("Acme"));

    assert_eq!(created.items.len(), 2);
    assert_eq!(created.items[0].name, "Milk");
    assert_eq!(created.items[0].total_price, dec!(7.00));
    assert!(created.items[0].item_name_id.is_some(), "name resolved to canonical id");
    assert!(created.items[1].item_name_id.is_some());
}

#[tokio::test]
async fn test_ingest_reuses_canonical_item_names() {
    let db = setup_db().await;
    let service = ReceiptIngestService::new(db.clone(), ReceiptConfig::default());
    let item_names = ItemNameRepository::new(db);

    let first = service.ingest("u1", acme_analysis()).await.expect("ingest");
    let second = service.ingest("u1", acme_analysis()).await.expect("ingest");

    let milk = item_names
        .find_by_name("Milk")
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(first.items[0].item_name_id, Some(milk.id));
    assert_eq!(second.items[0].item_name_id, Some(milk.id), "second upload reuses the id");
}

#[tokio::test]
async fn test_categorizing_a_name_reaches_past_receipts() {
    let db = setup_db().await;
    let service = ReceiptIngestService::new(db.clone(), ReceiptConfig::default());
    let item_names = ItemNameRepository::new(db.clone());
    let categories = CategoryRepository::new(db.clone());
    let receipts = ReceiptRepository::new(db);

    let created = service.ingest("u1", acme_analysis()).await.expect("ingest");
    let milk_id = created.items[0].item_name_id.expect("resolved");

    let groceries = categories
        .create("u1", "Groceries", None)
        .await
        .expect("create category");
    item_names
        .set_category(milk_id, Some(groceries.id))
        .await
        .expect("set category")
        .expect("row exists");

    // The stored receipt item still points at the canonical name, whose
    // category is now visible; the legacy free-text column is untouched.
    let aggregate = receipts
        .get_with_items("u1", created.receipt.id)
        .await
        .expect("get")
        .expect("exists");
    let milk_item = &aggregate.items[0];
    assert_eq!(milk_item.item_name_id, Some(milk_id));
    assert!(milk_item.category.is_none());

    let canonical = item_names.get(milk_id).await.expect("get").expect("exists");
    assert_eq!(canonical.category_id, Some(groceries.id));
}

#[tokio::test]
async fn test_ingest_fills_defaults_for_missing_fields() {
    let db = setup_db().await;
    let service = ReceiptIngestService::new(db.clone(), ReceiptConfig::default());

    let mut analysis = acme_analysis();
    analysis.merchant_name = None;
    analysis.receipt_number = None;
    analysis.currency = None;
    analysis.total = None;

    let created = service.ingest("u1", analysis).await.expect("ingest");

    assert_eq!(created.merchant.as_ref().map(|m| m.name.as_str()), Some("Unknown"));
    assert!(created.receipt.receipt_number.starts_with("RCPT-"));
    assert_eq!(created.receipt.currency, "USD");
    assert_eq!(
        created.receipt.total_amount,
        dec!(12.10),
        "total falls back to subtotal plus tax"
    );
}

#[tokio::test]
async fn test_failed_analysis_is_persisted_as_failed_receipt() {
    let db = setup_db().await;
    let service = ReceiptIngestService::new(db.clone(), ReceiptConfig::default());
    let receipts = ReceiptRepository::new(db);

    let analysis = DocumentAnalysisResult::failed("blurry image", Some("garbage".to_string()));
    let created = service.ingest("u1", analysis).await.expect("ingest");

    assert_eq!(created.receipt.status, ReceiptStatus::Failed);
    assert_eq!(created.receipt.total_amount, rust_decimal::Decimal::ZERO);
    assert_eq!(created.receipt.raw_text.as_deref(), Some("garbage"));
    assert!(created.items.is_empty());

    // Visible through the normal listing path.
    let failed = receipts
        .list_by_status("u1", ReceiptStatus::Failed)
        .await
        .expect("list");
    assert_eq!(failed.len(), 1);
}
