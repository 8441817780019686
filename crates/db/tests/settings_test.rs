//! Integration tests for per-tenant settings.

mod common;

use rust_decimal_macros::dec;

use recivo_db::entities::sea_orm_active_enums::ThresholdType;
use recivo_db::repositories::{SettingsInput, SettingsRepository};

use common::setup_db;

fn input(currency_name: &str) -> SettingsInput {
    SettingsInput {
        currency_name: currency_name.to_string(),
        currency_symbol: "$".to_string(),
        threshold_type: None,
        threshold_rate: None,
    }
}

#[tokio::test]
async fn test_upsert_creates_then_replaces() {
    let db = setup_db().await;
    let repo = SettingsRepository::new(db);

    assert!(repo.get("u1").await.expect("get").is_none());

    let created = repo.upsert("u1", input("US Dollar")).await.expect("upsert");
    assert_eq!(created.currency_name, "US Dollar");

    let mut replacement = input("Euro");
    replacement.currency_symbol = "\u{20ac}".to_string();
    replacement.threshold_type = Some(ThresholdType::Monthly);
    replacement.threshold_rate = Some(dec!(500.00));
    let updated = repo.upsert("u1", replacement).await.expect("upsert");

    assert_eq!(updated.id, created.id, "one row per tenant");
    assert_eq!(updated.currency_name, "Euro");
    assert_eq!(updated.threshold_type, Some(ThresholdType::Monthly));
    assert_eq!(updated.threshold_rate, Some(dec!(500.00)));
}

#[tokio::test]
async fn test_settings_are_tenant_scoped() {
    let db = setup_db().await;
    let repo = SettingsRepository::new(db);

    repo.upsert("u1", input("US Dollar")).await.expect("upsert");
    assert!(repo.get("u2").await.expect("get").is_none());
}
