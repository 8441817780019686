//! Shared test fixtures: in-memory SQLite with migrations applied.

// Each integration test binary compiles this module and uses a subset.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use recivo_db::entities::merchants;
use recivo_db::migration::Migrator;
use recivo_db::repositories::{CreateReceiptInput, CreateReceiptItemInput, MerchantContact, MerchantRepository};

/// Connects to a fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps the in-memory database alive and shared
/// across the test's queries.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

pub async fn seed_merchant(db: &DatabaseConnection, user_id: &str, name: &str) -> merchants::Model {
    MerchantRepository::new(db.clone())
        .find_or_create(user_id, name, MerchantContact::default())
        .await
        .expect("Failed to create merchant")
}

pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A minimal valid receipt input with no items.
pub fn receipt_input(
    user_id: &str,
    merchant_id: Uuid,
    receipt_number: &str,
    receipt_date: DateTime<Utc>,
    total_amount: Decimal,
) -> CreateReceiptInput {
    CreateReceiptInput {
        user_id: user_id.to_string(),
        merchant_id,
        receipt_number: receipt_number.to_string(),
        receipt_date,
        sub_total: total_amount,
        tax_amount: Decimal::ZERO,
        total_amount,
        reward: None,
        currency: "USD".to_string(),
        image_path: None,
        raw_text: None,
        items: Vec::new(),
    }
}

/// A receipt item input without an explicit total.
pub fn item_input(name: &str, quantity: Decimal, unit_price: Decimal) -> CreateReceiptItemInput {
    CreateReceiptItemInput {
        name: name.to_string(),
        description: None,
        quantity,
        quantity_unit: None,
        unit_price,
        total_price: None,
        category: None,
        sku: None,
        item_name_id: None,
    }
}
