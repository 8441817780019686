//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the receipt aggregate and its lookups
//! - Repository abstractions for tenant-scoped data access
//! - The receipt ingestion service
//! - Database migrations

pub mod entities;
pub mod ingest;
pub mod migration;
pub mod repositories;

pub use ingest::ReceiptIngestService;
pub use repositories::{
    CategoryRepository, ItemNameRepository, MerchantRepository, ReceiptRepository,
    ReportRepository, SettingsRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
