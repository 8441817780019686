//! Active enums shared across entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Processing state of a receipt aggregate.
///
/// Receipts are created as `Processing` and transition to `Processed` or
/// `Failed` via an explicit status update; re-processing a `Processed`
/// receipt is permitted and does not introduce a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// Uploaded, analysis/persistence still in flight.
    #[sea_orm(string_value = "processing")]
    Processing,
    /// Fully persisted with extracted fields.
    #[sea_orm(string_value = "processed")]
    Processed,
    /// Analysis or persistence failed; raw text may still be stored.
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Period over which a tenant's spending threshold applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ThresholdType {
    /// Weekly spending threshold.
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// Monthly spending threshold.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Seasonal (quarterly) spending threshold.
    #[sea_orm(string_value = "season")]
    Season,
    /// Yearly spending threshold.
    #[sea_orm(string_value = "yearly")]
    Yearly,
}
