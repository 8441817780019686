//! Settings repository.
//!
//! One settings row per tenant (unique user_id): default currency plus an
//! optional spending threshold.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use recivo_shared::AppError;

use crate::entities::{sea_orm_active_enums::ThresholdType, settings};

/// Error types for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for writing a tenant's settings.
#[derive(Debug, Clone)]
pub struct SettingsInput {
    /// Default currency name (e.g. "US Dollar").
    pub currency_name: String,
    /// Default currency symbol (e.g. "$").
    pub currency_symbol: String,
    /// Spending threshold period, if configured.
    pub threshold_type: Option<ThresholdType>,
    /// Spending threshold amount, if configured.
    pub threshold_rate: Option<Decimal>,
}

/// Settings repository, one row per tenant.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a tenant's settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, user_id: &str) -> Result<Option<settings::Model>, SettingsError> {
        let settings = settings::Entity::find()
            .filter(settings::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(settings)
    }

    /// Creates or replaces a tenant's settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert(
        &self,
        user_id: &str,
        input: SettingsInput,
    ) -> Result<settings::Model, SettingsError> {
        let now = Utc::now().into();

        if let Some(existing) = self.get(user_id).await? {
            let mut active: settings::ActiveModel = existing.into();
            active.currency_name = Set(input.currency_name);
            active.currency_symbol = Set(input.currency_symbol);
            active.threshold_type = Set(input.threshold_type);
            active.threshold_rate = Set(input.threshold_rate);
            active.updated_at = Set(now);
            let updated = active.update(&self.db).await?;
            return Ok(updated);
        }

        let created = settings::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id.to_string()),
            currency_name: Set(input.currency_name),
            currency_symbol: Set(input.currency_symbol),
            threshold_type: Set(input.threshold_type),
            threshold_rate: Set(input.threshold_rate),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(created)
    }
}
