//! Merchant repository.
//!
//! Merchants are shared across many receipts within a tenant; receipt-side
//! operations never delete them.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use recivo_core::receipt::{validation, ValidationError};
use recivo_shared::AppError;

use crate::entities::merchants;

/// Error types for merchant operations.
#[derive(Debug, thiserror::Error)]
pub enum MerchantError {
    /// Construction-time validation failure.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<MerchantError> for AppError {
    fn from(err: MerchantError) -> Self {
        match err {
            MerchantError::Validation(e) => Self::Validation(e.to_string()),
            MerchantError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Optional contact details for a merchant.
#[derive(Debug, Clone, Default)]
pub struct MerchantContact {
    /// Street address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Website URL.
    pub website: Option<String>,
}

/// Merchant repository for tenant-scoped lookups and creation.
#[derive(Debug, Clone)]
pub struct MerchantRepository {
    db: DatabaseConnection,
}

impl MerchantRepository {
    /// Creates a new merchant repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a tenant's merchant by exact name, creating it if absent.
    ///
    /// Contact details are only applied on creation; an existing merchant is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database operation fails.
    pub async fn find_or_create(
        &self,
        user_id: &str,
        name: &str,
        contact: MerchantContact,
    ) -> Result<merchants::Model, MerchantError> {
        validation::validate_merchant(name)?;

        if let Some(existing) = merchants::Entity::find()
            .filter(merchants::Column::UserId.eq(user_id))
            .filter(merchants::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now().into();
        let merchant = merchants::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            address: Set(contact.address),
            phone: Set(contact.phone),
            email: Set(contact.email),
            website: Set(contact.website),
            user_id: Set(user_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        debug!(merchant_id = %merchant.id, name, "created merchant");
        Ok(merchant)
    }

    /// Gets a tenant's merchant by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(
        &self,
        user_id: &str,
        merchant_id: Uuid,
    ) -> Result<Option<merchants::Model>, MerchantError> {
        let merchant = merchants::Entity::find_by_id(merchant_id)
            .filter(merchants::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(merchant)
    }

    /// Lists a tenant's merchants by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: &str) -> Result<Vec<merchants::Model>, MerchantError> {
        let merchants = merchants::Entity::find()
            .filter(merchants::Column::UserId.eq(user_id))
            .order_by_asc(merchants::Column::Name)
            .all(&self.db)
            .await?;
        Ok(merchants)
    }
}
