//! Category repository.
//!
//! Categories are tenant-scoped labels referenced weakly (by id) from the
//! item-name lookup. Deleting a category does not clear those references;
//! that cleanup is an external concern and deliberately not implemented
//! here.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use recivo_core::receipt::{validation, ValidationError};
use recivo_shared::AppError;

use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Construction-time validation failure.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Validation(e) => Self::Validation(e.to_string()),
            CategoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Category repository for tenant-scoped labels.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category for a tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database operation fails.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        icon: Option<String>,
    ) -> Result<categories::Model, CategoryError> {
        validation::require("name", name)?;

        let now = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            icon: Set(icon),
            user_id: Set(user_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(category)
    }

    /// Gets a tenant's category by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(
        &self,
        user_id: &str,
        category_id: Uuid,
    ) -> Result<Option<categories::Model>, CategoryError> {
        let category = categories::Entity::find_by_id(category_id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(category)
    }

    /// Lists a tenant's categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: &str) -> Result<Vec<categories::Model>, CategoryError> {
        let categories = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;
        Ok(categories)
    }
}
