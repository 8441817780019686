//! Item-name repository: canonical item-name resolution and category
//! assignment.
//!
//! Free-text item names are deduplicated into the tenant-independent
//! `item_names` lookup. Resolution is an atomic upsert backed by the unique
//! constraint on `name`: two concurrent resolutions of the same unseen name
//! converge on a single canonical row.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::debug;
use uuid::Uuid;

use recivo_shared::AppError;

use crate::entities::item_names;

/// Error types for item-name operations.
#[derive(Debug, thiserror::Error)]
pub enum ItemNameError {
    /// The canonical row disappeared between upsert and lookup.
    #[error("Item name row missing after upsert: {0}")]
    MissingAfterUpsert(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ItemNameError> for AppError {
    fn from(err: ItemNameError) -> Self {
        match err {
            ItemNameError::MissingAfterUpsert(_) => Self::Internal(err.to_string()),
            ItemNameError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A single resolution request within a batch.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Free-text item name.
    pub name: String,
    /// Pre-resolved canonical id, when the caller already knows it.
    pub explicit_item_id: Option<i64>,
    /// Category to assign to the canonical row, when supplied.
    pub category_id: Option<Uuid>,
}

/// Repository for the canonical item-name lookup.
#[derive(Debug, Clone)]
pub struct ItemNameRepository {
    db: DatabaseConnection,
}

impl ItemNameRepository {
    /// Creates a new item-name repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves a free-text name to a canonical item-name id.
    ///
    /// With an explicit id the id is used as-is; a supplied category then
    /// overwrites the existing row's category (update, not create). Without
    /// one, the name is upserted: `INSERT .. ON CONFLICT (name) DO NOTHING`
    /// followed by a lookup, so a previously-unseen name creates exactly one
    /// row even under concurrent resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn resolve(
        &self,
        name: &str,
        explicit_item_id: Option<i64>,
        category_id: Option<Uuid>,
    ) -> Result<i64, ItemNameError> {
        if let Some(id) = explicit_item_id {
            if category_id.is_some() {
                if let Some(existing) = item_names::Entity::find_by_id(id).one(&self.db).await? {
                    self.overwrite_category(existing, category_id).await?;
                }
            }
            return Ok(id);
        }

        let now = Utc::now().into();
        let inserted = item_names::Entity::insert(item_names::ActiveModel {
            name: Set(name.to_string()),
            category_id: Set(category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(item_names::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await?;

        let row = item_names::Entity::find()
            .filter(item_names::Column::Name.eq(name))
            .one(&self.db)
            .await?
            .ok_or_else(|| ItemNameError::MissingAfterUpsert(name.to_string()))?;

        if inserted > 0 {
            debug!(item_name_id = row.id, name, "created canonical item name");
        } else if category_id.is_some() {
            // Pre-existing name with an explicit category: overwrite it.
            let id = row.id;
            self.overwrite_category(row, category_id).await?;
            return Ok(id);
        }

        Ok(row.id)
    }

    /// Resolves a batch of requests sequentially, in order.
    ///
    /// A name repeated within the batch resolves to the id created by its
    /// first occurrence, because each resolution commits before the next
    /// begins.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error; earlier resolutions stay
    /// committed.
    pub async fn resolve_batch(
        &self,
        requests: &[ResolveRequest],
    ) -> Result<Vec<i64>, ItemNameError> {
        let mut ids = Vec::with_capacity(requests.len());
        for request in requests {
            let id = self
                .resolve(
                    &request.name,
                    request.explicit_item_id,
                    request.category_id,
                )
                .await?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Updates the category of a canonical item name.
    ///
    /// Pure update: loads the row, sets the category (`None` clears it),
    /// persists. Returns `None` when the id is unknown. Receipt items that
    /// reference the row by identity observe the new category at read time;
    /// their legacy free-text `category` column is never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_category(
        &self,
        item_name_id: i64,
        category_id: Option<Uuid>,
    ) -> Result<Option<item_names::Model>, ItemNameError> {
        let Some(existing) = item_names::Entity::find_by_id(item_name_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let updated = self.overwrite_category(existing, category_id).await?;
        Ok(Some(updated))
    }

    /// Gets a canonical item name by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, item_name_id: i64) -> Result<Option<item_names::Model>, ItemNameError> {
        let row = item_names::Entity::find_by_id(item_name_id)
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Looks up a canonical item name by exact name match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<item_names::Model>, ItemNameError> {
        let row = item_names::Entity::find()
            .filter(item_names::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    async fn overwrite_category(
        &self,
        existing: item_names::Model,
        category_id: Option<Uuid>,
    ) -> Result<item_names::Model, ItemNameError> {
        let mut active: item_names::ActiveModel = existing.into();
        active.category_id = Set(category_id);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
