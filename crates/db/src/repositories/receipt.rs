//! Receipt repository: tenant-isolated CRUD, paging, and loading of the
//! receipt aggregate.
//!
//! Every read takes a tenant id and filters by it; there is no unfiltered
//! load-by-id for tenant-scoped entities. Writes that touch the aggregate's
//! item collection run as an explicit unit of work: one database transaction
//! containing exactly the inserts, updates, and deletes the caller's desired
//! item set implies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use recivo_core::receipt::{pricing, validation, ValidationError};
use recivo_shared::types::{PageRequest, PageResponse};
use recivo_shared::AppError;

use crate::entities::{merchants, receipt_items, receipts, sea_orm_active_enums::ReceiptStatus};

/// Error types for receipt operations.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    /// Receipt not found for this tenant.
    #[error("Receipt not found: {0}")]
    NotFound(Uuid),

    /// An item id in the update input does not belong to the receipt.
    #[error("Receipt item not found: {0}")]
    ItemNotFound(Uuid),

    /// Construction-time validation failure.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReceiptError> for AppError {
    fn from(err: ReceiptError) -> Self {
        match err {
            ReceiptError::NotFound(_) | ReceiptError::ItemNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ReceiptError::Validation(e) => Self::Validation(e.to_string()),
            ReceiptError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for a receipt item created alongside a receipt.
#[derive(Debug, Clone)]
pub struct CreateReceiptItemInput {
    /// Item name as printed.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Quantity (fractional allowed).
    pub quantity: Decimal,
    /// Unit of the quantity.
    pub quantity_unit: Option<String>,
    /// Price per unit; negative represents a refund line.
    pub unit_price: Decimal,
    /// Explicit line total; defaults to quantity x unit price when absent.
    pub total_price: Option<Decimal>,
    /// Legacy denormalized free-text category.
    pub category: Option<String>,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Canonical item-name reference, when resolved.
    pub item_name_id: Option<i64>,
}

/// Input for creating a receipt aggregate.
#[derive(Debug, Clone)]
pub struct CreateReceiptInput {
    /// Owning tenant.
    pub user_id: String,
    /// Merchant the receipt belongs to.
    pub merchant_id: Uuid,
    /// Receipt number as printed.
    pub receipt_number: String,
    /// Transaction timestamp.
    pub receipt_date: DateTime<Utc>,
    /// Subtotal before tax.
    pub sub_total: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// Grand total. Should equal sub_total + tax_amount by the time the
    /// receipt is marked processed; not enforced at construction.
    pub total_amount: Decimal,
    /// Loyalty reward, if any.
    pub reward: Option<Decimal>,
    /// Currency code.
    pub currency: String,
    /// Stored image location.
    pub image_path: Option<String>,
    /// Raw document text.
    pub raw_text: Option<String>,
    /// Line items, in creation order.
    pub items: Vec<CreateReceiptItemInput>,
}

/// Desired state of one item within a receipt update.
#[derive(Debug, Clone)]
pub struct UpdateReceiptItemInput {
    /// Existing row id, or `None` for an appended item.
    pub id: Option<Uuid>,
    /// Item name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit of the quantity.
    pub quantity_unit: Option<String>,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Explicit line total; when absent the total is recomputed from
    /// quantity x unit price, discarding any previously stored override.
    pub total_price: Option<Decimal>,
    /// Legacy free-text category.
    pub category: Option<String>,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Canonical item-name reference.
    pub item_name_id: Option<i64>,
}

/// Input for updating a receipt aggregate.
///
/// `items` is the complete desired item set: stored items absent from it are
/// deleted, entries without an id are inserted, the rest are updated.
#[derive(Debug, Clone)]
pub struct UpdateReceiptInput {
    /// Receipt to update.
    pub id: Uuid,
    /// Merchant reference.
    pub merchant_id: Uuid,
    /// Receipt number.
    pub receipt_number: String,
    /// Transaction timestamp.
    pub receipt_date: DateTime<Utc>,
    /// Subtotal before tax.
    pub sub_total: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// Grand total.
    pub total_amount: Decimal,
    /// Loyalty reward, if any.
    pub reward: Option<Decimal>,
    /// Currency code.
    pub currency: String,
    /// Stored image location.
    pub image_path: Option<String>,
    /// Raw document text.
    pub raw_text: Option<String>,
    /// Complete desired item set.
    pub items: Vec<UpdateReceiptItemInput>,
}

/// A receipt aggregate: header, merchant, and ordered items.
#[derive(Debug, Clone)]
pub struct ReceiptWithItems {
    /// Receipt header.
    pub receipt: receipts::Model,
    /// Referenced merchant.
    pub merchant: Option<merchants::Model>,
    /// Items in creation order.
    pub items: Vec<receipt_items::Model>,
}

/// Receipt repository for CRUD and paged queries.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    db: DatabaseConnection,
}

impl ReceiptRepository {
    /// Creates a new receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts a receipt and all of its items in one transaction.
    ///
    /// The receipt is created with status `Processing`. Item totals default
    /// to quantity x unit price unless explicitly overridden.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database operation fails.
    pub async fn create(&self, input: CreateReceiptInput) -> Result<ReceiptWithItems, ReceiptError> {
        validation::validate_receipt(&input.receipt_number, &input.currency, &input.user_id)?;
        for item in &input.items {
            validation::validate_item(&item.name)?;
        }

        let now = Utc::now().into();
        let receipt_id = Uuid::now_v7();

        let txn = self.db.begin().await?;

        let receipt = receipts::ActiveModel {
            id: Set(receipt_id),
            receipt_number: Set(input.receipt_number.clone()),
            receipt_date: Set(input.receipt_date.into()),
            sub_total: Set(input.sub_total),
            tax_amount: Set(input.tax_amount),
            total_amount: Set(input.total_amount),
            reward: Set(input.reward),
            currency: Set(input.currency.clone()),
            image_path: Set(input.image_path.clone()),
            raw_text: Set(input.raw_text.clone()),
            status: Set(ReceiptStatus::Processing),
            merchant_id: Set(input.merchant_id),
            user_id: Set(input.user_id.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for (line_no, item) in input.items.iter().enumerate() {
            let inserted = insert_item(&txn, receipt_id, &input.user_id, line_no_from(line_no), item)
                .await?;
            items.push(inserted);
        }

        let merchant = merchants::Entity::find_by_id(input.merchant_id)
            .filter(merchants::Column::UserId.eq(input.user_id.as_str()))
            .one(&txn)
            .await?;

        txn.commit().await?;

        debug!(receipt_id = %receipt.id, items = items.len(), "created receipt aggregate");

        Ok(ReceiptWithItems {
            receipt,
            merchant,
            items,
        })
    }

    /// Updates a receipt aggregate as an explicit unit of work.
    ///
    /// One transaction: header fields are updated, the stored item set is
    /// diffed against `input.items`, and exactly the implied inserts,
    /// updates, and deletes are issued. Updated items have their total
    /// recomputed from quantity x unit price unless the input supplies an
    /// explicit total.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the receipt does not exist for this tenant,
    /// `ItemNotFound` if an input item id does not belong to the receipt,
    /// or a database error.
    pub async fn update(
        &self,
        user_id: &str,
        input: UpdateReceiptInput,
    ) -> Result<ReceiptWithItems, ReceiptError> {
        validation::validate_receipt(&input.receipt_number, &input.currency, user_id)?;
        for item in &input.items {
            validation::validate_item(&item.name)?;
        }

        let txn = self.db.begin().await?;

        let existing = receipts::Entity::find_by_id(input.id)
            .filter(receipts::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(ReceiptError::NotFound(input.id))?;

        let now = Utc::now().into();

        let mut header: receipts::ActiveModel = existing.into();
        header.receipt_number = Set(input.receipt_number.clone());
        header.receipt_date = Set(input.receipt_date.into());
        header.sub_total = Set(input.sub_total);
        header.tax_amount = Set(input.tax_amount);
        header.total_amount = Set(input.total_amount);
        header.reward = Set(input.reward);
        header.currency = Set(input.currency.clone());
        header.image_path = Set(input.image_path.clone());
        header.raw_text = Set(input.raw_text.clone());
        header.merchant_id = Set(input.merchant_id);
        header.updated_at = Set(now);
        let receipt = header.update(&txn).await?;

        let stored: HashMap<Uuid, receipt_items::Model> = receipt_items::Entity::find()
            .filter(receipt_items::Column::ReceiptId.eq(input.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        // Stored items missing from the desired set are deleted.
        let desired_ids: Vec<Uuid> = input.items.iter().filter_map(|i| i.id).collect();
        let removed: Vec<Uuid> = stored
            .keys()
            .filter(|id| !desired_ids.contains(id))
            .copied()
            .collect();
        if !removed.is_empty() {
            receipt_items::Entity::delete_many()
                .filter(receipt_items::Column::Id.is_in(removed.clone()))
                .exec(&txn)
                .await?;
        }

        let mut next_line_no = stored.values().map(|i| i.line_no).max().unwrap_or(-1) + 1;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            match item.id {
                Some(item_id) => {
                    let current = stored
                        .get(&item_id)
                        .ok_or(ReceiptError::ItemNotFound(item_id))?;
                    let mut active: receipt_items::ActiveModel = current.clone().into();
                    active.name = Set(item.name.clone());
                    active.description = Set(item.description.clone());
                    active.quantity = Set(item.quantity);
                    active.quantity_unit = Set(item.quantity_unit.clone());
                    active.unit_price = Set(item.unit_price);
                    active.total_price = Set(pricing::line_total(
                        item.quantity,
                        item.unit_price,
                        item.total_price,
                    ));
                    active.category = Set(item.category.clone());
                    active.sku = Set(item.sku.clone());
                    active.item_name_id = Set(item.item_name_id);
                    active.updated_at = Set(now);
                    items.push(active.update(&txn).await?);
                }
                None => {
                    let create = CreateReceiptItemInput {
                        name: item.name.clone(),
                        description: item.description.clone(),
                        quantity: item.quantity,
                        quantity_unit: item.quantity_unit.clone(),
                        unit_price: item.unit_price,
                        total_price: item.total_price,
                        category: item.category.clone(),
                        sku: item.sku.clone(),
                        item_name_id: item.item_name_id,
                    };
                    items.push(insert_item(&txn, input.id, user_id, next_line_no, &create).await?);
                    next_line_no += 1;
                }
            }
        }

        let merchant = merchants::Entity::find_by_id(receipt.merchant_id)
            .filter(merchants::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        txn.commit().await?;

        items.sort_by_key(|i| i.line_no);

        Ok(ReceiptWithItems {
            receipt,
            merchant,
            items,
        })
    }

    /// Transitions a receipt's status.
    ///
    /// Processing receipts move to `Processed` or `Failed`; re-processing a
    /// processed receipt is permitted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the receipt does not exist for this tenant, or
    /// a database error.
    pub async fn update_status(
        &self,
        user_id: &str,
        receipt_id: Uuid,
        status: ReceiptStatus,
    ) -> Result<receipts::Model, ReceiptError> {
        let existing = receipts::Entity::find_by_id(receipt_id)
            .filter(receipts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(ReceiptError::NotFound(receipt_id))?;

        let mut active: receipts::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes all items of a receipt with a single bulk statement.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete_receipt_items(
        &self,
        user_id: &str,
        receipt_id: Uuid,
    ) -> Result<u64, ReceiptError> {
        let result = receipt_items::Entity::delete_many()
            .filter(receipt_items::Column::ReceiptId.eq(receipt_id))
            .filter(receipt_items::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes a receipt and all of its items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the receipt does not exist for this tenant, or
    /// a database error.
    pub async fn delete(&self, user_id: &str, receipt_id: Uuid) -> Result<(), ReceiptError> {
        let txn = self.db.begin().await?;

        let existing = receipts::Entity::find_by_id(receipt_id)
            .filter(receipts::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(ReceiptError::NotFound(receipt_id))?;

        receipt_items::Entity::delete_many()
            .filter(receipt_items::Column::ReceiptId.eq(receipt_id))
            .exec(&txn)
            .await?;

        receipts::Entity::delete_by_id(existing.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    // ========================================================================
    // Reads (all tenant-filtered)
    // ========================================================================

    /// Gets a receipt header by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(
        &self,
        user_id: &str,
        receipt_id: Uuid,
    ) -> Result<Option<receipts::Model>, ReceiptError> {
        let receipt = receipts::Entity::find_by_id(receipt_id)
            .filter(receipts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(receipt)
    }

    /// Loads the full aggregate: header, merchant, and items in creation
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_with_items(
        &self,
        user_id: &str,
        receipt_id: Uuid,
    ) -> Result<Option<ReceiptWithItems>, ReceiptError> {
        let Some(receipt) = self.get(user_id, receipt_id).await? else {
            return Ok(None);
        };

        let merchant = merchants::Entity::find_by_id(receipt.merchant_id)
            .filter(merchants::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        let items = receipt_items::Entity::find()
            .filter(receipt_items::Column::ReceiptId.eq(receipt_id))
            .order_by_asc(receipt_items::Column::LineNo)
            .all(&self.db)
            .await?;

        Ok(Some(ReceiptWithItems {
            receipt,
            merchant,
            items,
        }))
    }

    /// Finds the aggregate owning a given receipt item.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_item_id(
        &self,
        user_id: &str,
        receipt_item_id: Uuid,
    ) -> Result<Option<ReceiptWithItems>, ReceiptError> {
        let Some(item) = receipt_items::Entity::find_by_id(receipt_item_id)
            .filter(receipt_items::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        self.get_with_items(user_id, item.receipt_id).await
    }

    /// Lists all receipts of a tenant, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: &str) -> Result<Vec<receipts::Model>, ReceiptError> {
        let receipts = tenant_query(user_id).all(&self.db).await?;
        Ok(receipts)
    }

    /// Lists a tenant's receipts, paged.
    ///
    /// The total is computed by a separate count query over the same filter;
    /// under concurrent writes the two queries may observe different
    /// snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_paged(
        &self,
        user_id: &str,
        page: &PageRequest,
    ) -> Result<PageResponse<receipts::Model>, ReceiptError> {
        self.page_query(tenant_query(user_id), page).await
    }

    /// Lists a tenant's receipts for one merchant, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_merchant(
        &self,
        user_id: &str,
        merchant_id: Uuid,
    ) -> Result<Vec<receipts::Model>, ReceiptError> {
        let receipts = tenant_query(user_id)
            .filter(receipts::Column::MerchantId.eq(merchant_id))
            .all(&self.db)
            .await?;
        Ok(receipts)
    }

    /// Paged variant of [`Self::list_by_merchant`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_merchant_paged(
        &self,
        user_id: &str,
        merchant_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<receipts::Model>, ReceiptError> {
        let query = tenant_query(user_id).filter(receipts::Column::MerchantId.eq(merchant_id));
        self.page_query(query, page).await
    }

    /// Lists a tenant's receipts within an inclusive date range, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_date_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<receipts::Model>, ReceiptError> {
        let receipts = date_range_query(user_id, from, to).all(&self.db).await?;
        Ok(receipts)
    }

    /// Paged variant of [`Self::list_by_date_range`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_date_range_paged(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: &PageRequest,
    ) -> Result<PageResponse<receipts::Model>, ReceiptError> {
        self.page_query(date_range_query(user_id, from, to), page).await
    }

    /// Lists a tenant's receipts with a given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_status(
        &self,
        user_id: &str,
        status: ReceiptStatus,
    ) -> Result<Vec<receipts::Model>, ReceiptError> {
        let receipts = tenant_query(user_id)
            .filter(receipts::Column::Status.eq(status))
            .all(&self.db)
            .await?;
        Ok(receipts)
    }

    async fn page_query(
        &self,
        query: Select<receipts::Entity>,
        page: &PageRequest,
    ) -> Result<PageResponse<receipts::Model>, ReceiptError> {
        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}

fn tenant_query(user_id: &str) -> Select<receipts::Entity> {
    receipts::Entity::find()
        .filter(receipts::Column::UserId.eq(user_id))
        .order_by_desc(receipts::Column::CreatedAt)
        .order_by_desc(receipts::Column::Id)
}

fn date_range_query(
    user_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Select<receipts::Entity> {
    tenant_query(user_id)
        .filter(receipts::Column::ReceiptDate.gte(from))
        .filter(receipts::Column::ReceiptDate.lte(to))
}

async fn insert_item(
    txn: &DatabaseTransaction,
    receipt_id: Uuid,
    user_id: &str,
    line_no: i32,
    item: &CreateReceiptItemInput,
) -> Result<receipt_items::Model, ReceiptError> {
    let now = Utc::now().into();
    let inserted = receipt_items::ActiveModel {
        id: Set(Uuid::now_v7()),
        receipt_id: Set(receipt_id),
        name: Set(item.name.clone()),
        description: Set(item.description.clone()),
        quantity: Set(item.quantity),
        quantity_unit: Set(item.quantity_unit.clone()),
        unit_price: Set(item.unit_price),
        total_price: Set(pricing::line_total(
            item.quantity,
            item.unit_price,
            item.total_price,
        )),
        category: Set(item.category.clone()),
        sku: Set(item.sku.clone()),
        item_name_id: Set(item.item_name_id),
        user_id: Set(user_id.to_string()),
        line_no: Set(line_no),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;
    Ok(inserted)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn line_no_from(index: usize) -> i32 {
    index as i32
}
