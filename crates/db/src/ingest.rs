//! Receipt ingestion: turns a document-analysis result into a persisted
//! receipt aggregate.
//!
//! The flow per uploaded image: find-or-create the merchant for the tenant,
//! resolve every line-item name to its canonical id, persist the aggregate
//! in one transaction, then mark it processed. A failed analysis is still
//! persisted, as a `Failed` receipt carrying the raw text, so the upload is
//! visible to the tenant.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use recivo_core::analysis::DocumentAnalysisResult;
use recivo_shared::config::ReceiptConfig;
use recivo_shared::AppResult;

use crate::repositories::{
    CreateReceiptInput, CreateReceiptItemInput, ItemNameRepository, MerchantContact,
    MerchantRepository, ReceiptRepository, ReceiptWithItems, ResolveRequest,
};
use crate::entities::sea_orm_active_enums::ReceiptStatus;

const UNKNOWN_MERCHANT: &str = "Unknown";

/// Application service wiring merchants, item names, and receipts together.
#[derive(Debug, Clone)]
pub struct ReceiptIngestService {
    merchants: MerchantRepository,
    item_names: ItemNameRepository,
    receipts: ReceiptRepository,
    defaults: ReceiptConfig,
}

impl ReceiptIngestService {
    /// Creates a new ingestion service.
    #[must_use]
    pub fn new(db: DatabaseConnection, defaults: ReceiptConfig) -> Self {
        Self {
            merchants: MerchantRepository::new(db.clone()),
            item_names: ItemNameRepository::new(db.clone()),
            receipts: ReceiptRepository::new(db),
            defaults,
        }
    }

    /// Persists an analysis result as a receipt aggregate for the tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or any storage operation fails;
    /// storage failures propagate unchanged, with no retry.
    pub async fn ingest(
        &self,
        user_id: &str,
        analysis: DocumentAnalysisResult,
    ) -> AppResult<ReceiptWithItems> {
        if !analysis.is_success {
            return self.ingest_failed(user_id, &analysis).await;
        }

        let merchant = self
            .merchants
            .find_or_create(
                user_id,
                analysis.merchant_name.as_deref().unwrap_or(UNKNOWN_MERCHANT),
                MerchantContact {
                    address: analysis.merchant_address.clone(),
                    phone: analysis.merchant_phone.clone(),
                    ..MerchantContact::default()
                },
            )
            .await?;

        let requests: Vec<ResolveRequest> = analysis
            .items
            .iter()
            .map(|item| ResolveRequest {
                name: item.name.clone(),
                explicit_item_id: None,
                category_id: None,
            })
            .collect();
        let item_name_ids = self.item_names.resolve_batch(&requests).await?;

        let items: Vec<CreateReceiptItemInput> = analysis
            .items
            .iter()
            .zip(item_name_ids)
            .map(|(item, item_name_id)| CreateReceiptItemInput {
                name: item.name.clone(),
                description: item.description.clone(),
                quantity: item.quantity,
                quantity_unit: item.quantity_unit.clone(),
                unit_price: item.unit_price,
                total_price: item.total_price,
                category: item.category.clone(),
                sku: item.sku.clone(),
                item_name_id: Some(item_name_id),
            })
            .collect();

        let sub_total = analysis.sub_total.unwrap_or(Decimal::ZERO);
        let tax_amount = analysis.tax.unwrap_or(Decimal::ZERO);
        let created = self
            .receipts
            .create(CreateReceiptInput {
                user_id: user_id.to_string(),
                merchant_id: merchant.id,
                receipt_number: analysis
                    .receipt_number
                    .clone()
                    .unwrap_or_else(generated_receipt_number),
                receipt_date: analysis.transaction_date.unwrap_or_else(Utc::now),
                sub_total,
                tax_amount,
                total_amount: analysis.total.unwrap_or(sub_total + tax_amount),
                reward: analysis.reward,
                currency: analysis
                    .currency
                    .clone()
                    .unwrap_or_else(|| self.defaults.default_currency.clone()),
                image_path: None,
                raw_text: analysis.raw_text.clone(),
                items,
            })
            .await?;

        let receipt = self
            .receipts
            .update_status(user_id, created.receipt.id, ReceiptStatus::Processed)
            .await?;

        info!(
            receipt_id = %receipt.id,
            user_id,
            items = created.items.len(),
            "ingested receipt"
        );

        Ok(ReceiptWithItems { receipt, ..created })
    }

    async fn ingest_failed(
        &self,
        user_id: &str,
        analysis: &DocumentAnalysisResult,
    ) -> AppResult<ReceiptWithItems> {
        warn!(
            user_id,
            error = analysis.error_message.as_deref().unwrap_or("unknown"),
            "document analysis failed, persisting failed receipt"
        );

        let merchant = self
            .merchants
            .find_or_create(user_id, UNKNOWN_MERCHANT, MerchantContact::default())
            .await?;

        let created = self
            .receipts
            .create(CreateReceiptInput {
                user_id: user_id.to_string(),
                merchant_id: merchant.id,
                receipt_number: generated_receipt_number(),
                receipt_date: Utc::now(),
                sub_total: Decimal::ZERO,
                tax_amount: Decimal::ZERO,
                total_amount: Decimal::ZERO,
                reward: None,
                currency: self.defaults.default_currency.clone(),
                image_path: None,
                raw_text: analysis.raw_text.clone(),
                items: Vec::new(),
            })
            .await?;

        let receipt = self
            .receipts
            .update_status(user_id, created.receipt.id, ReceiptStatus::Failed)
            .await?;

        Ok(ReceiptWithItems { receipt, ..created })
    }
}

fn generated_receipt_number() -> String {
    format!("RCPT-{}", Uuid::now_v7().simple())
}
