//! Report repository: cross-receipt aggregation for a tenant.
//!
//! Spending summaries and calendar-bucketed grouping. Period boundaries are
//! always supplied by the caller; this repository never computes "today".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use recivo_core::receipt::period::{bucket_start, summarize, PeriodBucket, ReceiptSummary, SummaryCutoffs};
use recivo_shared::types::{PageRequest, PageResponse};
use recivo_shared::AppError;

use crate::entities::receipts;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One calendar bucket of receipts with its subtotal.
#[derive(Debug, Clone)]
pub struct ReceiptGroup {
    /// Start of the bucket (Sunday, 1st of month, or Jan 1st).
    pub period_start: NaiveDate,
    /// Sum of total_amount over the bucket's receipts.
    pub subtotal: Decimal,
    /// Member receipts, newest first.
    pub receipts: Vec<receipts::Model>,
}

/// Report repository for aggregation queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the four-bucket spending summary for a tenant.
    ///
    /// A single pass of conditional sums over the tenant's receipts, using
    /// the caller-supplied year/month/week cutoffs (week cutoff follows the
    /// Sunday-start convention).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(
        &self,
        user_id: &str,
        cutoffs: &SummaryCutoffs,
    ) -> Result<ReceiptSummary, ReportError> {
        let rows: Vec<(sea_orm::prelude::DateTimeWithTimeZone, Decimal)> =
            receipts::Entity::find()
                .filter(receipts::Column::UserId.eq(user_id))
                .select_only()
                .column(receipts::Column::ReceiptDate)
                .column(receipts::Column::TotalAmount)
                .into_tuple()
                .all(&self.db)
                .await?;

        let summary = summarize(
            rows.into_iter()
                .map(|(date, amount)| (date.to_utc(), amount)),
            cutoffs,
        );
        Ok(summary)
    }

    /// Groups a tenant's receipts into calendar buckets, paged over buckets.
    ///
    /// Receipts are ordered newest first; each bucket carries its member
    /// receipts and a per-bucket subtotal. Paging applies to buckets, not to
    /// receipts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn grouped(
        &self,
        user_id: &str,
        bucket: PeriodBucket,
        page: &PageRequest,
    ) -> Result<PageResponse<ReceiptGroup>, ReportError> {
        let rows = receipts::Entity::find()
            .filter(receipts::Column::UserId.eq(user_id))
            .order_by_desc(receipts::Column::ReceiptDate)
            .order_by_desc(receipts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        // Rows arrive date-descending, so receipts of one bucket are
        // contiguous and bucket starts are non-increasing.
        let mut groups: Vec<ReceiptGroup> = Vec::new();
        for receipt in rows {
            let start = bucket_start(receipt.receipt_date.date_naive(), bucket);
            match groups.last_mut() {
                Some(group) if group.period_start == start => {
                    group.subtotal += receipt.total_amount;
                    group.receipts.push(receipt);
                }
                _ => groups.push(ReceiptGroup {
                    period_start: start,
                    subtotal: receipt.total_amount,
                    receipts: vec![receipt],
                }),
            }
        }

        let total = groups.len() as u64;
        let data: Vec<ReceiptGroup> = groups
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}
