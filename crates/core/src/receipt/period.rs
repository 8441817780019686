//! Calendar bucketing and spending summaries.
//!
//! The week convention is Sunday-based: a week starts Sunday 00:00. This is
//! a product policy, and this module is its only home; callers supply
//! cutoffs computed from it rather than re-deriving "what is today".

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calendar bucket used for grouped receipt queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodBucket {
    /// Calendar week, starting Sunday.
    Week,
    /// Calendar month.
    Month,
    /// Calendar year.
    Year,
}

/// Truncates a date to the start of its bucket.
///
/// Week buckets start on Sunday, month buckets on the 1st, year buckets on
/// January 1st.
#[must_use]
pub fn bucket_start(date: NaiveDate, bucket: PeriodBucket) -> NaiveDate {
    match bucket {
        PeriodBucket::Week => {
            let back = u64::from(date.weekday().num_days_from_sunday());
            date.checked_sub_days(Days::new(back)).unwrap_or(date)
        }
        PeriodBucket::Month => date.with_day(1).unwrap_or(date),
        PeriodBucket::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
}

/// Caller-supplied period boundaries for a spending summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryCutoffs {
    /// Start of the current year.
    pub start_of_year: DateTime<Utc>,
    /// Start of the current month.
    pub start_of_month: DateTime<Utc>,
    /// Start of the current week (Sunday 00:00).
    pub start_of_week: DateTime<Utc>,
}

/// Conditional sums of receipt totals over the summary periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReceiptSummary {
    /// Sum over all receipts.
    pub total: Decimal,
    /// Sum over receipts dated on or after the start of the year.
    pub this_year: Decimal,
    /// Sum over receipts dated on or after the start of the month.
    pub this_month: Decimal,
    /// Sum over receipts dated on or after the start of the week.
    pub this_week: Decimal,
}

/// Folds `(receipt_date, total_amount)` rows into a summary in a single pass.
pub fn summarize<I>(rows: I, cutoffs: &SummaryCutoffs) -> ReceiptSummary
where
    I: IntoIterator<Item = (DateTime<Utc>, Decimal)>,
{
    let mut summary = ReceiptSummary::default();

    for (date, amount) in rows {
        summary.total += amount;
        if date >= cutoffs.start_of_year {
            summary.this_year += amount;
        }
        if date >= cutoffs.start_of_month {
            summary.this_month += amount;
        }
        if date >= cutoffs.start_of_week {
            summary.this_week += amount;
        }
    }

    summary
}
