//! Receipt domain logic.
//!
//! Pure calculations and rules for the receipt aggregate:
//!
//! - `pricing` - Line-total computation
//! - `period` - Calendar bucketing and spending summaries
//! - `validation` - Construction-time validation of required fields

pub mod period;
pub mod pricing;
pub mod validation;

pub use period::{bucket_start, summarize, PeriodBucket, ReceiptSummary, SummaryCutoffs};
pub use pricing::line_total;
pub use validation::ValidationError;
