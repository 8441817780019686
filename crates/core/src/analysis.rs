//! Interface types for the external document-analysis collaborator.
//!
//! The analysis engine itself (OCR, field extraction) is out of scope; the
//! core only consumes the structured result it produces for an uploaded
//! receipt image.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured fields extracted from a receipt image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysisResult {
    /// Merchant name as printed on the receipt.
    pub merchant_name: Option<String>,
    /// Merchant address, if detected.
    pub merchant_address: Option<String>,
    /// Merchant phone number, if detected.
    pub merchant_phone: Option<String>,
    /// Transaction timestamp, if detected.
    pub transaction_date: Option<DateTime<Utc>>,
    /// Receipt number as printed, if detected.
    pub receipt_number: Option<String>,
    /// Subtotal before tax.
    pub sub_total: Option<Decimal>,
    /// Tax amount.
    pub tax: Option<Decimal>,
    /// Grand total.
    pub total: Option<Decimal>,
    /// Loyalty reward amount, if any.
    pub reward: Option<Decimal>,
    /// Currency code, if detected.
    pub currency: Option<String>,
    /// Extracted line items.
    #[serde(default)]
    pub items: Vec<AnalyzedLineItem>,
    /// Full raw text of the document.
    pub raw_text: Option<String>,
    /// Whether the analysis succeeded.
    pub is_success: bool,
    /// Engine error message when `is_success` is false.
    pub error_message: Option<String>,
}

impl DocumentAnalysisResult {
    /// Creates a failed result carrying only the engine error and raw text.
    #[must_use]
    pub fn failed(error_message: impl Into<String>, raw_text: Option<String>) -> Self {
        Self {
            merchant_name: None,
            merchant_address: None,
            merchant_phone: None,
            transaction_date: None,
            receipt_number: None,
            sub_total: None,
            tax: None,
            total: None,
            reward: None,
            currency: None,
            items: Vec::new(),
            raw_text,
            is_success: false,
            error_message: Some(error_message.into()),
        }
    }
}

/// A single extracted line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedLineItem {
    /// Item name as printed.
    pub name: String,
    /// Item description, if any.
    pub description: Option<String>,
    /// Quantity (fractional allowed, e.g. 0.450 kg).
    pub quantity: Decimal,
    /// Unit of the quantity (e.g. "kg", "pcs").
    pub quantity_unit: Option<String>,
    /// Price per unit; negative represents a refund line.
    pub unit_price: Decimal,
    /// Printed line total, when it differs from quantity x unit price.
    pub total_price: Option<Decimal>,
    /// Free-text category printed or inferred by the engine.
    pub category: Option<String>,
    /// Stock keeping unit, if printed.
    pub sku: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_failed_result() {
        let result = DocumentAnalysisResult::failed("blurry image", Some("garbage".into()));
        assert!(!result.is_success);
        assert_eq!(result.error_message.as_deref(), Some("blurry image"));
        assert_eq!(result.raw_text.as_deref(), Some("garbage"));
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_line_item_deserializes_without_optionals() {
        let json = r#"{"name":"Milk","quantity":"2","unit_price":"3.50"}"#;
        let item: AnalyzedLineItem = serde_json::from_str(json).expect("valid json");
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, dec!(2));
        assert_eq!(item.unit_price, dec!(3.50));
        assert!(item.total_price.is_none());
    }
}
