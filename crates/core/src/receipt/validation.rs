//! Construction-time validation for receipt aggregates.
//!
//! Required string fields are checked synchronously at the point of entity
//! construction or update, before any storage call is made.

use thiserror::Error;

/// Validation errors raised before persistence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field was missing or blank.
    #[error("{0} is required")]
    Required(&'static str),
}

/// Checks that a required string field is present and non-blank.
///
/// # Errors
///
/// Returns `ValidationError::Required` naming the field when the value is
/// empty or whitespace-only.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Validates the required fields of a receipt header.
///
/// # Errors
///
/// Returns an error naming the first missing field.
pub fn validate_receipt(
    receipt_number: &str,
    currency: &str,
    user_id: &str,
) -> Result<(), ValidationError> {
    require("receipt_number", receipt_number)?;
    require("currency", currency)?;
    require("user_id", user_id)?;
    Ok(())
}

/// Validates the required fields of a receipt item.
///
/// # Errors
///
/// Returns an error when the item name is missing.
pub fn validate_item(name: &str) -> Result<(), ValidationError> {
    require("name", name)
}

/// Validates the required fields of a merchant.
///
/// # Errors
///
/// Returns an error when the merchant name is missing.
pub fn validate_merchant(name: &str) -> Result<(), ValidationError> {
    require("name", name)
}
