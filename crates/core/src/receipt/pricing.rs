//! Line-total computation for receipt items.

use rust_decimal::Decimal;

/// Computes the total price of a receipt line.
///
/// Defaults to `quantity * unit_price`; an explicitly supplied total (a
/// printed line total that differs from the computed one, e.g. due to a
/// line-level discount) wins over the computation. Negative unit prices
/// represent refund lines and are allowed.
#[must_use]
pub fn line_total(quantity: Decimal, unit_price: Decimal, explicit_total: Option<Decimal>) -> Decimal {
    explicit_total.unwrap_or_else(|| quantity * unit_price)
}
