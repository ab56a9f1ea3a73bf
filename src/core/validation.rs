use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;

/// Check an invoice's structure before any arithmetic.
///
/// Stops at the first violation: header, then the item list, then each
/// item in order. Identifiers are checked for emptiness only; a
/// whitespace-only id is accepted.
pub fn validate_invoice(invoice: &Invoice) -> Result<(), ValidationError> {
    if invoice.invoice_id.is_empty() {
        return Err(ValidationError::new(
            "invoice_id",
            "invalid invoice header: invoice id is missing",
        ));
    }
    if invoice.customer_id.is_empty() {
        return Err(ValidationError::new(
            "customer_id",
            "invalid invoice header: customer id is missing",
        ));
    }

    if invoice.items.is_empty() {
        return Err(ValidationError::new(
            "items",
            "invoice must contain items",
        ));
    }

    invoice
        .items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| validate_item(item, i))
}

fn validate_item(item: &LineItem, index: usize) -> Result<(), ValidationError> {
    let prefix = format!("items[{index}]");

    if item.sku.is_empty() {
        return Err(ValidationError::new(
            format!("{prefix}.sku"),
            "invalid item: sku is missing",
        ));
    }

    if item.quantity <= 0 {
        return Err(ValidationError::new(
            format!("{prefix}.quantity"),
            format!(
                "invalid item {}: quantity {} must be positive",
                item.sku, item.quantity
            ),
        ));
    }

    if item.unit_price < Decimal::ZERO {
        return Err(ValidationError::new(
            format!("{prefix}.unit_price"),
            format!(
                "invalid item {}: unit price {} must not be negative",
                item.sku, item.unit_price
            ),
        ));
    }

    Ok(())
}
