use rust_decimal::Decimal;

use super::error::PricingError;
use super::types::*;
use super::validation;

/// Builder for constructing valid invoices.
///
/// ```
/// use preiskalk::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("I-2024-001", "C-42", "US")
///     .membership("gold")
///     .coupon("VIP20")
///     .add_item(LineItemBuilder::new("LAMP-1", dec!(80), 2).category("lighting").fragile().build())
///     .add_item(LineItemBuilder::new("BULB-4", dec!(3.50), 10).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.items.len(), 2);
/// ```
pub struct InvoiceBuilder {
    invoice_id: String,
    customer_id: String,
    country: String,
    membership: String,
    coupon: Option<String>,
    items: Vec<LineItem>,
}

impl InvoiceBuilder {
    pub fn new(
        invoice_id: impl Into<String>,
        customer_id: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            customer_id: customer_id.into(),
            country: country.into(),
            membership: Membership::None.label().to_string(),
            coupon: None,
            items: Vec::new(),
        }
    }

    pub fn membership(mut self, label: impl Into<String>) -> Self {
        self.membership = label.into();
        self
    }

    pub fn coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon = Some(code.into());
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// [`build_unchecked`](Self::build_unchecked) followed by
    /// [`validate_invoice`](validation::validate_invoice).
    pub fn build(self) -> Result<Invoice, PricingError> {
        let invoice = self.build_unchecked();
        validation::validate_invoice(&invoice)?;
        Ok(invoice)
    }

    /// Build without validation, e.g. to price data imported from elsewhere.
    pub fn build_unchecked(self) -> Invoice {
        Invoice {
            invoice_id: self.invoice_id,
            customer_id: self.customer_id,
            country: self.country,
            membership: self.membership,
            coupon: self.coupon,
            items: self.items,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    sku: String,
    category: String,
    unit_price: Decimal,
    quantity: i64,
    fragile: bool,
}

impl LineItemBuilder {
    pub fn new(sku: impl Into<String>, unit_price: Decimal, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            category: String::new(),
            unit_price,
            quantity,
            fragile: false,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn fragile(mut self) -> Self {
        self.fragile = true;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            sku: self.sku,
            category: self.category,
            unit_price: self.unit_price,
            quantity: self.quantity,
            fragile: self.fragile,
        }
    }
}
