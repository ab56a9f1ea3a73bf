use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::error::ValidationError;
use super::tables::PricingTables;
use super::types::*;
use super::validation::validate_invoice;

/// Prices invoices against a fixed set of [`PricingTables`].
///
/// Holds no mutable state; one instance can be shared across threads.
///
/// ```
/// use preiskalk::core::*;
/// use rust_decimal_macros::dec;
///
/// let calc = PricingCalculator::standard();
/// let invoice = InvoiceBuilder::new("I-001", "C-001", "TH")
///     .add_item(LineItemBuilder::new("A", dec!(100), 2).category("book").build())
///     .build()
///     .unwrap();
///
/// let result = calc.compute_total(&invoice).unwrap();
/// assert_eq!(result.total, dec!(274));
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    tables: PricingTables,
}

impl PricingCalculator {
    pub fn new(tables: PricingTables) -> Self {
        Self { tables }
    }

    /// Calculator over [`PricingTables::standard`].
    pub fn standard() -> Self {
        Self::new(PricingTables::standard())
    }

    pub fn tables(&self) -> &PricingTables {
        &self.tables
    }

    /// Validate `invoice`, then derive its total and advisories.
    ///
    /// Order of application: subtotal, fragile fee, membership or bulk
    /// discount, coupon, shipping (on the pre-discount subtotal), tax (on
    /// `subtotal - discount`). The discount is subtracted once, at the end,
    /// and the total never drops below zero.
    ///
    /// Amounts that leave the `Decimal` range are reported as a
    /// [`ValidationError`] naming the offending item or figure.
    pub fn compute_total(&self, invoice: &Invoice) -> Result<PricingResult, ValidationError> {
        validate_invoice(invoice)?;

        let policy = &self.tables.policy;
        let tier = invoice.tier();
        let mut warnings = Vec::new();

        let mut subtotal = Decimal::ZERO;
        let mut fragile_fee = Decimal::ZERO;
        for (index, item) in invoice.items.iter().enumerate() {
            subtotal = item
                .amount()
                .and_then(|amount| subtotal.checked_add(amount))
                .ok_or_else(|| item_out_of_range(index, item, "unit_price"))?;
            if item.fragile {
                fragile_fee = policy
                    .fragile_fee_per_unit
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|fee| fragile_fee.checked_add(fee))
                    .ok_or_else(|| item_out_of_range(index, item, "quantity"))?;
            }
        }

        let mut discount = match tier {
            Membership::Gold => subtotal.checked_mul(policy.gold_rate),
            Membership::Platinum => subtotal.checked_mul(policy.platinum_rate),
            Membership::None if subtotal > policy.bulk_threshold => Some(policy.bulk_discount),
            Membership::None => Some(Decimal::ZERO),
        }
        .ok_or_else(|| out_of_range("discount"))?;
        trace!(%subtotal, %fragile_fee, base_discount = %discount, tier = tier.label());

        if let Some(code) = &invoice.coupon {
            match self.tables.coupons.rate_for(code.trim()) {
                Some(rate) => {
                    discount = subtotal
                        .checked_mul(rate)
                        .and_then(|off| discount.checked_add(off))
                        .ok_or_else(|| out_of_range("discount"))?;
                }
                None => {
                    debug!(invoice_id = %invoice.invoice_id, coupon = %code, "coupon not found");
                    warnings.push(Advisory::UnknownCoupon);
                }
            }
        }

        let shipping = self.tables.shipping_cost(&invoice.country, subtotal);
        let tax = subtotal
            .checked_sub(discount)
            .and_then(|taxable| self.tables.tax(&invoice.country, taxable))
            .ok_or_else(|| out_of_range("tax"))?;
        trace!(%discount, %shipping, %tax, country = %invoice.country);

        let total = subtotal
            .checked_add(shipping)
            .and_then(|sum| sum.checked_add(fragile_fee))
            .and_then(|sum| sum.checked_add(tax))
            .and_then(|sum| sum.checked_sub(discount))
            .ok_or_else(|| out_of_range("total"))?
            .max(Decimal::ZERO);

        if subtotal > policy.upgrade_threshold && !tier.is_premium() {
            warnings.push(Advisory::ConsiderMembershipUpgrade);
        }

        debug!(
            invoice_id = %invoice.invoice_id,
            %total,
            warnings = warnings.len(),
            "invoice priced"
        );

        Ok(PricingResult {
            total,
            warnings,
            breakdown: PriceBreakdown {
                subtotal,
                fragile_fee,
                discount,
                shipping,
                tax,
            },
        })
    }
}

fn item_out_of_range(index: usize, item: &LineItem, field: &str) -> ValidationError {
    ValidationError::new(
        format!("items[{index}].{field}"),
        format!("invalid item {}: amount out of range", item.sku),
    )
}

fn out_of_range(field: &str) -> ValidationError {
    ValidationError::new(field, "amount out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(country: &str, membership: &str, coupon: Option<&str>, items: Vec<LineItem>) -> Invoice {
        Invoice {
            invoice_id: "I-001".into(),
            customer_id: "C-001".into(),
            country: country.into(),
            membership: membership.into(),
            coupon: coupon.map(str::to_string),
            items,
        }
    }

    fn item(unit_price: Decimal, quantity: i64) -> LineItem {
        LineItem {
            sku: "A".into(),
            category: "book".into(),
            unit_price,
            quantity,
            fragile: false,
        }
    }

    #[test]
    fn basic_thai_invoice() {
        let calc = PricingCalculator::standard();
        let result = calc
            .compute_total(&invoice("TH", "none", None, vec![item(dec!(100), 2)]))
            .unwrap();

        assert_eq!(result.breakdown.subtotal, dec!(200));
        assert_eq!(result.breakdown.shipping, dec!(60));
        assert_eq!(result.breakdown.tax, dec!(14));
        assert_eq!(result.total, dec!(274));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn gold_member_in_us() {
        let calc = PricingCalculator::standard();
        let result = calc
            .compute_total(&invoice("US", "gold", None, vec![item(dec!(1000), 1)]))
            .unwrap();

        assert_eq!(result.breakdown.discount, dec!(30));
        assert_eq!(result.breakdown.shipping, dec!(0));
        assert_eq!(result.breakdown.tax, dec!(77.6));
        assert_eq!(result.total, dec!(1047.6));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn fragile_fee_is_per_unit_and_untaxed() {
        let calc = PricingCalculator::standard();
        let mut vase = item(dec!(10), 3);
        vase.fragile = true;
        let result = calc
            .compute_total(&invoice("TH", "none", None, vec![vase, item(dec!(20), 1)]))
            .unwrap();

        // subtotal 50, fragile 15, shipping 60, tax 3.5
        assert_eq!(result.breakdown.fragile_fee, dec!(15));
        assert_eq!(result.breakdown.tax, dec!(3.5));
        assert_eq!(result.total, dec!(128.5));
    }

    #[test]
    fn unknown_membership_is_priced_as_none() {
        let calc = PricingCalculator::standard();
        let items = vec![item(dec!(4000), 1)];
        let silver = calc
            .compute_total(&invoice("JP", "silver", None, items.clone()))
            .unwrap();
        let none = calc.compute_total(&invoice("JP", "none", None, items)).unwrap();
        assert_eq!(silver, none);
        assert_eq!(silver.breakdown.discount, dec!(20));
    }

    #[test]
    fn custom_policy_is_honoured() {
        let mut tables = PricingTables::standard();
        tables.policy.fragile_fee_per_unit = dec!(2);
        tables.policy.gold_rate = dec!(0.10);
        let calc = PricingCalculator::new(tables);

        let mut glass = item(dec!(100), 1);
        glass.fragile = true;
        let result = calc
            .compute_total(&invoice("ZZ", "gold", None, vec![glass]))
            .unwrap();

        assert_eq!(result.breakdown.fragile_fee, dec!(2));
        assert_eq!(result.breakdown.discount, dec!(10));
        // 100 + 25 + 2 + 4.5 - 10
        assert_eq!(result.total, dec!(121.5));
    }

    #[test]
    fn validation_precedes_computation() {
        let calc = PricingCalculator::standard();
        let err = calc
            .compute_total(&invoice("TH", "none", Some("BOGUS"), vec![item(dec!(1), 0)]))
            .unwrap_err();
        assert_eq!(err.field, "items[0].quantity");
    }

    #[test]
    fn oversized_line_amount_is_rejected() {
        let calc = PricingCalculator::standard();
        let err = calc
            .compute_total(&invoice("TH", "none", None, vec![item(Decimal::MAX, 2)]))
            .unwrap_err();
        assert_eq!(err.field, "items[0].unit_price");
        assert_eq!(err.message, "invalid item A: amount out of range");
    }

    #[test]
    fn oversized_fragile_fee_is_rejected() {
        let mut tables = PricingTables::standard();
        tables.policy.fragile_fee_per_unit = Decimal::MAX;
        let calc = PricingCalculator::new(tables);

        let mut glass = item(dec!(1), 2);
        glass.fragile = true;
        let err = calc
            .compute_total(&invoice("TH", "none", None, vec![item(dec!(1), 1), glass]))
            .unwrap_err();
        assert_eq!(err.field, "items[1].quantity");
    }
}
