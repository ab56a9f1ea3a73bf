//! Read-only pricing configuration: shipping tiers, tax rates, coupon rates
//! and the discount policy.
//!
//! Shipping and tax tables always carry a DEFAULT entry; the types make a
//! table without one unrepresentable.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Key of the fallback entry in country-indexed tables.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// A (threshold, cost) pair. Applies when the subtotal is strictly below
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTier {
    pub threshold: Decimal,
    pub cost: Decimal,
}

impl ShippingTier {
    pub fn new(threshold: Decimal, cost: Decimal) -> Self {
        Self { threshold, cost }
    }
}

/// Country → ordered shipping tiers, with a mandatory fallback list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<ShippingTier>>",
    into = "BTreeMap<String, Vec<ShippingTier>>"
)]
pub struct ShippingRules {
    default: Vec<ShippingTier>,
    by_country: BTreeMap<String, Vec<ShippingTier>>,
}

impl ShippingRules {
    pub fn new(default: Vec<ShippingTier>) -> Self {
        Self {
            default,
            by_country: BTreeMap::new(),
        }
    }

    /// Add or replace the tier list of one country. Order is kept as given.
    pub fn with_country(mut self, country: impl Into<String>, tiers: Vec<ShippingTier>) -> Self {
        let country = country.into();
        if country == DEFAULT_KEY {
            self.default = tiers;
        } else {
            self.by_country.insert(country, tiers);
        }
        self
    }

    /// Tier list for `country`, or the DEFAULT list.
    pub fn tiers_for(&self, country: &str) -> &[ShippingTier] {
        self.by_country
            .get(country)
            .map(Vec::as_slice)
            .unwrap_or(self.default.as_slice())
    }

    pub fn default_tiers(&self) -> &[ShippingTier] {
        &self.default
    }

    /// Cost of the first tier, in configured order, whose threshold is
    /// strictly above `subtotal`; zero when none is.
    pub fn cost(&self, country: &str, subtotal: Decimal) -> Decimal {
        self.tiers_for(country)
            .iter()
            .find(|tier| tier.threshold > subtotal)
            .map_or(Decimal::ZERO, |tier| tier.cost)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &[ShippingTier])> {
        std::iter::once((DEFAULT_KEY, self.default.as_slice())).chain(
            self.by_country
                .iter()
                .map(|(country, tiers)| (country.as_str(), tiers.as_slice())),
        )
    }
}

impl TryFrom<BTreeMap<String, Vec<ShippingTier>>> for ShippingRules {
    type Error = String;

    fn try_from(mut map: BTreeMap<String, Vec<ShippingTier>>) -> Result<Self, Self::Error> {
        let default = map
            .remove(DEFAULT_KEY)
            .ok_or_else(|| format!("shipping rules must contain a {DEFAULT_KEY} entry"))?;
        Ok(Self {
            default,
            by_country: map,
        })
    }
}

impl From<ShippingRules> for BTreeMap<String, Vec<ShippingTier>> {
    fn from(rules: ShippingRules) -> Self {
        let mut map = rules.by_country;
        map.insert(DEFAULT_KEY.to_string(), rules.default);
        map
    }
}

/// Country → tax rate fraction, with a mandatory fallback rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Decimal>",
    into = "BTreeMap<String, Decimal>"
)]
pub struct TaxRates {
    default: Decimal,
    by_country: BTreeMap<String, Decimal>,
}

impl TaxRates {
    pub fn new(default: Decimal) -> Self {
        Self {
            default,
            by_country: BTreeMap::new(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>, rate: Decimal) -> Self {
        let country = country.into();
        if country == DEFAULT_KEY {
            self.default = rate;
        } else {
            self.by_country.insert(country, rate);
        }
        self
    }

    /// Rate for `country`, or the DEFAULT rate.
    pub fn rate_for(&self, country: &str) -> Decimal {
        self.by_country
            .get(country)
            .copied()
            .unwrap_or(self.default)
    }

    /// `amount × rate_for(country)`, or `None` on `Decimal` overflow.
    pub fn tax(&self, country: &str, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.rate_for(country))
    }

    fn entries(&self) -> impl Iterator<Item = (&str, Decimal)> {
        std::iter::once((DEFAULT_KEY, self.default)).chain(
            self.by_country
                .iter()
                .map(|(country, rate)| (country.as_str(), *rate)),
        )
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for TaxRates {
    type Error = String;

    fn try_from(mut map: BTreeMap<String, Decimal>) -> Result<Self, Self::Error> {
        let default = map
            .remove(DEFAULT_KEY)
            .ok_or_else(|| format!("tax rates must contain a {DEFAULT_KEY} entry"))?;
        Ok(Self {
            default,
            by_country: map,
        })
    }
}

impl From<TaxRates> for BTreeMap<String, Decimal> {
    fn from(rates: TaxRates) -> Self {
        let mut map = rates.by_country;
        map.insert(DEFAULT_KEY.to_string(), rates.default);
        map
    }
}

/// Coupon code → discount rate fraction. Codes match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponRates(BTreeMap<String, Decimal>);

impl CouponRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coupon(mut self, code: impl Into<String>, rate: Decimal) -> Self {
        self.0.insert(code.into(), rate);
        self
    }

    /// Case-sensitive lookup of an already trimmed code.
    pub fn rate_for(&self, code: &str) -> Option<Decimal> {
        self.0.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Membership, bulk and surcharge constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountPolicy {
    /// Share of the subtotal discounted for gold members.
    pub gold_rate: Decimal,
    /// Share of the subtotal discounted for platinum members.
    pub platinum_rate: Decimal,
    /// Non-members get `bulk_discount` once the subtotal exceeds this.
    pub bulk_threshold: Decimal,
    pub bulk_discount: Decimal,
    /// Subtotal above which non-members are advised to upgrade.
    pub upgrade_threshold: Decimal,
    /// Surcharge per unit of a fragile item.
    pub fragile_fee_per_unit: Decimal,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            gold_rate: dec!(0.03),
            platinum_rate: dec!(0.05),
            bulk_threshold: dec!(3000),
            bulk_discount: dec!(20),
            upgrade_threshold: dec!(10000),
            fragile_fee_per_unit: dec!(5.0),
        }
    }
}

/// Everything a [`PricingCalculator`](super::PricingCalculator) needs to
/// price an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTables {
    pub shipping: ShippingRules,
    pub tax: TaxRates,
    #[serde(default)]
    pub coupons: CouponRates,
    #[serde(default)]
    pub policy: DiscountPolicy,
}

impl PricingTables {
    /// The reference tables for TH, JP and US with a DEFAULT fallback.
    pub fn standard() -> Self {
        let shipping = ShippingRules::new(vec![ShippingTier::new(dec!(200), dec!(25))])
            .with_country("TH", vec![ShippingTier::new(dec!(500), dec!(60))])
            .with_country("JP", vec![ShippingTier::new(dec!(4000), dec!(600))])
            .with_country(
                "US",
                vec![
                    ShippingTier::new(dec!(100), dec!(15)),
                    ShippingTier::new(dec!(300), dec!(8)),
                ],
            );

        let tax = TaxRates::new(dec!(0.05))
            .with_country("TH", dec!(0.07))
            .with_country("JP", dec!(0.10))
            .with_country("US", dec!(0.08));

        let coupons = CouponRates::new()
            .with_coupon("WELCOME10", dec!(0.10))
            .with_coupon("VIP20", dec!(0.20))
            .with_coupon("STUDENT5", dec!(0.05));

        Self {
            shipping,
            tax,
            coupons,
            policy: DiscountPolicy::default(),
        }
    }

    /// Shipping cost for `country` at `subtotal`.
    pub fn shipping_cost(&self, country: &str, subtotal: Decimal) -> Decimal {
        self.shipping.cost(country, subtotal)
    }

    /// Tax owed on `amount` in `country`.
    pub fn tax(&self, country: &str, amount: Decimal) -> Option<Decimal> {
        self.tax.tax(country, amount)
    }

    /// Sanity-check externally supplied tables.
    ///
    /// Country keys must be DEFAULT or an uppercase code such as "UK";
    /// thresholds, costs and rates must not be negative; coupon rates
    /// must not exceed 1.
    pub fn check(&self) -> Result<(), PricingError> {
        for (country, tiers) in self.shipping.entries() {
            check_country_key(country, "shipping")?;
            for (i, tier) in tiers.iter().enumerate() {
                if tier.threshold < Decimal::ZERO || tier.cost < Decimal::ZERO {
                    return Err(PricingError::Config(format!(
                        "shipping.{country}[{i}]: threshold and cost must not be negative"
                    )));
                }
            }
        }

        for (country, rate) in self.tax.entries() {
            check_country_key(country, "tax")?;
            if rate < Decimal::ZERO {
                return Err(PricingError::Config(format!(
                    "tax.{country}: rate {rate} must not be negative"
                )));
            }
        }

        for (code, rate) in &self.coupons.0 {
            if code.is_empty() || code.trim() != code.as_str() {
                return Err(PricingError::Config(format!(
                    "coupons: code '{code}' must be non-empty without surrounding whitespace"
                )));
            }
            if *rate < Decimal::ZERO || *rate > Decimal::ONE {
                return Err(PricingError::Config(format!(
                    "coupons.{code}: rate {rate} must be between 0 and 1"
                )));
            }
        }

        let policy = &self.policy;
        let figures = [
            ("gold_rate", policy.gold_rate),
            ("platinum_rate", policy.platinum_rate),
            ("bulk_threshold", policy.bulk_threshold),
            ("bulk_discount", policy.bulk_discount),
            ("upgrade_threshold", policy.upgrade_threshold),
            ("fragile_fee_per_unit", policy.fragile_fee_per_unit),
        ];
        if let Some((name, value)) = figures.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(PricingError::Config(format!(
                "policy.{name}: {value} must not be negative"
            )));
        }

        Ok(())
    }
}

impl Default for PricingTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Country keys are `DEFAULT` or two to three uppercase ASCII letters
/// ("TH", "UK", "EU"). Lowercase keys would never match an invoice.
fn check_country_key(country: &str, table: &str) -> Result<(), PricingError> {
    let shaped = (2..=3).contains(&country.len())
        && country.bytes().all(|b| b.is_ascii_uppercase());
    if country == DEFAULT_KEY || shaped {
        Ok(())
    } else {
        Err(PricingError::Config(format!(
            "{table}: '{country}' is not an uppercase country code"
        )))
    }
}
