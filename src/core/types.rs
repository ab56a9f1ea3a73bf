use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A customer invoice: header plus ordered line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice identifier. Must not be empty.
    pub invoice_id: String,
    /// Customer identifier. Must not be empty.
    pub customer_id: String,
    /// Destination country code (e.g. "TH"). Unknown codes fall back to
    /// the DEFAULT shipping and tax entries.
    pub country: String,
    /// Membership tier label, e.g. "none", "gold", "platinum".
    /// Anything other than the recognized tiers is priced as "none".
    pub membership: String,
    /// Coupon code as entered by the customer, untrimmed.
    #[serde(default)]
    pub coupon: Option<String>,
    /// Line items in order. Must not be empty.
    pub items: Vec<LineItem>,
}

impl Invoice {
    /// Recognized membership tier of this invoice.
    pub fn tier(&self) -> Membership {
        Membership::from_label(&self.membership)
    }
}

/// A single invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stock keeping unit. Must not be empty.
    pub sku: String,
    /// Free-text product category.
    #[serde(default)]
    pub category: String,
    /// Price per unit. Must not be negative.
    pub unit_price: Decimal,
    /// Ordered quantity. Must be positive.
    pub quantity: i64,
    /// Fragile items carry a per-unit handling surcharge.
    #[serde(default)]
    pub fragile: bool,
}

impl LineItem {
    /// `unit_price × quantity`, or `None` when the product leaves the
    /// `Decimal` range.
    pub fn amount(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Membership tiers that influence the discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    None,
    Gold,
    Platinum,
}

impl Membership {
    /// Exact, case-sensitive match; unrecognized labels map to `None`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "gold" => Self::Gold,
            "platinum" => Self::Platinum,
            _ => Self::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    /// Gold and platinum members get a percentage discount instead of the
    /// flat bulk discount and are never nudged to upgrade.
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Gold | Self::Platinum)
    }
}

/// Non-fatal notes attached to a pricing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Advisory {
    /// The coupon code was present but not found in the coupon table.
    UnknownCoupon,
    /// Large order from a customer without a premium membership.
    ConsiderMembershipUpgrade,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCoupon => "Unknown coupon",
            Self::ConsiderMembershipUpgrade => "Consider membership upgrade",
        }
    }

    pub fn from_message(message: &str) -> Option<Self> {
        match message {
            "Unknown coupon" => Some(Self::UnknownCoupon),
            "Consider membership upgrade" => Some(Self::ConsiderMembershipUpgrade),
            _ => None,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<Advisory> for String {
    fn from(advisory: Advisory) -> Self {
        advisory.message().to_string()
    }
}

impl TryFrom<String> for Advisory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_message(&value).ok_or_else(|| format!("unknown advisory '{value}'"))
    }
}

/// The intermediate figures behind a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Σ unit_price × quantity, before anything else.
    pub subtotal: Decimal,
    /// Per-unit surcharge for fragile items. Never taxed.
    pub fragile_fee: Decimal,
    /// Membership or bulk discount plus any coupon discount.
    pub discount: Decimal,
    /// Tiered shipping cost, looked up on the pre-discount subtotal. Never taxed.
    pub shipping: Decimal,
    /// Tax on `subtotal - discount`.
    pub tax: Decimal,
}

/// Outcome of pricing one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Amount payable, floored at zero. Not rounded.
    pub total: Decimal,
    /// Advisories in the order they were raised.
    pub warnings: Vec<Advisory>,
    pub breakdown: PriceBreakdown,
}

impl PricingResult {
    /// Warnings as plain strings.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }

    /// Total rounded to `dp` places, half-up (commercial rounding).
    pub fn rounded_total(&self, dp: u32) -> Decimal {
        self.total
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
}
