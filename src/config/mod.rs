//! Loading pricing tables from JSON.
//!
//! ```json
//! {
//!   "shipping": { "DEFAULT": [{ "threshold": 200, "cost": 25 }],
//!                 "US": [{ "threshold": 100, "cost": 15 }, { "threshold": 300, "cost": 8 }] },
//!   "tax": { "DEFAULT": 0.05, "US": "0.08" },
//!   "coupons": { "WELCOME10": 0.10 },
//!   "policy": { "bulk_discount": 25 }
//! }
//! ```
//!
//! `shipping` and `tax` must carry a `DEFAULT` entry. `coupons` and
//! `policy` are optional; omitted policy fields keep their standard values.
//! Decimals may be given as JSON numbers or strings.

use std::path::Path;

use crate::core::{PricingError, PricingTables};

impl PricingTables {
    /// Parse and check tables from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, PricingError> {
        let tables: PricingTables = serde_json::from_str(json)
            .map_err(|e| PricingError::Config(format!("invalid pricing tables: {e}")))?;
        tables.check()?;
        tracing::debug!(
            coupons = tables.coupons.len(),
            "pricing tables loaded"
        );
        Ok(tables)
    }

    /// Read, parse and check tables from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PricingError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON; decimals are written as strings.
    pub fn to_json_string(&self) -> Result<String, PricingError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PricingError::Config(format!("cannot serialize pricing tables: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn minimal_document() {
        let tables = PricingTables::from_json_str(
            r#"{ "shipping": { "DEFAULT": [] }, "tax": { "DEFAULT": 0 } }"#,
        )
        .unwrap();
        assert!(tables.coupons.is_empty());
        assert_eq!(tables.policy.bulk_discount, dec!(20));
        assert_eq!(tables.shipping_cost("TH", dec!(1)), dec!(0));
    }

    #[test]
    fn missing_default_shipping() {
        let err = PricingTables::from_json_str(
            r#"{ "shipping": { "TH": [] }, "tax": { "DEFAULT": 0.05 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("DEFAULT"), "{err}");
    }

    #[test]
    fn missing_file() {
        let err = PricingTables::from_json_file("/nonexistent/pricing.json").unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
    }
}
