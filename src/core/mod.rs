//! Invoice types, validation, pricing tables and the calculator.
//!
//! All monetary values are [`rust_decimal::Decimal`]. Pricing tables are
//! plain immutable data handed to a [`PricingCalculator`] at construction,
//! so calculators with different tables can coexist.

mod builder;
mod calculator;
mod error;
mod tables;
mod types;
mod validation;

pub use builder::*;
pub use calculator::*;
pub use error::*;
pub use tables::*;
pub use types::*;
pub use validation::*;
