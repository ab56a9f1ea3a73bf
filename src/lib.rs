//! # preiskalk
//!
//! Deterministic pricing of customer invoices: subtotal, fragile-item
//! surcharge, membership or bulk discount, coupon discount, tiered shipping
//! and country tax, with advisory warnings.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use preiskalk::core::*;
//! use rust_decimal_macros::dec;
//!
//! let calc = PricingCalculator::standard();
//! let invoice = InvoiceBuilder::new("I-001", "C-001", "US")
//!     .membership("gold")
//!     .add_item(LineItemBuilder::new("A", dec!(1000), 1).build())
//!     .build()
//!     .unwrap();
//!
//! let result = calc.compute_total(&invoice).unwrap();
//! assert_eq!(result.total, dec!(1047.6));
//! assert!(result.warnings.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, validation, pricing tables, calculator |
//! | `config` | Load pricing tables from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "config")]
pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
