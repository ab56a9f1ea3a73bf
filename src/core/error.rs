use thiserror::Error;

/// Errors raised by the crate's fallible surfaces other than
/// [`PricingCalculator::compute_total`](super::PricingCalculator::compute_total),
/// which only ever fails with a bare [`ValidationError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PricingError {
    /// The invoice is structurally invalid.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Pricing tables could not be loaded or are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A structural violation in an invoice, with field path and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[2].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
