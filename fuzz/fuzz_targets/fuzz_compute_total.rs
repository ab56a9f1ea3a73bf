#![no_main]

use libfuzzer_sys::fuzz_target;
use preiskalk::core::{Invoice, PricingCalculator};
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(invoice) = serde_json::from_slice::<Invoice>(data) else {
        return;
    };

    if let Ok(result) = PricingCalculator::standard().compute_total(&invoice) {
        assert!(result.total >= Decimal::ZERO);
    }
});
