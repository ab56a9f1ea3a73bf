use preiskalk::core::*;
use rust_decimal_macros::dec;

fn main() {
    let calc = PricingCalculator::standard();

    // ── 1. A gold member shipping to the US with a coupon ─────────────
    println!("=== Quote ===");
    let invoice = InvoiceBuilder::new("I-2024-001", "C-042", "US")
        .membership("gold")
        .coupon(" WELCOME10 ")
        .add_item(
            LineItemBuilder::new("LAMP-1", dec!(89.90), 2)
                .category("lighting")
                .fragile()
                .build(),
        )
        .add_item(
            LineItemBuilder::new("BULB-4", dec!(3.50), 10)
                .category("lighting")
                .build(),
        )
        .build()
        .unwrap();

    match calc.compute_total(&invoice) {
        Ok(result) => {
            let b = &result.breakdown;
            println!("  Subtotal:    {}", b.subtotal);
            println!("  Fragile fee: {}", b.fragile_fee);
            println!("  Discount:   -{}", b.discount);
            println!("  Shipping:    {}", b.shipping);
            println!("  Tax:         {}", b.tax);
            println!("  Total:       {}", result.rounded_total(2));
            for warning in &result.warnings {
                println!("  Warning: {warning}");
            }
        }
        Err(e) => println!("  Rejected: {e}"),
    }

    // ── 2. Advisories: unknown coupon and a large non-member order ────
    println!("\n=== Advisories ===");
    let invoice = InvoiceBuilder::new("I-2024-002", "C-043", "JP")
        .coupon("welcome10")
        .add_item(LineItemBuilder::new("TV-65", dec!(2400), 5).fragile().build())
        .build()
        .unwrap();

    let result = calc.compute_total(&invoice).unwrap();
    println!("  Total: {}", result.rounded_total(2));
    for warning in result.warning_messages() {
        println!("  Warning: {warning}");
    }

    // ── 3. Validation error: zero quantity ────────────────────────────
    println!("\n=== Validation Error ===");
    let invoice = InvoiceBuilder::new("I-2024-003", "C-044", "TH")
        .add_item(LineItemBuilder::new("BOOK-7", dec!(12), 0).build())
        .build_unchecked();

    match calc.compute_total(&invoice) {
        Ok(result) => println!("  Unexpected total: {}", result.total),
        Err(e) => println!("  Rejected: {e}"),
    }
}
