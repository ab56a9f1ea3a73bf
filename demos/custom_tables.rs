use preiskalk::core::*;
use rust_decimal_macros::dec;

const TABLES: &str = r#"{
    "shipping": {
        "DEFAULT": [{ "threshold": 100, "cost": 12 }],
        "DE": [{ "threshold": 50, "cost": 4.90 }, { "threshold": 150, "cost": 2.50 }]
    },
    "tax": { "DEFAULT": 0.2, "DE": 0.19 },
    "coupons": { "SPRING15": 0.15 },
    "policy": { "fragile_fee_per_unit": 1.5 }
}"#;

fn main() {
    let tables = match std::env::args().nth(1) {
        Some(path) => PricingTables::from_json_file(&path),
        None => PricingTables::from_json_str(TABLES),
    };

    let tables = match tables {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let calc = PricingCalculator::new(tables);
    let invoice = InvoiceBuilder::new("I-2024-100", "C-900", "DE")
        .coupon("SPRING15")
        .add_item(LineItemBuilder::new("CUP-2", dec!(40), 2).fragile().build())
        .build()
        .unwrap();

    let result = calc.compute_total(&invoice).unwrap();
    println!("{}", serde_json::to_string_pretty(&result).unwrap());
}
