// ============================================================================
// Basic Usage Example
// ============================================================================

use scaled_currency::prelude::*;
use scaled_currency::utils::init_logging;
use std::sync::Arc;

fn main() {
    init_logging(tracing::Level::WARN);

    println!("=== Scaled Currency Example ===\n");

    // Euro amounts in cents with a custom symbol
    let eur = CurrencyBuilder::new()
        .with_precision(100)
        .with_formatter(Arc::new(PlainFormatter::new().with_symbol("€")))
        .build()
        .unwrap();

    let net = eur.setf(19.99);
    let vat = net.mulf(0.19);
    let gross = net.checked_add(&vat).unwrap();
    println!("Net:   {}", net);
    println!("VAT:   {}", vat);
    println!("Gross: {}\n", gross);

    // Split the bill three ways
    let share = gross.checked_div(&eur.setf(3.0)).unwrap();
    println!("Share of three: {}", share);

    // Compound interest, 5% for 10 years
    let growth = Currency::new().setf(1.05).pow(10.0);
    println!("Savings after 10 years: {}\n", eur.setf(1000.0).mulf(growth.getf()));

    // Cash rounding across regions
    println!("Cash rounding of 12.47:");
    let presets = [
        ("Switzerland", CurrencySettings::switzerland()),
        ("Hong Kong", CurrencySettings::hong_kong()),
        ("New Zealand", CurrencySettings::new_zealand()),
        ("Denmark", CurrencySettings::denmark()),
        ("Sweden", CurrencySettings::sweden()),
    ];
    for (region, settings) in presets {
        let value = CurrencyBuilder::from_settings(settings)
            .build()
            .unwrap()
            .setf(12.47);
        println!(
            "  {:<12} interval {:<22} -> {}",
            region,
            settings.interval.to_string(),
            value.swedish()
        );
    }

    // Overflow: checked form reports it, lenient form degrades to an unset value
    let big = Currency::new().set(i64::MAX / 2 + 1);
    println!("\nChecked overflow: {:?}", big.checked_add(&big));
    println!("Lenient overflow: {:?}", big.add(&big));

    // JSON
    let json = gross.to_json().unwrap();
    println!("\nJSON: {}", String::from_utf8_lossy(&json));
    let back = eur.from_json(&json).unwrap();
    println!("Decoded: {} (valid: {})", back, back.is_valid());
}
