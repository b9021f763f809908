// ============================================================================
// Scaled Currency Library
// Fixed-point money values with guard-digit and Swedish cash rounding
// ============================================================================

//! # Scaled Currency
//!
//! Money arithmetic on scaled integers, free of binary floating-point drift.
//!
//! ## Features
//!
//! - **Scaled i64 representation** with configurable power-of-ten precision
//! - **Overflow-checked arithmetic** (`checked_*`) plus lenient forms that log
//!   and degrade to a default value
//! - **Guard-digit rounding**, half away from zero, for division and float
//!   scaling
//! - **Swedish cash rounding** to 0.05, 0.10, 0.25, 0.50 or 1.00 steps
//! - **Reversible configuration** through options, builder and snapshots
//! - **Pluggable output**: formatter and JSON codec traits with built-in
//!   defaults
//!
//! ## Example
//!
//! ```rust
//! use scaled_currency::prelude::*;
//!
//! // New Zealand: cents, 0.10 cash steps, 5 rounds down
//! let nzd = CurrencyBuilder::from_settings(CurrencySettings::new_zealand())
//!     .build()
//!     .unwrap();
//!
//! let subtotal = nzd.setf(3.20).checked_add(&nzd.setf(1.25)).unwrap();
//! assert_eq!(subtotal.raw(), 445);
//!
//! let cash = subtotal.swedish();
//! assert_eq!(cash.number().unwrap(), "4.40");
//! ```

pub mod domain;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigSnapshot, CurrencyBuilder, CurrencyOption, CurrencySettings, Interval,
    };
    pub use crate::interfaces::{
        CodecError, CurrencyFormatter, CurrencyParts, FormatError, JsonDecoder, JsonEncoder,
        PlainFormatter, PlainJsonCodec,
    };
    pub use crate::numeric::{Currency, NumericError, NumericResult};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    /// Formatter rendering amounts the Swiss way: "CHF 1'234.50".
    struct SwissFormatter;

    impl CurrencyFormatter for SwissFormatter {
        fn fmt_currency(&self, buf: &mut Vec<u8>, parts: CurrencyParts) -> Result<(), FormatError> {
            buf.extend_from_slice(b"CHF ");
            self.fmt_number(buf, parts)
        }

        fn fmt_number(&self, buf: &mut Vec<u8>, parts: CurrencyParts) -> Result<(), FormatError> {
            if parts.is_negative() {
                buf.push(b'-');
            }
            let digits = parts.integer.unsigned_abs().to_string();
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    buf.push(b'\'');
                }
                buf.push(ch as u8);
            }
            let frac = format!(
                ".{:0>width$}",
                parts.fraction,
                width = parts.fraction_digits()
            );
            buf.extend_from_slice(frac.as_bytes());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Swiss"
        }
    }

    #[test]
    fn test_end_to_end_checkout() {
        let chf = CurrencyBuilder::from_settings(CurrencySettings::switzerland())
            .with_formatter(Arc::new(SwissFormatter))
            .build()
            .unwrap();

        let items = [chf.setf(19.90), chf.setf(1234.17), chf.setf(0.99)];
        let total = items
            .iter()
            .try_fold(chf.set(0), |acc, item| acc.checked_add(item))
            .unwrap();
        assert_eq!(total.raw(), 125_506);

        // 7.7% VAT
        let vat = total.mulf(0.077);
        assert_eq!(vat.raw(), 9_664);

        let gross = total.checked_add(&vat).unwrap();
        let cash = gross.swedish();
        assert_eq!(cash.raw(), 135_170);
        assert_eq!(cash.to_string(), "CHF 1'351.70");
        assert_eq!(cash.number().unwrap(), "1'351.70");
    }

    #[test]
    fn test_split_bill_with_division() {
        let eur = Currency::builder().with_precision(100).build().unwrap();
        let bill = eur.setf(100.0);
        let share = bill.checked_div(&eur.setf(3.0)).unwrap();
        assert_eq!(share.raw(), 3_333);

        let remainder = bill
            .checked_sub(&share.checked_mul(&eur.setf(3.0)).unwrap())
            .unwrap();
        assert_eq!(remainder.raw(), 1);
    }

    #[test]
    fn test_lenient_and_checked_overflow_contracts() {
        let big = Currency::new().set(i64::MAX / 2 + 1);

        // checked: explicit error
        assert_eq!(big.checked_add(&big), Err(NumericError::Overflow));

        // lenient: default value, unset
        let degraded = big.add(&big);
        assert_eq!(degraded.raw(), 0);
        assert!(!degraded.is_valid());
    }

    #[test]
    fn test_json_round_trip_with_custom_precision() {
        let btc = Currency::builder()
            .with_precision(100_000_000)
            .build()
            .unwrap();
        let amount = btc.parse_with("0.00012345").unwrap();
        let json = amount.to_json().unwrap();
        assert_eq!(json, b"0.00012345");

        let back = btc.from_json(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn test_reconfigure_round_trip() {
        let mut c = Currency::new().set(1_000);
        let before = c.settings();
        let snapshot = c.reconfigure([
            CurrencyOption::Precision(100),
            CurrencyOption::Swedish(Interval::Whole),
            CurrencyOption::Format(Arc::new(SwissFormatter)),
        ]);
        assert_eq!(c.to_string(), "CHF 10.00");
        assert_eq!(snapshot.formatter_name(), "Plain");

        c.restore(snapshot);
        assert_eq!(c.settings(), before);
        assert_eq!(c.to_string(), "0.1000");
    }
}
