// ============================================================================
// Property Tests
// Algebraic properties of scaled currency arithmetic and rounding
// ============================================================================

use proptest::prelude::*;
use quickcheck::{quickcheck, TestResult};
use scaled_currency::prelude::*;

fn with_precision(precision: i64) -> Currency {
    Currency::builder().with_precision(precision).build().unwrap()
}

fn cents_with(interval: Interval) -> Currency {
    Currency::builder()
        .with_precision(100)
        .with_interval(interval)
        .build()
        .unwrap()
}

const HALF_RANGE: i64 = i64::MAX / 2;

proptest! {
    #[test]
    fn add_then_sub_is_identity(a in -HALF_RANGE..HALF_RANGE, b in -HALF_RANGE..HALF_RANGE) {
        let base = Currency::new();
        let (x, y) = (base.set(a), base.set(b));
        let back = x.checked_add(&y).unwrap().checked_sub(&y).unwrap();
        prop_assert_eq!(back.raw(), a);
        prop_assert_eq!(x.add(&y).sub(&y).raw(), a);
    }

    #[test]
    fn add_overflow_never_wraps(a in 1..=i64::MAX, b in 1..=i64::MAX) {
        let base = Currency::new();
        let (x, y) = (base.set(a), base.set(b));
        match a.checked_add(b) {
            Some(sum) => prop_assert_eq!(x.checked_add(&y).unwrap().raw(), sum),
            None => {
                prop_assert_eq!(x.checked_add(&y), Err(NumericError::Overflow));
                let degraded = x.add(&y);
                prop_assert_eq!(degraded.raw(), 0);
                prop_assert!(!degraded.is_valid());
            }
        }
    }

    #[test]
    fn sub_matches_i64_semantics(a in any::<i64>(), b in any::<i64>()) {
        let base = Currency::new();
        let result = base.set(a).checked_sub(&base.set(b));
        match a.checked_sub(b) {
            Some(diff) => prop_assert_eq!(result.unwrap().raw(), diff),
            None => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn setf_getf_within_one_unit(f in -1.0e9f64..1.0e9, exponent in 0u32..=4) {
        let precision = 10i64.pow(exponent);
        let value = with_precision(precision).setf(f);
        prop_assert!(value.is_valid());
        prop_assert!((value.getf() - f).abs() <= 1.0 / precision as f64);
    }

    #[test]
    fn mul_by_one_is_identity(a in -HALF_RANGE..HALF_RANGE) {
        let cents = with_precision(100);
        let one = cents.set(100);
        prop_assert_eq!(cents.set(a).checked_mul(&one).unwrap().raw(), a);
    }

    #[test]
    fn div_by_one_is_identity(a in -(i64::MAX / 1_000_000)..(i64::MAX / 1_000_000)) {
        let cents = with_precision(100);
        let one = cents.set(100);
        prop_assert_eq!(cents.set(a).checked_div(&one).unwrap().raw(), a);
    }

    #[test]
    fn neg_is_involution(a in (i64::MIN + 1)..=i64::MAX) {
        let value = Currency::new().set(a);
        prop_assert_eq!(value.neg().neg(), value);
    }

    #[test]
    fn swedish_lands_on_interval_steps(raw in 0i64..10_000_000, code in 1u8..=6) {
        let interval = Interval::try_from(code).unwrap();
        let step = match interval {
            Interval::Five => 5,
            Interval::Ten | Interval::TenRoundDown => 10,
            Interval::Quarter => 25,
            Interval::Half => 50,
            _ => 100,
        };
        let rounded = cents_with(interval).set(raw).swedish();
        prop_assert_eq!(rounded.raw() % step, 0);
        prop_assert!((rounded.raw() - raw).abs() <= step / 2);
    }

    #[test]
    fn swedish_round_down_only_differs_at_fives(raw in 0i64..10_000_000) {
        let up = cents_with(Interval::Ten).set(raw).swedish();
        let down = cents_with(Interval::TenRoundDown).set(raw).swedish();
        if raw % 10 == 5 {
            prop_assert_eq!(down.raw(), raw - 5);
        } else {
            prop_assert_eq!(up.raw(), down.raw());
        }
    }

    #[test]
    fn json_round_trip(raw in any::<i64>(), exponent in 0u32..=8, valid in any::<bool>()) {
        let base = with_precision(10i64.pow(exponent));
        let value = if valid { base.set(raw) } else { base.clone() };
        let decoded = base.from_json(&value.to_json().unwrap()).unwrap();
        prop_assert_eq!(decoded.raw(), value.raw());
        prop_assert_eq!(decoded.is_valid(), value.is_valid());
    }

    #[test]
    fn options_are_reversible(exponent in 0u32..=18, guard in 1i64..1_000_000, code in 0u8..=6) {
        let mut value = Currency::new().set(42);
        let before = value.settings();

        let undo = CurrencyOption::Precision(10i64.pow(exponent)).apply(&mut value);
        undo.apply(&mut value);
        prop_assert_eq!(value.settings(), before);

        let undo = CurrencyOption::Guard(guard).apply(&mut value);
        prop_assert_eq!(value.guard(), guard);
        undo.apply(&mut value);
        prop_assert_eq!(value.settings(), before);

        let undo = CurrencyOption::swedish_code(code).apply(&mut value);
        undo.apply(&mut value);
        prop_assert_eq!(value.settings(), before);
        prop_assert_eq!(value.raw(), 42);
    }
}

#[test]
fn abs_remainder_matches_dec() {
    fn prop(raw: i64, exponent: u8) -> TestResult {
        if raw == i64::MIN {
            return TestResult::discard();
        }
        let value = with_precision(10i64.pow(u32::from(exponent % 19))).set(raw);
        TestResult::from_bool(value.abs().raw() % value.precision() == value.dec())
    }
    quickcheck(prop as fn(i64, u8) -> TestResult);
}

#[test]
fn sign_matches_raw() {
    fn prop(raw: i64) -> bool {
        let value = Currency::new().set(raw);
        let expected = if raw < 0 { -1 } else { 1 };
        value.sign() == expected && value.geti() * value.precision() + value.sign() as i64 * value.dec() == raw
    }
    quickcheck(prop as fn(i64) -> bool);
}
