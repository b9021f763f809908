// ============================================================================
// Currency
// Scaled-integer money value with guard-digit and cash rounding
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::rounding::{
    collapse_float, collapse_float_wide, collapse_guarded, round_half_away, round_half_up,
};
use crate::domain::{
    ConfigSnapshot, CurrencyBuilder, CurrencyOption, CurrencySettings, Interval,
    DEFAULT_GUARD, DEFAULT_PRECISION,
};
use crate::interfaces::{
    default_formatter, default_json_decoder, default_json_encoder, CodecError,
    CurrencyFormatter, CurrencyParts, FormatError, JsonDecoder, JsonEncoder,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Money value stored as a scaled i64.
///
/// The represented amount is `raw / precision`, where `precision` is a power
/// of ten. A value also carries a validity flag: an unset value (`valid ==
/// false`) means "no amount", which is different from zero.
///
/// Every operation leaves the receiver untouched and returns a new value
/// with the receiver's configuration (precision, guard, interval, formatter,
/// codec).
///
/// Operations come in two flavours:
/// - `checked_*` returns [`NumericResult`] and is the primary contract.
/// - The plain form (`add`, `sub`, `mul`, ...) logs the failure and returns
///   a fresh default value (amount 0, unset) instead.
///
/// # Example
/// ```
/// use scaled_currency::prelude::*;
///
/// let net = Currency::new().setf(19.99);
/// let vat = net.mulf(0.19);
/// assert_eq!(vat.raw(), 37_981);
/// assert_eq!(net.checked_add(&vat).unwrap().number().unwrap(), "23.7881");
/// ```
#[derive(Clone)]
pub struct Currency {
    pub(crate) amount: i64,
    pub(crate) valid: bool,
    pub(crate) precision: i64,
    pub(crate) guard: i64,
    pub(crate) interval: Interval,
    pub(crate) formatter: Arc<dyn CurrencyFormatter>,
    pub(crate) json_encoder: Arc<dyn JsonEncoder>,
    pub(crate) json_decoder: Arc<dyn JsonDecoder>,
}

impl Currency {
    // ========================================================================
    // Construction & Configuration
    // ========================================================================

    /// Unset value with package defaults.
    pub fn new() -> Self {
        Self {
            amount: 0,
            valid: false,
            precision: DEFAULT_PRECISION,
            guard: DEFAULT_GUARD,
            interval: Interval::None,
            formatter: default_formatter(),
            json_encoder: default_json_encoder(),
            json_decoder: default_json_decoder(),
        }
    }

    /// Unset value with package defaults and `options` applied.
    pub fn with_options(options: impl IntoIterator<Item = CurrencyOption>) -> Self {
        let mut currency = Self::new();
        currency.option(options);
        currency
    }

    pub fn builder() -> CurrencyBuilder {
        CurrencyBuilder::new()
    }

    /// Apply options in order and return the inverse of the last one applied.
    ///
    /// Only the most recent inverse is returned; use
    /// [`reconfigure`](Self::reconfigure) to undo a whole batch.
    pub fn option(
        &mut self,
        options: impl IntoIterator<Item = CurrencyOption>,
    ) -> Option<CurrencyOption> {
        options
            .into_iter()
            .fold(None, |_, option| Some(option.apply(self)))
    }

    /// Apply options in order and return a snapshot of the configuration
    /// before any of them.
    pub fn reconfigure(
        &mut self,
        options: impl IntoIterator<Item = CurrencyOption>,
    ) -> ConfigSnapshot {
        let snapshot = ConfigSnapshot::capture(self);
        self.option(options);
        snapshot
    }

    /// Reinstate a configuration captured by [`reconfigure`](Self::reconfigure).
    ///
    /// The amount and validity are left as they are.
    pub fn restore(&mut self, snapshot: ConfigSnapshot) {
        snapshot.restore_into(self);
    }

    /// Current numeric settings.
    pub fn settings(&self) -> CurrencySettings {
        CurrencySettings::new(self.precision, self.guard, self.interval)
    }

    // ========================================================================
    // Scaled Value Representation
    // ========================================================================

    /// Install a raw scaled amount and mark the value as set.
    #[inline]
    pub fn set(&self, raw: i64) -> Self {
        let mut next = self.clone();
        next.amount = raw;
        next.valid = true;
        next
    }

    /// Convert a float into the scaled domain, rounding half away from zero.
    ///
    /// # Errors
    /// - `InvalidInput` for NaN or infinity
    /// - `Overflow`/`Underflow` if `f * precision` does not fit in i64
    pub fn checked_setf(&self, f: f64) -> NumericResult<Self> {
        collapse_float(f * self.precision as f64).map(|raw| self.set(raw))
    }

    /// Lenient [`checked_setf`](Self::checked_setf).
    pub fn setf(&self, f: f64) -> Self {
        self.checked_setf(f)
            .unwrap_or_else(|err| self.degrade("Currency::setf", err, None))
    }

    /// Copy of this value marked as unset, amount kept.
    pub fn invalidate(&self) -> Self {
        let mut next = self.clone();
        next.valid = false;
        next
    }

    /// Raw scaled amount, no truncation.
    #[inline]
    pub fn raw(&self) -> i64 {
        self.amount
    }

    /// Amount as f64. Loses precision once `|raw|` exceeds 2^53.
    #[inline]
    pub fn getf(&self) -> f64 {
        self.amount as f64 / self.precision as f64
    }

    /// Integer part, truncated toward zero.
    #[inline]
    pub fn geti(&self) -> i64 {
        self.amount / self.precision
    }

    /// Decimal remainder of the absolute amount, in units of `1 / precision`.
    #[inline]
    pub fn dec(&self) -> i64 {
        // precision <= 10^18, so the remainder always fits back into i64
        (self.amount.unsigned_abs() % self.precision as u64) as i64
    }

    /// -1 for negative amounts, +1 otherwise. Zero yields +1.
    #[inline]
    pub fn sign(&self) -> i32 {
        if self.amount < 0 {
            -1
        } else {
            1
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    #[inline]
    pub fn precision(&self) -> i64 {
        self.precision
    }

    /// Number of decimal places, `log10(precision)`.
    #[inline]
    pub fn decimal_places(&self) -> u32 {
        self.precision.ilog10()
    }

    #[inline]
    pub fn guard(&self) -> i64 {
        self.guard
    }

    #[inline]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    fn ensure_same_precision(&self, other: &Currency) -> NumericResult<()> {
        if self.precision == other.precision {
            Ok(())
        } else {
            Err(NumericError::ScaleMismatch)
        }
    }

    /// Checked addition.
    ///
    /// # Errors
    /// - `ScaleMismatch` if precisions differ
    /// - `Overflow`/`Underflow` if the sum leaves the i64 range
    pub fn checked_add(&self, other: &Currency) -> NumericResult<Self> {
        self.ensure_same_precision(other)?;
        let (a, b) = (self.amount, other.amount);
        let r = a.wrapping_add(b);
        // overflow iff the result's sign differs from both operands
        if (r ^ a) & (r ^ b) < 0 {
            return Err(NumericError::out_of_range(b > 0));
        }
        Ok(self.set(r))
    }

    /// Lenient [`checked_add`](Self::checked_add).
    pub fn add(&self, other: &Currency) -> Self {
        self.checked_add(other)
            .unwrap_or_else(|err| self.degrade("Currency::add", err, Some(other)))
    }

    /// Checked subtraction. The result keeps the receiver's validity.
    ///
    /// # Errors
    /// - `ScaleMismatch` if precisions differ
    /// - `Overflow`/`Underflow` if the difference leaves the i64 range
    pub fn checked_sub(&self, other: &Currency) -> NumericResult<Self> {
        self.ensure_same_precision(other)?;
        let (a, b) = (self.amount, other.amount);
        let r = a.wrapping_sub(b);
        // overflow iff the result's sign differs from a and matches b
        if (r ^ a) & !(r ^ b) < 0 {
            return Err(NumericError::out_of_range(b < 0));
        }
        let mut next = self.clone();
        next.amount = r;
        Ok(next)
    }

    /// Lenient [`checked_sub`](Self::checked_sub).
    pub fn sub(&self, other: &Currency) -> Self {
        self.checked_sub(other)
            .unwrap_or_else(|err| self.degrade("Currency::sub", err, Some(other)))
    }

    /// Checked multiplication: `a * b / precision`, truncated toward zero.
    ///
    /// Uses an i128 intermediate, so only the final result can overflow.
    ///
    /// # Errors
    /// - `ScaleMismatch` if precisions differ
    /// - `Overflow`/`Underflow` if the product leaves the i64 range
    pub fn checked_mul(&self, other: &Currency) -> NumericResult<Self> {
        self.ensure_same_precision(other)?;
        let product = i128::from(self.amount) * i128::from(other.amount);
        let scaled = product / i128::from(self.precision);
        i64::try_from(scaled)
            .map(|raw| self.set(raw))
            .map_err(|_| NumericError::out_of_range(scaled > 0))
    }

    /// Lenient [`checked_mul`](Self::checked_mul).
    pub fn mul(&self, other: &Currency) -> Self {
        self.checked_mul(other)
            .unwrap_or_else(|err| self.degrade("Currency::mul", err, Some(other)))
    }

    /// Checked division.
    ///
    /// The quotient is computed scaled by `guard` and then rounded half away
    /// from zero, so the guard decides how many dropped digits the rounding
    /// can see.
    ///
    /// # Errors
    /// - `ScaleMismatch` if precisions differ
    /// - `DivisionByZero` if `other` is zero
    /// - `Overflow`/`Underflow` if the quotient leaves the i64 range
    pub fn checked_div(&self, other: &Currency) -> NumericResult<Self> {
        self.ensure_same_precision(other)?;
        if other.amount == 0 {
            return Err(NumericError::DivisionByZero);
        }
        // |amount * precision| <= 2^63 * 10^18 and |remainder * guard| < 2^126,
        // so neither intermediate can leave i128
        let numerator = i128::from(self.amount) * i128::from(self.precision);
        let divisor = i128::from(other.amount);
        let guard = i128::from(self.guard);
        let quotient = numerator / divisor;
        let truncated =
            i64::try_from(quotient).map_err(|_| NumericError::out_of_range(quotient > 0))?;
        let guarded = (numerator % divisor) * guard / divisor;
        round_half_away(truncated, guarded as f64 / guard as f64).map(|raw| self.set(raw))
    }

    /// Lenient [`checked_div`](Self::checked_div).
    pub fn div(&self, other: &Currency) -> Self {
        self.checked_div(other)
            .unwrap_or_else(|err| self.degrade("Currency::div", err, Some(other)))
    }

    /// Checked multiplication by a float scalar.
    ///
    /// The scalar is first fixed at `guard * precision` resolution, then the
    /// product is collapsed back with half-away-from-zero rounding.
    ///
    /// # Errors
    /// - `InvalidInput` for NaN or infinite scalars
    /// - `Overflow`/`Underflow` if the result leaves the i64 range
    pub fn checked_mulf(&self, f: f64) -> NumericResult<Self> {
        let resolution = i128::from(self.guard) * i128::from(self.precision);
        let factor = collapse_float_wide(f * self.guard as f64 * self.precision as f64)?;
        let product = i128::from(self.amount)
            .checked_mul(factor)
            .ok_or(NumericError::out_of_range((self.amount < 0) == (factor < 0)))?;
        collapse_guarded(product, resolution).map(|raw| self.set(raw))
    }

    /// Lenient [`checked_mulf`](Self::checked_mulf).
    pub fn mulf(&self, f: f64) -> Self {
        self.checked_mulf(f)
            .unwrap_or_else(|err| self.degrade("Currency::mulf", err, None))
    }

    /// Checked power, computed through f64.
    ///
    /// Accurate to roughly 15 significant digits, enough for compounding and
    /// tax multipliers but not for amounts near the i64 limit.
    pub fn checked_pow(&self, exponent: f64) -> NumericResult<Self> {
        self.checked_setf(self.getf().powf(exponent))
    }

    /// Lenient [`checked_pow`](Self::checked_pow).
    pub fn pow(&self, exponent: f64) -> Self {
        self.checked_pow(exponent)
            .unwrap_or_else(|err| self.degrade("Currency::pow", err, None))
    }

    /// Checked negation. Fails only for `i64::MIN`.
    pub fn checked_neg(&self) -> NumericResult<Self> {
        let mut next = self.clone();
        next.amount = self.amount.checked_neg().ok_or(NumericError::Overflow)?;
        Ok(next)
    }

    /// Lenient [`checked_neg`](Self::checked_neg).
    pub fn neg(&self) -> Self {
        self.checked_neg()
            .unwrap_or_else(|err| self.degrade("Currency::neg", err, None))
    }

    /// Checked absolute value. Fails only for `i64::MIN`.
    pub fn checked_abs(&self) -> NumericResult<Self> {
        if self.amount < 0 {
            self.checked_neg()
        } else {
            Ok(self.clone())
        }
    }

    /// Lenient [`checked_abs`](Self::checked_abs).
    pub fn abs(&self) -> Self {
        self.checked_abs()
            .unwrap_or_else(|err| self.degrade("Currency::abs", err, None))
    }

    // ========================================================================
    // Swedish Rounding
    // ========================================================================

    /// Apply the configured cash rounding interval.
    ///
    /// The amount is scaled by the interval factor, rounded half up
    /// (`floor(x + 0.5)`), scaled back and reinstalled through
    /// [`checked_setf`](Self::checked_setf).
    pub fn checked_swedish(&self) -> NumericResult<Self> {
        let Some(factor) = self.interval.factor() else {
            return Ok(self.clone());
        };
        let mut base = self.clone();
        if self.interval.rounds_five_down() && base.amount % 5 == 0 {
            base.amount = base.amount.checked_sub(1).ok_or(NumericError::Underflow)?;
        }
        base.checked_setf(round_half_up(base.getf() * factor) / factor)
    }

    /// Lenient [`checked_swedish`](Self::checked_swedish).
    pub fn swedish(&self) -> Self {
        self.checked_swedish()
            .unwrap_or_else(|err| self.degrade("Currency::swedish", err, None))
    }

    /// Apply `options` to a copy, then cash-round it.
    pub fn swedish_with(&self, options: impl IntoIterator<Item = CurrencyOption>) -> Self {
        let mut next = self.clone();
        next.option(options);
        next.swedish()
    }

    // ========================================================================
    // Decimal Conversion
    // ========================================================================

    /// Exact decimal view of the amount.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount, self.decimal_places())
    }

    /// Install a decimal amount.
    ///
    /// # Errors
    /// - `PrecisionLoss` if `d` has more significant decimals than the precision
    /// - `Overflow`/`Underflow` if the scaled amount does not fit in i64
    pub fn checked_set_decimal(&self, d: Decimal) -> NumericResult<Self> {
        let positive = d.is_sign_positive();
        let scaled = d
            .checked_mul(Decimal::from(self.precision))
            .ok_or(NumericError::out_of_range(positive))?;
        if !scaled.fract().is_zero() {
            return Err(NumericError::PrecisionLoss);
        }
        let raw = scaled
            .to_i64()
            .ok_or(NumericError::out_of_range(positive))?;
        Ok(self.set(raw))
    }

    /// Parse a decimal string, keeping this value's configuration.
    ///
    /// # Errors
    /// `InvalidInput` for malformed input, otherwise as
    /// [`checked_set_decimal`](Self::checked_set_decimal).
    pub fn parse_with(&self, s: &str) -> NumericResult<Self> {
        let d = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| NumericError::InvalidInput)?;
        self.checked_set_decimal(d)
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn parts(&self) -> CurrencyParts {
        CurrencyParts {
            sign: self.sign(),
            integer: self.geti(),
            fraction: self.dec(),
            precision: self.precision,
        }
    }

    /// Render with the configured formatter into `buf`.
    ///
    /// `buf` is cleared first; its capacity is kept, so one buffer can be
    /// reused across calls by a single caller.
    pub fn localize_into(&self, buf: &mut Vec<u8>) -> Result<(), FormatError> {
        buf.clear();
        self.formatter.fmt_currency(buf, self.parts())
    }

    /// Render with the configured formatter into a fresh buffer.
    pub fn localize(&self) -> Result<Vec<u8>, FormatError> {
        let mut buf = Vec::new();
        self.localize_into(&mut buf)?;
        Ok(buf)
    }

    /// Render as a bare number into `buf` (cleared first).
    pub fn number_into(&self, buf: &mut Vec<u8>) -> Result<(), FormatError> {
        buf.clear();
        self.formatter.fmt_number(buf, self.parts())
    }

    /// Bare number without locale decoration, e.g. for JavaScript.
    pub fn number(&self) -> Result<String, FormatError> {
        let mut buf = Vec::new();
        self.number_into(&mut buf)?;
        String::from_utf8(buf).map_err(|e| FormatError::Io(e.to_string()))
    }

    /// Encode with the configured JSON encoder.
    pub fn to_json(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.json_encoder.encode(self, &mut out)?;
        Ok(out)
    }

    /// Decode with the configured JSON decoder; the result keeps this
    /// value's configuration.
    pub fn from_json(&self, input: &[u8]) -> Result<Self, CodecError> {
        self.json_decoder.decode(self, input)
    }

    // ========================================================================
    // Failure Policy
    // ========================================================================

    #[cold]
    fn degrade(&self, operation: &'static str, err: NumericError, rhs: Option<&Currency>) -> Self {
        tracing::error!(
            operation,
            error = %err,
            "currency operation failed, returning default value"
        );
        tracing::trace!(operation, lhs = ?self, rhs = ?rhs, "failed operands");
        Currency::new()
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Currency {
    fn default() -> Self {
        Self::new()
    }
}

/// Values are equal when amount, precision and validity match; guard,
/// interval and adapters are not compared.
impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
            && self.precision == other.precision
            && self.valid == other.valid
    }
}

/// Only values with the same precision and validity are ordered.
impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.precision == other.precision && self.valid == other.valid)
            .then(|| self.amount.cmp(&other.amount))
    }
}

impl std::ops::Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Currency) -> Currency {
        Currency::add(&self, &rhs)
    }
}

impl std::ops::Sub for Currency {
    type Output = Currency;

    fn sub(self, rhs: Currency) -> Currency {
        Currency::sub(&self, &rhs)
    }
}

impl std::ops::Mul for Currency {
    type Output = Currency;

    fn mul(self, rhs: Currency) -> Currency {
        Currency::mul(&self, &rhs)
    }
}

impl std::ops::Div for Currency {
    type Output = Currency;

    fn div(self, rhs: Currency) -> Currency {
        Currency::div(&self, &rhs)
    }
}

impl std::ops::Neg for Currency {
    type Output = Currency;

    fn neg(self) -> Currency {
        Currency::neg(&self)
    }
}

impl std::str::FromStr for Currency {
    type Err = NumericError;

    /// Parse with package defaults: "12.5" -> raw 125000
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new().parse_with(s)
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Currency({}, raw={}, precision={}, guard={}, interval={:?}, valid={})",
            self.to_decimal(),
            self.amount,
            self.precision,
            self.guard,
            self.interval,
            self.valid
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.localize().map_err(|_| fmt::Error)?;
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
