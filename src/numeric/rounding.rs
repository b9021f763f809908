// ============================================================================
// Rounding Helpers
// Guard-digit rounding (half away from zero) and cash rounding (half up)
// ============================================================================

use super::errors::{NumericError, NumericResult};

/// Magnitude of the truncated remainder at which a result is bumped away from zero.
pub const ROUND_TO: f64 = 0.5;

/// Round a truncated integer result half away from zero.
///
/// `truncated` is the integer part of an exact (or guard-scaled) result and
/// `remainder` the fractional part that truncation dropped, so that
/// `truncated + remainder` is the unrounded value. A positive remainder of at
/// least [`ROUND_TO`] rounds up, a negative remainder of at most `-ROUND_TO`
/// rounds down.
///
/// # Errors
/// Returns `Overflow`/`Underflow` when the bump leaves the i64 range.
#[inline]
pub fn round_half_away(truncated: i64, remainder: f64) -> NumericResult<i64> {
    if remainder >= ROUND_TO {
        truncated.checked_add(1).ok_or(NumericError::Overflow)
    } else if remainder <= -ROUND_TO {
        truncated.checked_sub(1).ok_or(NumericError::Underflow)
    } else {
        Ok(truncated)
    }
}

/// Round half up: `floor(value + 0.5)`.
///
/// Used by cash rounding only. Negative halves round toward positive infinity,
/// so `-2.5` becomes `-2.0`.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + ROUND_TO).floor()
}

/// Collapse an i128 intermediate scaled by `divisor` back to i64, rounding the
/// dropped digits with [`round_half_away`].
#[inline]
pub(crate) fn collapse_guarded(scaled: i128, divisor: i128) -> NumericResult<i64> {
    let quotient = scaled / divisor;
    let truncated =
        i64::try_from(quotient).map_err(|_| NumericError::out_of_range(quotient > 0))?;
    let remainder = (scaled % divisor) as f64 / divisor as f64;
    round_half_away(truncated, remainder)
}

/// Split a float already scaled to currency units into its truncated integer
/// and remainder, then round.
///
/// # Errors
/// - `InvalidInput` for NaN or infinite input
/// - `Overflow`/`Underflow` when the value does not fit in i64
#[inline]
pub(crate) fn collapse_float(scaled: f64) -> NumericResult<i64> {
    let wide = collapse_float_wide(scaled)?;
    i64::try_from(wide).map_err(|_| NumericError::out_of_range(wide > 0))
}

/// [`collapse_float`] into an i128, for intermediates such as a scalar held
/// at `guard * precision` resolution.
///
/// # Errors
/// - `InvalidInput` for NaN or infinite input
/// - `Overflow`/`Underflow` when the value does not fit in i128
#[inline]
pub(crate) fn collapse_float_wide(scaled: f64) -> NumericResult<i128> {
    // 2^127, exactly representable
    const LIMIT: f64 = i128::MAX as f64;

    if !scaled.is_finite() {
        return Err(NumericError::InvalidInput);
    }
    let trunc = scaled.trunc();
    if trunc >= LIMIT {
        return Err(NumericError::Overflow);
    }
    if trunc < -LIMIT {
        return Err(NumericError::Underflow);
    }
    let truncated = trunc as i128;
    let remainder = scaled - trunc;
    if remainder >= ROUND_TO {
        truncated.checked_add(1).ok_or(NumericError::Overflow)
    } else if remainder <= -ROUND_TO {
        truncated.checked_sub(1).ok_or(NumericError::Underflow)
    } else {
        Ok(truncated)
    }
}
