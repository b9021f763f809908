// ============================================================================
// Numeric Errors
// Error types for scaled-integer currency arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during currency arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded i64::MAX
    Overflow,
    /// Result below i64::MIN
    Underflow,
    /// Attempted division by a zero-valued currency
    DivisionByZero,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input value is not finite or could not be parsed
    InvalidInput,
    /// Operands carry different precisions
    ScaleMismatch,
}

impl NumericError {
    /// Pick `Overflow` or `Underflow` from the sign of the exact result.
    #[inline]
    pub(crate) fn out_of_range(positive: bool) -> Self {
        if positive {
            NumericError::Overflow
        } else {
            NumericError::Underflow
        }
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not convert value"),
            NumericError::ScaleMismatch => write!(f, "precision mismatch between operands"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::ScaleMismatch.to_string(),
            "precision mismatch between operands"
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(NumericError::out_of_range(true), NumericError::Overflow);
        assert_eq!(NumericError::out_of_range(false), NumericError::Underflow);
    }
}
