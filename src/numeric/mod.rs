// ============================================================================
// Numeric Module
// Scaled-integer currency arithmetic
// ============================================================================
//
// This module provides:
// - Currency: money value stored as i64 scaled by a power of ten
// - NumericError: Error types for arithmetic operations
// - Rounding helpers: guard-digit (half away from zero) and cash (half up)
//
// Design principles:
// - Amounts are exact scaled integers; floats only appear at conversion edges
// - Every operation has a checked form returning Result
// - Lenient forms log and degrade to a default value instead of panicking
// - Values are never mutated in place by arithmetic

mod currency;
mod errors;
pub mod rounding;

pub use currency::Currency;
pub use errors::{NumericError, NumericResult};
pub use rounding::{round_half_away, round_half_up, ROUND_TO};
