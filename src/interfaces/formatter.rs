// ============================================================================
// Currency Formatter Interface
// Turns sign / integer part / decimal part into text
// ============================================================================

use std::fmt;
use std::io::Write;

/// Decomposed currency value handed to a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyParts {
    /// -1 for negative amounts, +1 otherwise (zero included)
    pub sign: i32,
    /// Integer part, truncated toward zero (may itself be negative)
    pub integer: i64,
    /// Absolute decimal remainder, in units of `1 / precision`
    pub fraction: i64,
    /// Scale the fraction is expressed in (10^decimal_places)
    pub precision: i64,
}

impl CurrencyParts {
    /// Number of fraction digits implied by `precision`.
    #[inline]
    pub fn fraction_digits(&self) -> usize {
        if self.precision <= 1 {
            0
        } else {
            self.precision.ilog10() as usize
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }
}

/// Errors produced while formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Writing into the output buffer failed
    Io(String),
    /// The parts cannot describe a value (e.g. fraction >= precision)
    InvalidParts(&'static str),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Io(msg) => write!(f, "format write failed: {}", msg),
            FormatError::InvalidParts(msg) => write!(f, "invalid currency parts: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err.to_string())
    }
}

/// Locale-aware rendering of currency values.
///
/// Implementations append to `buf`; callers own clearing it.
///
/// # Thread Safety
/// Formatters are shared between values through `Arc` and must be `Send + Sync`.
pub trait CurrencyFormatter: Send + Sync {
    /// Render as a currency amount, symbol included.
    fn fmt_currency(&self, buf: &mut Vec<u8>, parts: CurrencyParts) -> Result<(), FormatError>;

    /// Render as a bare number, no symbol or grouping.
    fn fmt_number(&self, buf: &mut Vec<u8>, parts: CurrencyParts) -> Result<(), FormatError>;

    /// Name of this formatter, used in logs and debug output.
    fn name(&self) -> &'static str;
}

/// Built-in formatter: optional leading symbol, `.` or custom decimal
/// separator, fraction zero-padded to the full precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainFormatter {
    symbol: Option<String>,
    decimal_separator: char,
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self {
            symbol: None,
            decimal_separator: '.',
        }
    }

    /// Builder method: Set the currency symbol printed before the amount
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Builder method: Set the decimal separator
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    fn write_sign(buf: &mut Vec<u8>, parts: &CurrencyParts) {
        if parts.is_negative() {
            buf.push(b'-');
        }
    }

    fn write_digits(&self, buf: &mut Vec<u8>, parts: &CurrencyParts) -> Result<(), FormatError> {
        if parts.precision <= 0 {
            return Err(FormatError::InvalidParts("precision must be positive"));
        }
        if parts.fraction < 0 || parts.fraction >= parts.precision {
            return Err(FormatError::InvalidParts("fraction out of range for precision"));
        }

        write!(buf, "{}", parts.integer.unsigned_abs())?;
        let digits = parts.fraction_digits();
        if digits > 0 {
            write!(
                buf,
                "{}{:0>width$}",
                self.decimal_separator,
                parts.fraction,
                width = digits
            )?;
        }
        Ok(())
    }
}

impl CurrencyFormatter for PlainFormatter {
    fn fmt_currency(&self, buf: &mut Vec<u8>, parts: CurrencyParts) -> Result<(), FormatError> {
        Self::write_sign(buf, &parts);
        if let Some(symbol) = &self.symbol {
            buf.extend_from_slice(symbol.as_bytes());
        }
        self.write_digits(buf, &parts)
    }

    fn fmt_number(&self, buf: &mut Vec<u8>, parts: CurrencyParts) -> Result<(), FormatError> {
        Self::write_sign(buf, &parts);
        self.write_digits(buf, &parts)
    }

    fn name(&self) -> &'static str {
        "Plain"
    }
}
