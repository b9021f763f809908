// ============================================================================
// JSON Codec Interface
// Encodes currency values to JSON scalars and back
// ============================================================================

use crate::numeric::{Currency, NumericError};
use rust_decimal::Decimal;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Errors produced by JSON encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not valid JSON
    Syntax(String),
    /// Valid JSON, but not a number, string or null
    UnexpectedType(&'static str),
    /// The number could not be represented at the configured precision
    Numeric(NumericError),
    /// Writing the output failed
    Io(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Syntax(msg) => write!(f, "invalid JSON: {}", msg),
            CodecError::UnexpectedType(kind) => {
                write!(f, "expected a JSON number, string or null, found {}", kind)
            },
            CodecError::Numeric(err) => write!(f, "currency conversion failed: {}", err),
            CodecError::Io(msg) => write!(f, "JSON write failed: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for CodecError {
    fn from(err: NumericError) -> Self {
        CodecError::Numeric(err)
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

/// Writes a currency value as JSON.
pub trait JsonEncoder: Send + Sync {
    /// Append the JSON representation of `value` to `out`.
    fn encode(&self, value: &Currency, out: &mut Vec<u8>) -> Result<(), CodecError>;
}

/// Reads a currency value from JSON.
pub trait JsonDecoder: Send + Sync {
    /// Decode `input` into a value carrying the configuration of `template`.
    fn decode(&self, template: &Currency, input: &[u8]) -> Result<Currency, CodecError>;
}

/// Built-in codec.
///
/// A valid value is written as a JSON number with every decimal place of its
/// precision (`12.3400`), an unset value as `null`. Decoding accepts numbers,
/// numeric strings and `null`; the digits are read exactly, never through f64.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainJsonCodec;

impl JsonEncoder for PlainJsonCodec {
    fn encode(&self, value: &Currency, out: &mut Vec<u8>) -> Result<(), CodecError> {
        if value.is_valid() {
            write!(out, "{}", value.to_decimal())?;
        } else {
            out.extend_from_slice(b"null");
        }
        Ok(())
    }
}

impl JsonDecoder for PlainJsonCodec {
    fn decode(&self, template: &Currency, input: &[u8]) -> Result<Currency, CodecError> {
        let parsed: serde_json::Value =
            serde_json::from_slice(input).map_err(|e| CodecError::Syntax(e.to_string()))?;

        let digits = match &parsed {
            serde_json::Value::Null => return Ok(template.set(0).invalidate()),
            serde_json::Value::String(s) => s.trim().to_string(),
            serde_json::Value::Number(_) => std::str::from_utf8(input)
                .map_err(|e| CodecError::Syntax(e.to_string()))?
                .trim()
                .to_string(),
            serde_json::Value::Bool(_) => return Err(CodecError::UnexpectedType("bool")),
            serde_json::Value::Array(_) => return Err(CodecError::UnexpectedType("array")),
            serde_json::Value::Object(_) => return Err(CodecError::UnexpectedType("object")),
        };

        let decimal = parse_decimal(&digits)?;
        Ok(template.checked_set_decimal(decimal)?)
    }
}

fn parse_decimal(digits: &str) -> Result<Decimal, NumericError> {
    Decimal::from_str_exact(digits)
        .or_else(|_| Decimal::from_str(digits))
        .or_else(|_| Decimal::from_scientific(digits))
        .map_err(|_| NumericError::InvalidInput)
}
