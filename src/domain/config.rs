// ============================================================================
// Currency Configuration
// Precision, guard, rounding interval and pluggable output adapters
// ============================================================================

use super::interval::Interval;
use crate::interfaces::{
    default_formatter, default_json_decoder, default_json_encoder, CurrencyFormatter,
    JsonDecoder, JsonEncoder,
};
use crate::numeric::Currency;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Package Defaults
// ============================================================================

/// Default precision: 10^4, four decimal places.
pub const DEFAULT_PRECISION: i64 = 10_000;

/// Default guard multiplier for intermediate multiplication/division results.
pub const DEFAULT_GUARD: i64 = 10_000;

/// Largest precision that fits in an i64 (10^18).
pub const MAX_PRECISION: i64 = 1_000_000_000_000_000_000;

/// Precision for currencies counted in cents.
pub const CENTS: i64 = 100;

/// Returns true for 1, 10, 100, ... 10^18.
pub fn is_power_of_ten(value: i64) -> bool {
    if value <= 0 {
        return false;
    }
    let mut v = value;
    while v % 10 == 0 {
        v /= 10;
    }
    v == 1
}

/// Coerce a requested precision to a usable one.
///
/// Zero becomes 1 (no decimal places). Anything else that is not a power of
/// ten falls back to [`DEFAULT_PRECISION`].
pub fn normalize_precision(precision: i64) -> i64 {
    if precision == 0 {
        return 1;
    }
    if is_power_of_ten(precision) {
        return precision;
    }
    tracing::warn!(
        operation = "Currency::precision",
        requested = precision,
        fallback = DEFAULT_PRECISION,
        "precision is not a power of ten, falling back to default"
    );
    DEFAULT_PRECISION
}

/// Coerce a requested guard to a strictly positive one.
pub fn normalize_guard(guard: i64) -> i64 {
    if guard > 0 {
        return guard;
    }
    tracing::warn!(
        operation = "Currency::guard",
        requested = guard,
        "guard must be positive, using 1"
    );
    1
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration errors.
///
/// Only a missing formatter is fatal when building a value; the other
/// variants come from [`CurrencySettings::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// No formatter was supplied; values could not be rendered.
    MissingFormatter,
    /// Precision is not a positive power of ten.
    InvalidPrecision(i64),
    /// Guard is not strictly positive.
    InvalidGuard(i64),
    /// Interval code is outside the defined set.
    InvalidInterval(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingFormatter => write!(f, "currency formatter cannot be empty"),
            ConfigError::InvalidPrecision(p) => {
                write!(f, "precision {} is not a positive power of ten", p)
            },
            ConfigError::InvalidGuard(g) => write!(f, "guard {} must be positive", g),
            ConfigError::InvalidInterval(code) => {
                write!(f, "interval code {} is out of scope", code)
            },
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Settings
// ============================================================================

/// Plain numeric settings of a currency value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrencySettings {
    /// Scale factor, 10^decimal_places
    pub precision: i64,

    /// Extra multiplier carried through multiplication and division
    pub guard: i64,

    /// Cash rounding interval
    pub interval: Interval,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            guard: DEFAULT_GUARD,
            interval: Interval::None,
        }
    }
}

impl CurrencySettings {
    pub fn new(precision: i64, guard: i64, interval: Interval) -> Self {
        Self {
            precision,
            guard,
            interval,
        }
    }

    /// Preset: cents with a 0.05 cash interval (Switzerland)
    pub fn switzerland() -> Self {
        Self::new(CENTS, DEFAULT_GUARD, Interval::Five)
    }

    /// Preset: cents with a 0.10 cash interval (Hong Kong)
    pub fn hong_kong() -> Self {
        Self::new(CENTS, DEFAULT_GUARD, Interval::Ten)
    }

    /// Preset: cents with 0.10 steps where 5 rounds down (New Zealand)
    pub fn new_zealand() -> Self {
        Self::new(CENTS, DEFAULT_GUARD, Interval::TenRoundDown)
    }

    /// Preset: cents with a 0.50 cash interval (Denmark)
    pub fn denmark() -> Self {
        Self::new(CENTS, DEFAULT_GUARD, Interval::Half)
    }

    /// Preset: cents with a 1.00 cash interval (Sweden)
    pub fn sweden() -> Self {
        Self::new(CENTS, DEFAULT_GUARD, Interval::Whole)
    }

    /// Builder method: Set precision
    pub fn with_precision(mut self, precision: i64) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set guard
    pub fn with_guard(mut self, guard: i64) -> Self {
        self.guard = guard;
        self
    }

    /// Builder method: Set rounding interval
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Strict validation, for settings loaded from outside the program.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_power_of_ten(self.precision) {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        if self.guard <= 0 {
            return Err(ConfigError::InvalidGuard(self.guard));
        }
        Ok(())
    }

    /// Lenient counterpart of [`validate`](Self::validate): coerce every field.
    pub fn normalized(self) -> Self {
        Self {
            precision: normalize_precision(self.precision),
            guard: normalize_guard(self.guard),
            interval: self.interval,
        }
    }
}

// ============================================================================
// Reversible Options
// ============================================================================

/// A single configuration change.
///
/// Applying an option returns its inverse: applying the inverse restores the
/// field to the value it had before.
#[derive(Clone)]
pub enum CurrencyOption {
    /// Cash rounding interval
    Swedish(Interval),
    /// Guard multiplier (non-positive coerced to 1)
    Guard(i64),
    /// Precision (coerced via [`normalize_precision`])
    Precision(i64),
    /// Output formatter
    Format(Arc<dyn CurrencyFormatter>),
    /// JSON encoder
    JsonEncoder(Arc<dyn JsonEncoder>),
    /// JSON decoder
    JsonDecoder(Arc<dyn JsonDecoder>),
}

impl CurrencyOption {
    /// Interval option from a raw code; out-of-scope codes become `Interval::None`.
    pub fn swedish_code(code: u8) -> Self {
        CurrencyOption::Swedish(Interval::from_u8(code))
    }

    /// JSON encoder option; `None` selects the built-in encoder.
    pub fn json_encoder(encoder: Option<Arc<dyn JsonEncoder>>) -> Self {
        CurrencyOption::JsonEncoder(encoder.unwrap_or_else(default_json_encoder))
    }

    /// JSON decoder option; `None` selects the built-in decoder.
    pub fn json_decoder(decoder: Option<Arc<dyn JsonDecoder>>) -> Self {
        CurrencyOption::JsonDecoder(decoder.unwrap_or_else(default_json_decoder))
    }

    /// Apply to `currency` and return the option that undoes this change.
    pub fn apply(self, currency: &mut Currency) -> CurrencyOption {
        match self {
            CurrencyOption::Swedish(interval) => {
                let previous = currency.interval;
                currency.interval = interval;
                CurrencyOption::Swedish(previous)
            },
            CurrencyOption::Guard(guard) => {
                let previous = currency.guard;
                currency.guard = normalize_guard(guard);
                CurrencyOption::Guard(previous)
            },
            CurrencyOption::Precision(precision) => {
                let previous = currency.precision;
                currency.precision = normalize_precision(precision);
                CurrencyOption::Precision(previous)
            },
            CurrencyOption::Format(formatter) => {
                let previous = std::mem::replace(&mut currency.formatter, formatter);
                CurrencyOption::Format(previous)
            },
            CurrencyOption::JsonEncoder(encoder) => {
                let previous = std::mem::replace(&mut currency.json_encoder, encoder);
                CurrencyOption::JsonEncoder(previous)
            },
            CurrencyOption::JsonDecoder(decoder) => {
                let previous = std::mem::replace(&mut currency.json_decoder, decoder);
                CurrencyOption::JsonDecoder(previous)
            },
        }
    }

    /// Short name of the field this option sets.
    pub fn name(&self) -> &'static str {
        match self {
            CurrencyOption::Swedish(_) => "swedish",
            CurrencyOption::Guard(_) => "guard",
            CurrencyOption::Precision(_) => "precision",
            CurrencyOption::Format(_) => "format",
            CurrencyOption::JsonEncoder(_) => "json_encoder",
            CurrencyOption::JsonDecoder(_) => "json_decoder",
        }
    }
}

impl fmt::Debug for CurrencyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyOption::Swedish(interval) => write!(f, "Swedish({:?})", interval),
            CurrencyOption::Guard(guard) => write!(f, "Guard({})", guard),
            CurrencyOption::Precision(precision) => write!(f, "Precision({})", precision),
            CurrencyOption::Format(formatter) => write!(f, "Format({})", formatter.name()),
            CurrencyOption::JsonEncoder(_) => write!(f, "JsonEncoder(..)"),
            CurrencyOption::JsonDecoder(_) => write!(f, "JsonDecoder(..)"),
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Complete configuration of a currency value, captured before a change.
#[derive(Clone)]
pub struct ConfigSnapshot {
    settings: CurrencySettings,
    formatter: Arc<dyn CurrencyFormatter>,
    json_encoder: Arc<dyn JsonEncoder>,
    json_decoder: Arc<dyn JsonDecoder>,
}

impl ConfigSnapshot {
    pub(crate) fn capture(currency: &Currency) -> Self {
        Self {
            settings: currency.settings(),
            formatter: Arc::clone(&currency.formatter),
            json_encoder: Arc::clone(&currency.json_encoder),
            json_decoder: Arc::clone(&currency.json_decoder),
        }
    }

    pub(crate) fn restore_into(self, currency: &mut Currency) {
        currency.precision = self.settings.precision;
        currency.guard = self.settings.guard;
        currency.interval = self.settings.interval;
        currency.formatter = self.formatter;
        currency.json_encoder = self.json_encoder;
        currency.json_decoder = self.json_decoder;
    }

    /// Numeric settings at capture time
    pub fn settings(&self) -> CurrencySettings {
        self.settings
    }

    /// Name of the formatter at capture time
    pub fn formatter_name(&self) -> &'static str {
        self.formatter.name()
    }
}

impl fmt::Debug for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSnapshot")
            .field("settings", &self.settings)
            .field("formatter", &self.formatter.name())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for configured currency values.
///
/// # Example
/// ```
/// use scaled_currency::prelude::*;
///
/// let price = CurrencyBuilder::new()
///     .with_precision(100)
///     .with_interval(Interval::Five)
///     .build()
///     .unwrap()
///     .setf(1.02);
///
/// assert_eq!(price.swedish().raw(), 100);
/// ```
#[derive(Clone)]
pub struct CurrencyBuilder {
    settings: CurrencySettings,
    formatter: Option<Arc<dyn CurrencyFormatter>>,
    json_encoder: Option<Arc<dyn JsonEncoder>>,
    json_decoder: Option<Arc<dyn JsonDecoder>>,
}

impl Default for CurrencyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyBuilder {
    /// Builder with package defaults and the built-in formatter and codec.
    pub fn new() -> Self {
        Self {
            settings: CurrencySettings::default(),
            formatter: Some(default_formatter()),
            json_encoder: None,
            json_decoder: None,
        }
    }

    /// Builder without a formatter; one must be supplied before `build`.
    pub fn bare() -> Self {
        Self {
            formatter: None,
            ..Self::new()
        }
    }

    /// Builder seeded with the given settings.
    pub fn from_settings(settings: CurrencySettings) -> Self {
        Self {
            settings,
            ..Self::new()
        }
    }

    pub fn with_precision(mut self, precision: i64) -> Self {
        self.settings.precision = precision;
        self
    }

    pub fn with_guard(mut self, guard: i64) -> Self {
        self.settings.guard = guard;
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.settings.interval = interval;
        self
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn CurrencyFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// `None` keeps the built-in encoder.
    pub fn with_json_encoder(mut self, encoder: Option<Arc<dyn JsonEncoder>>) -> Self {
        self.json_encoder = encoder;
        self
    }

    /// `None` keeps the built-in decoder.
    pub fn with_json_decoder(mut self, decoder: Option<Arc<dyn JsonDecoder>>) -> Self {
        self.json_decoder = decoder;
        self
    }

    /// Build an unset (invalid) currency value.
    ///
    /// # Errors
    /// Returns `MissingFormatter` when no formatter was supplied.
    pub fn build(self) -> Result<Currency, ConfigError> {
        let formatter = self.formatter.ok_or(ConfigError::MissingFormatter)?;
        let settings = self.settings.normalized();
        let mut currency = Currency::new();
        currency.precision = settings.precision;
        currency.guard = settings.guard;
        currency.interval = settings.interval;
        currency.formatter = formatter;
        currency.json_encoder = self.json_encoder.unwrap_or_else(default_json_encoder);
        currency.json_decoder = self.json_decoder.unwrap_or_else(default_json_decoder);
        Ok(currency)
    }
}
