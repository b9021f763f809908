// ============================================================================
// Domain Module
// Rounding intervals and currency configuration
// ============================================================================

pub mod config;
pub mod interval;

pub use config::{
    is_power_of_ten, normalize_guard, normalize_precision, ConfigError, ConfigSnapshot,
    CurrencyBuilder, CurrencyOption, CurrencySettings, CENTS, DEFAULT_GUARD, DEFAULT_PRECISION,
    MAX_PRECISION,
};
pub use interval::Interval;
