// ============================================================================
// Utilities Module
// Ambient helpers: diagnostic logging setup
// ============================================================================

mod logging;

pub use logging::{init_logging, try_init_logging, LOG_TARGET};

#[cfg(test)]
pub(crate) use logging::capture_logs;
