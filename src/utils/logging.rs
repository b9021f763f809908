// ============================================================================
// Logging Setup
// Installs a tracing subscriber for the crate's diagnostics
// ============================================================================
//
// Arithmetic failures in the lenient API are reported with `tracing::error!`
// and coerced configuration with `tracing::warn!`, keyed by an `operation`
// field. Nothing is printed unless the application installs a subscriber,
// either its own or the `fmt` subscriber below (feature `logging`).
//
// # Usage
//
// ```ignore
// use scaled_currency::utils::init_logging;
//
// // RUST_LOG wins when set, otherwise warnings and errors from this crate
// init_logging(tracing::Level::WARN);
// ```
// ============================================================================

/// Target under which this crate's events are emitted.
pub const LOG_TARGET: &str = "scaled_currency";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by `default_level`
/// for this crate when `RUST_LOG` is unset.
///
/// # Returns
/// * `true` if the subscriber was installed
/// * `false` if a global subscriber already exists
#[cfg(feature = "logging")]
pub fn try_init_logging(default_level: tracing::Level) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            LOG_TARGET,
            default_level.as_str().to_ascii_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Install a `fmt` subscriber.
///
/// **Note:** This is a no-op stub. Enable the `logging` feature for output.
#[cfg(not(feature = "logging"))]
pub fn try_init_logging(_default_level: tracing::Level) -> bool {
    false
}

/// Like [`try_init_logging`], ignoring an already installed subscriber.
pub fn init_logging(default_level: tracing::Level) {
    if !try_init_logging(default_level) {
        tracing::debug!("logging subscriber not installed by {}", LOG_TARGET);
    }
}

/// Capture everything `f` logs on this thread as plain `fmt` output.
#[cfg(test)]
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init_logging(tracing::Level::WARN);
        // whatever the first call did, a global subscriber can only be set once
        assert!(!try_init_logging(tracing::Level::WARN));
    }

    #[test]
    fn test_capture_logs_sees_events() {
        let out = capture_logs(|| tracing::warn!(operation = "demo", "coerced"));
        assert!(out.contains("WARN"));
        assert!(out.contains("coerced"));
        assert!(out.contains("operation=\"demo\""));
    }

    #[test]
    fn test_log_target_matches_crate() {
        assert_eq!(LOG_TARGET, env!("CARGO_CRATE_NAME"));
    }
}
