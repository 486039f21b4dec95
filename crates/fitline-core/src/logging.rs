#![forbid(unsafe_code)]

//! Logging facade for the fitline crates.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! and at the crate root. Without it, the same macro names expand to nothing,
//! so layout code can log unconditionally and pay nothing in release builds
//! that do not opt in.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], which installs a
//! JSON formatter filtered by the `FITLINE_LOG` environment variable.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

/// Environment variable holding the `EnvFilter` directive for
/// [`init_json_subscriber`].
pub const ENV_LOG_FILTER: &str = "FITLINE_LOG";

/// Filter used when `FITLINE_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Span stand-in returned by `debug_span!` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. The returned guard does nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Error returned when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberAlreadySet;

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for SubscriberAlreadySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a global tracing subscriber is already installed")
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for SubscriberAlreadySet {}

/// Install a global JSON subscriber filtered by `FITLINE_LOG`.
///
/// Host applications that already own a subscriber should skip this and let
/// the fitline spans flow into theirs.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> Result<(), SubscriberAlreadySet> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .map_err(|_| SubscriberAlreadySet)?;

    tracing::debug!(filter_env = ENV_LOG_FILTER, "fitline json subscriber installed");
    Ok(())
}
