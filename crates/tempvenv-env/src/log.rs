//! Verbose-aware progress logging. Uses `tracing` so output reaches the
//! subscriber the caller installed.
//!
//! Verbose sessions log progress at INFO and warnings at WARN. Otherwise both
//! drop to DEBUG. TEMPVENV_QUIET=1 silences progress lines.

#[macro_export]
macro_rules! progress {
    ($verbose:expr, $($arg:tt)*) => {{
        if $verbose && !$crate::log::is_quiet() {
            tracing::info!($($arg)*);
        } else {
            tracing::debug!($($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! verbose_warn {
    ($verbose:expr, $($arg:tt)*) => {{
        if $verbose {
            tracing::warn!($($arg)*);
        } else {
            tracing::debug!($($arg)*);
        }
    }};
}

pub fn is_quiet() -> bool {
    tempvenv_core::config::ObservabilityConfig::from_env().quiet
}
