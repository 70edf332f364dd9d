//! Observability: tracing initialisation.
//!
//! Uses config::ObservabilityConfig for TEMPVENV_QUIET, TEMPVENV_LOG_LEVEL and
//! TEMPVENV_LOG_JSON.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Tracing initialization mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingMode {
    /// Use TEMPVENV_LOG_LEVEL / TEMPVENV_QUIET from env
    Default,
    /// `--verbose`: debug-level output from the tempvenv crates
    Verbose,
}

/// Initialize tracing. Call at process startup.
/// When TEMPVENV_QUIET=1 only WARN and above are logged, even in verbose mode.
pub fn init_tracing(mode: TracingMode) {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = default_filter(cfg.quiet, &cfg.log_level, mode);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time()
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn default_filter(quiet: bool, log_level: &str, mode: TracingMode) -> String {
    if quiet {
        return "tempvenv=warn".to_string();
    }
    match mode {
        TracingMode::Default => log_level.to_string(),
        TracingMode::Verbose => "tempvenv=debug".to_string(),
    }
}
