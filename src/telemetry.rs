//! Diagnostic logging.
//!
//! Events go to stderr through `tracing-subscriber`. The filter comes from
//! `LAB_LOG` using `EnvFilter` directives (`debug`, `lab=trace`, ...) and
//! defaults to `warn`, so normal runs stay quiet.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "LAB_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Reads the log filter from `LAB_LOG`.
///
/// A missing or invalid directive falls back to `warn`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber; later calls are ignored.
pub fn init_logging() {
    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
    if installed.is_err() {
        tracing::debug!("logging was already initialised");
    }
}
