//! Logging initialization for the bento CLI.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `BENTO_LOG` environment variable. When the variable is unset or invalid,
//! the `[logging] level` from the settings file is used.
//!
//! ```bash
//! # Debug level
//! BENTO_LOG=debug bento list
//!
//! # Engine detail only
//! BENTO_LOG=bento_grid=debug,warn bento compact
//! ```
//!
//! The layout engine logs through the `log` facade; `tracing-subscriber`
//! picks those records up through its `tracing-log` bridge.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "BENTO_LOG";

/// Builds the filter from `BENTO_LOG`, falling back to `fallback`.
pub fn env_filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber. Output goes to stderr so stdout stays
/// clean for `list` and `export`.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (call once, at startup).
pub fn init(fallback: LogLevel) {
    fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
