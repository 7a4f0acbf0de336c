//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for the gcp binary.
//!
//! Errors are written to stderr and all other events to stdout, so a caller
//! can separate failures from progress output with ordinary redirection.

use std::io;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::TryInitError;

use crate::LogLevel;

/// Environment variable holding an `EnvFilter` directive string that replaces
/// the level selected on the command line.
pub const LOG_ENV_VAR: &str = "GCP_LOG";

/// Builds the filter used by [`init_tracing`].
///
/// When [`LOG_ENV_VAR`] is set and parses, its directives win; otherwise every
/// target is filtered at `level`.
#[must_use]
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy()
}

/// Installs the global subscriber.
///
/// Returns an error when a global subscriber is already installed, which
/// callers running several sessions in one process may ignore.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{LogLevel, init_tracing};
///
/// init_tracing(LogLevel::Debug)?;
/// tracing::info!(target: "gcp::copy", "file copied");
/// ```
pub fn init_tracing(level: LogLevel) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let writer = io::stderr.with_max_level(Level::ERROR).or_else(io::stdout);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(layer)
        .try_init()
}
