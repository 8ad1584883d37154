//! Install the stderr log subscriber.
//!
//! Library crates log through the `log` facade; the subscriber's `tracing-log`
//! bridge forwards those records alongside native tracing events.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter could not be parsed.
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        /// Filter text as supplied.
        value: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// A global subscriber was already installed.
    #[error("telemetry error: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise `fallback` is parsed as the
/// filter.
pub(crate) fn init(fallback: &str) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback).map_err(|source| TelemetryError::EnvFilter {
            value: fallback.to_owned(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
