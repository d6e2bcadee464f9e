//! Structured logging setup for the binaries.
//!
//! Environment variables:
//! - `RUST_LOG`: log filter (default: `warn`, or `debug` when verbose)
//! - `MLFQ_LOG_JSON`: `1`/`true` switches to JSON lines
//!
//! Logs always go to stderr so they never mix with trace output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let use_json = std::env::var("MLFQ_LOG_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json = use_json, "tracing initialized");
    }
}
