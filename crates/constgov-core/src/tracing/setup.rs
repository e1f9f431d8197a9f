//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the constgov tracing/logging system.
///
/// Reads the `CONSTGOV_LOG` environment variable for per-module log levels,
/// e.g. `CONSTGOV_LOG=constgov_analysis::scanner=debug`.
/// Falls back to `default_directive` when unset or invalid.
///
/// Events go to stderr so stdout stays reserved for the report.
/// Calling this more than once is a no-op.
pub fn init_tracing(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CONSTGOV_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
