//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the tracing/logging system.
///
/// Reads `READINESS_LOG` for per-subsystem log levels, e.g.
/// `READINESS_LOG=readiness_analysis::coupling=debug,readiness_analysis::drift=warn`.
/// Falls back to `readiness=info` if the variable is unset or invalid.
///
/// Idempotent. If another subscriber is already installed globally, that one
/// is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
