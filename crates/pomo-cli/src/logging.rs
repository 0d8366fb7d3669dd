//! Diagnostic logging setup.
//!
//! User-facing output goes to stdout through the reporter and the CLI;
//! `tracing` diagnostics go to stderr, filtered by `POMO_LOG`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "POMO_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// Uses `try_init()`, so calling this more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
