// src/logging.rs
// =============================================================================
// Diagnostic logging with `tracing`.
//
// Logs go to stderr so the report on stdout stays clean. By default only
// warnings are shown; --verbose turns on debug output for this crate, and
// RUST_LOG overrides both.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,page_weight=debug"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second call (e.g. from tests) leaves the first subscriber in place
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
