// src/logging.rs
// =============================================================================
// Logging setup.
//
// Progress lines ("Currently scraping", "Saved page", warnings...) go to
// stderr through `tracing`, so stdout stays clean for the summary table or
// the --json report.
//
// RUST_LOG overrides the level, e.g. RUST_LOG=site_mirror=debug
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info,site_mirror=debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
