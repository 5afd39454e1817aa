//! Tracing setup for binaries and examples.

use tracing_subscriber::EnvFilter;

/// Initializes a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// Call once, early in `main`. Library crates only emit `tracing` events;
/// installing (or not installing) a subscriber is the application's call.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
