//! Tracing setup for the `cssflow` binary.
//!
//! The library only emits events; installing a subscriber is the caller's
//! business.

use tracing_subscriber::EnvFilter;

/// Install an fmt subscriber writing to stderr, filtered by `RUST_LOG`.
pub fn tracing_init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
