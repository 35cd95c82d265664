//! Tracing setup shared by the server binary and integration tests.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialise the global subscriber. Filter comes from `RUST_LOG`,
/// defaulting to `info` for our crates and `warn` elsewhere.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,server=info,services=info,db=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
