#![forbid(unsafe_code)]

//! Shared plumbing for the demo binaries.

use tracing_subscriber::EnvFilter;

/// Install a subscriber reading `ASKER_LOG` (off by default so demo output
/// stays clean).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("ASKER_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
