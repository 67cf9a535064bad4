//! Tracing setup for the command line tools

use std::env;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to the shelfcast
/// crates. Calling this twice is harmless, the second call is ignored.
pub fn init_tracing(level: &str) {
    let default_directive = format!(
        "retail_ops={level},demand_forecast={level},shelfcast={level}",
        level = level
    );
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
