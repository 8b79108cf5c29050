//! Stderr logging through `tracing-subscriber`.
//!
//! The libraries log through the `log` facade; the subscriber's `tracing-log`
//! bridge picks those records up.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides `-v`.
pub const LOG_ENV: &str = "ZT_SHARE_LOG";

/// Directive for a `-v` count: warn, then debug, then trace.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// `ZT_SHARE_LOG` when it parses, the `-v` level otherwise.
fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Install the global subscriber.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}
