use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Map verbosity count to a tracing filter; 0 defers to `RUST_LOG`.
fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("warn"),
        2 => EnvFilter::new("info"),
        3 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber. Logs go to stderr so views stay clean.
pub fn init(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to initialize tracing: {e}"))
}
