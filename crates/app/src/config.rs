//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Errors in the runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The timeout is not a number of milliseconds.
    #[error("must be a number of milliseconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Settings of one `routecheck` invocation.
///
/// Every option can also come from its `ROUTECHECK_*` variable; a
/// command-line value wins over the environment.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "routecheck", version, about = "Run declarative HTTP route tests")]
pub struct Settings {
    /// Suite file to run (YAML, or JSON with a `.json` extension)
    #[arg(env = "ROUTECHECK_SUITE")]
    pub suite: PathBuf,

    /// Overrides the suite's `base_url`
    #[arg(long, env = "ROUTECHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long = "timeout-ms", env = "ROUTECHECK_TIMEOUT_MS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}
