//! Command-line interface parsing for dinecache
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into the `StartupConfig` the application is built from.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

use crate::controller::FetchPolicy;
use crate::data::DEFAULT_RESTAURANTS_URL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The listing URL is not http(s)
    #[error("Invalid URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidUrl(String),

    /// The log level is not recognized
    #[error("Invalid log level: '{0}'. Valid levels: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// dinecache - Browse a restaurant listing that opens instantly from cache
#[derive(Parser, Debug)]
#[command(name = "dinecache")]
#[command(about = "Restaurant listing browser with an offline snapshot")]
#[command(version)]
pub struct Cli {
    /// URL of the restaurant listing JSON
    #[arg(long, value_name = "URL", default_value = DEFAULT_RESTAURANTS_URL)]
    pub url: String,

    /// Directory for the persisted snapshot (defaults to the XDG cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show only the cached snapshot; never touch the network
    #[arg(long)]
    pub offline: bool,

    /// Extra attempts when a fetch fails
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub retries: u32,

    /// Milliseconds to wait between fetch attempts
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Log verbosity: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log file (defaults to dinecache.log in the cache dir)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Listing URL; `None` runs offline
    pub url: Option<String>,
    /// Snapshot directory override
    pub cache_dir: Option<PathBuf>,
    /// Retry policy of the background fetch
    pub fetch_policy: FetchPolicy,
    /// Maximum log level
    pub log_level: Level,
    /// Log file override
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_RESTAURANTS_URL.to_string()),
            cache_dir: None,
            fetch_policy: FetchPolicy::default(),
            log_level: Level::INFO,
            log_file: None,
        }
    }
}

/// Parses a log level argument.
///
/// # Returns
/// * `Ok(Level)` if the string names a tracing level
/// * `Err(CliError::InvalidLogLevel)` otherwise
pub fn parse_log_level(s: &str) -> Result<Level, CliError> {
    s.parse::<Level>()
        .map_err(|_| CliError::InvalidLogLevel(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the URL or log level is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let url = if cli.offline {
            None
        } else if cli.url.starts_with("http://") || cli.url.starts_with("https://") {
            Some(cli.url.clone())
        } else {
            return Err(CliError::InvalidUrl(cli.url.clone()));
        };

        Ok(StartupConfig {
            url,
            cache_dir: cli.cache_dir.clone(),
            fetch_policy: FetchPolicy {
                retries: cli.retries,
                retry_delay: Duration::from_millis(cli.retry_delay_ms),
            },
            log_level: parse_log_level(&cli.log_level)?,
            log_file: cli.log_file.clone(),
        })
    }
}
