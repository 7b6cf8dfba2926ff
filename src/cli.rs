//! Command-line interface parsing for tubedeck
//!
//! Handles clap argument parsing and turns the raw arguments into a validated
//! runtime configuration (channels, API key, cache TTL, marquee speed, and the
//! top-row ordering policy).

use clap::Parser;
use thiserror::Error;

use crate::cache::DEFAULT_TTL_HOURS;
use crate::data::TopOrder;

/// Channel shown when none is configured.
pub const DEFAULT_CHANNEL: &str = "UCS1mpkERrKjZLhSZovPv9Dg";

/// Default marquee speed in terminal cells per second.
pub const DEFAULT_SPEED: f32 = 6.0;

/// Environment variable consulted when `--api-key` is absent.
const API_KEY_ENV: &str = "YT_API_KEY";

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key on the command line or in the environment
    #[error("No API key: pass --api-key or set {API_KEY_ENV}")]
    MissingApiKey,

    /// The marquee speed must be positive
    #[error("Invalid speed '{0}': must be greater than zero")]
    InvalidSpeed(f32),

    /// The cache TTL must be positive
    #[error("Invalid TTL '{0}': must be at least one hour")]
    InvalidTtl(u64),
}

/// tubedeck - browse a YouTube channel's top videos, newest uploads, and playlists
#[derive(Parser, Debug)]
#[command(name = "tubedeck")]
#[command(about = "Terminal browser for a YouTube channel's top videos, uploads, and playlists")]
#[command(version)]
pub struct Cli {
    /// Channel id to show (repeat for multiple channels)
    #[arg(long = "channel", value_name = "CHANNEL_ID")]
    pub channels: Vec<String>,

    /// YouTube Data API key (falls back to the YT_API_KEY environment variable)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Cache time-to-live in hours
    #[arg(long, value_name = "HOURS", default_value_t = DEFAULT_TTL_HOURS)]
    pub ttl_hours: u64,

    /// Marquee scroll speed in cells per second
    #[arg(long, value_name = "CELLS_PER_SEC", default_value_t = DEFAULT_SPEED)]
    pub speed: f32,

    /// Ordering of the top row when it exceeds the row cap
    #[arg(long, value_enum, default_value_t = TopOrder::Ranked)]
    pub top_order: TopOrder,

    /// Disable the on-disk cache for this run
    #[arg(long)]
    pub no_cache: bool,
}

/// Validated runtime configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    /// Channel ids, in fetch order
    pub channels: Vec<String>,
    /// YouTube Data API key
    pub api_key: String,
    /// Cache entry lifetime in hours
    pub ttl_hours: u64,
    /// Marquee speed in cells per second
    pub speed: f32,
    /// Top-row ordering policy
    pub top_order: TopOrder,
    /// Whether the on-disk cache is disabled
    pub no_cache: bool,
}

impl Config {
    /// Builds a validated configuration from parsed arguments, consulting the
    /// environment for the API key.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Self::from_cli_with_env(cli, std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`Config::from_cli`] with an explicit environment value, for tests.
    pub fn from_cli_with_env(cli: &Cli, env_api_key: Option<String>) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .clone()
            .or(env_api_key)
            .filter(|k| !k.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        if cli.speed <= 0.0 {
            return Err(CliError::InvalidSpeed(cli.speed));
        }
        if cli.ttl_hours == 0 {
            return Err(CliError::InvalidTtl(cli.ttl_hours));
        }

        let channels = if cli.channels.is_empty() {
            vec![DEFAULT_CHANNEL.to_string()]
        } else {
            cli.channels.clone()
        };

        Ok(Self {
            channels,
            api_key,
            ttl_hours: cli.ttl_hours,
            speed: cli.speed,
            top_order: cli.top_order,
            no_cache: cli.no_cache,
        })
    }
}
