//! Command-line interface parsing for tfpricings
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the configuration used to build the pricing service.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::data::autobot::AUTOBOT_BASE_URL;
use crate::pricings::PricingsConfig;
use crate::refresh::RefreshConfig;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// A duration argument was zero
    #[error("--{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// No cache directory was given and none could be determined
    #[error("Could not determine a cache directory; pass --cache-dir or --memory-cache")]
    NoCacheDir,
}

/// tfpricings - cached autobot.tf price list enriched with item names and images
#[derive(Parser, Debug)]
#[command(name = "tfpricings")]
#[command(about = "Fetch, group and cache the autobot.tf price list")]
#[command(version)]
pub struct Cli {
    /// Base URL of the autobot.tf API
    #[arg(long, env = "TFPRICINGS_BASE_URL", default_value = AUTOBOT_BASE_URL)]
    pub base_url: String,

    /// Path to the item schema JSON file
    #[arg(long, env = "TFPRICINGS_SCHEMA", value_name = "PATH")]
    pub schema: PathBuf,

    /// Directory for the on-disk cache (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR", conflicts_with = "memory_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Keep the cache in memory only, for the lifetime of this process
    #[arg(long)]
    pub memory_cache: bool,

    /// Lifetime of the cached price list in minutes
    #[arg(long, value_name = "MINUTES", default_value_t = 10)]
    pub ttl_minutes: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print all pricings as JSON, from cache when fresh
    List {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Only print records for this base defindex
        #[arg(long, value_name = "DEFINDEX")]
        defindex: Option<u32>,
    },
    /// Drop the cached price list and rebuild it from upstream
    Refresh,
    /// Refresh the price list on an interval until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(long, value_name = "SECONDS", default_value_t = 600)]
        interval_secs: u64,
    },
}

/// Where the price list cache lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLocation {
    Memory,
    Disk(PathBuf),
    /// XDG default, resolved at startup
    Default,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub base_url: String,
    pub schema_path: PathBuf,
    pub cache: CacheLocation,
    pub pricings: PricingsConfig,
    pub refresh: RefreshConfig,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if a duration argument is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.ttl_minutes == 0 {
            return Err(CliError::ZeroDuration("ttl-minutes"));
        }

        let refresh = match cli.command {
            Command::Watch { interval_secs: 0 } => {
                return Err(CliError::ZeroDuration("interval-secs"));
            }
            Command::Watch { interval_secs } => RefreshConfig {
                interval: Duration::from_secs(interval_secs),
                enabled: true,
            },
            _ => RefreshConfig {
                enabled: false,
                ..RefreshConfig::default()
            },
        };

        let cache = match (&cli.cache_dir, cli.memory_cache) {
            (_, true) => CacheLocation::Memory,
            (Some(dir), false) => CacheLocation::Disk(dir.clone()),
            (None, false) => CacheLocation::Default,
        };

        Ok(StartupConfig {
            base_url: cli.base_url.clone(),
            schema_path: cli.schema.clone(),
            cache,
            pricings: PricingsConfig {
                cache_ttl: Duration::from_secs(cli.ttl_minutes * 60),
                ..PricingsConfig::default()
            },
            refresh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["tfpricings", "--schema", "schema.json"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_cli_parse_list_defaults() {
        let cli = parse(&["list"]);
        assert_eq!(cli.ttl_minutes, 10);
        assert!(!cli.memory_cache);
        assert!(cli.cache_dir.is_none());
        assert_eq!(
            cli.command,
            Command::List {
                pretty: false,
                defindex: None
            }
        );
    }

    #[test]
    fn test_cli_parse_list_with_filter() {
        let cli = parse(&["list", "--pretty", "--defindex", "5021"]);
        assert_eq!(
            cli.command,
            Command::List {
                pretty: true,
                defindex: Some(5021)
            }
        );
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from(["tfpricings", "--schema", "schema.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_cache_dir_conflicts_with_memory_cache() {
        let result = Cli::try_parse_from([
            "tfpricings",
            "--schema",
            "s.json",
            "--cache-dir",
            "/tmp/x",
            "--memory-cache",
            "list",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_startup_config_from_list() {
        let cli = parse(&["--ttl-minutes", "5", "list"]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.pricings.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.pricings.cache_key, "autobot-tf-pricings");
        assert_eq!(config.cache, CacheLocation::Default);
        assert!(!config.refresh.enabled);
        assert_eq!(config.schema_path, PathBuf::from("schema.json"));
    }

    #[test]
    fn test_startup_config_from_watch() {
        let cli = parse(&["--memory-cache", "watch", "--interval-secs", "30"]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.cache, CacheLocation::Memory);
        assert!(config.refresh.enabled);
        assert_eq!(config.refresh.interval, Duration::from_secs(30));
    }

    #[test]
    fn test_startup_config_disk_cache() {
        let cli = parse(&["--cache-dir", "/tmp/prices", "refresh"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache, CacheLocation::Disk(PathBuf::from("/tmp/prices")));
    }

    #[test]
    fn test_startup_config_rejects_zero_ttl() {
        let cli = parse(&["--ttl-minutes", "0", "list"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("ttl-minutes"));
    }

    #[test]
    fn test_startup_config_rejects_zero_interval() {
        let cli = parse(&["watch", "--interval-secs", "0"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }
}
