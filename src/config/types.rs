//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_NAMESERVER, DEFAULT_OUTPUT_DIR, DNS_RETRY_DELAY,
    DNS_RETRY_LIMIT, DNS_TIMEOUT_SECS,
};
use crate::discovery::{FollowScope, ScopeMode};
use crate::dns::ResolverConfig;
use crate::error_handling::ReconError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scan configuration.
///
/// Used both as the CLI parser and as the library configuration. Construct it
/// programmatically with struct update syntax over `Config::default()`.
///
/// # Examples
///
/// ```no_run
/// use dns_footprint::Config;
///
/// let config = Config {
///     target: "example.com".to_string(),
///     concurrency: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dns_footprint",
    version,
    about = "Maps the DNS footprint of a domain"
)]
pub struct Config {
    /// Target domain
    #[arg(short, long)]
    pub target: String,

    /// Recursively follow names that are unrelated to the target
    #[arg(short, long)]
    pub follow: bool,

    /// Wordlist entries looked up concurrently per batch
    #[arg(short, long, alias = "threads", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Wordlist to use (one label per line); the bundled list is used when omitted
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Nameserver to query (repeatable)
    #[arg(short = 'n', long = "nameserver", default_value = DEFAULT_NAMESERVER)]
    pub nameservers: Vec<IpAddr>,

    /// Retries after a transient DNS failure
    #[arg(long, default_value_t = DNS_RETRY_LIMIT)]
    pub retry_limit: usize,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// How pivot candidates are matched against the target
    #[arg(long, value_enum, default_value_t = ScopeMode::Suffix)]
    pub scope: ScopeMode,

    /// Skip the certificate transparency search
    #[arg(long)]
    pub no_cert_search: bool,

    /// Directory receiving the result document
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Print failure and discovery counters at the end of the run
    #[arg(long)]
    pub show_stats: bool,

    /// Pause between transient DNS retries
    #[arg(skip = DNS_RETRY_DELAY)]
    pub retry_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: String::new(),
            follow: false,
            concurrency: DEFAULT_CONCURRENCY,
            wordlist: None,
            nameservers: vec![DEFAULT_NAMESERVER
                .parse()
                .unwrap_or(IpAddr::from([1, 1, 1, 1]))],
            retry_limit: DNS_RETRY_LIMIT,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            scope: ScopeMode::Suffix,
            no_cert_search: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            show_stats: false,
            retry_delay: DNS_RETRY_DELAY,
        }
    }
}

impl Config {
    /// Checks the values a scan cannot start without.
    pub fn validate(&self) -> Result<(), ReconError> {
        let target = crate::domain::normalize(&self.target);
        if target.is_empty() || !target.contains('.') {
            return Err(ReconError::InvalidConfig(format!(
                "'{}' is not a domain name",
                self.target
            )));
        }
        if self.concurrency == 0 {
            return Err(ReconError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.nameservers.is_empty() {
            return Err(ReconError::InvalidConfig(
                "at least one nameserver is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolver settings derived from this configuration.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            nameservers: self.nameservers.clone(),
            retry_limit: self.retry_limit,
            timeout: Duration::from_secs(self.dns_timeout_secs),
            retry_delay: self.retry_delay,
        }
    }

    /// Pivot scope derived from this configuration.
    pub fn follow_scope(&self) -> FollowScope {
        FollowScope {
            base_domain: crate::domain::normalize(&self.target),
            allow_unrelated: self.follow,
            mode: self.scope,
        }
    }
}
