//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_footprint` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use dns_footprint::initialization::init_logger_with;
use dns_footprint::{run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // An interrupted scan still saved its results, so it exits with 0
    match run_scan(config).await {
        Ok(_report) => Ok(()),
        Err(e) => {
            eprintln!("dns_footprint error: {:#}", e);
            process::exit(1);
        }
    }
}
