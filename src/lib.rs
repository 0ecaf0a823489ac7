//! dns_footprint library: recursive DNS reconnaissance of a domain
//!
//! This library maps the externally visible DNS footprint of a target domain:
//! basic zone records, wildcard detection, SPF and certificate transparency
//! seeds, a batched wordlist sweep, and reverse-DNS pivoting onto related
//! names. Results are written as one JSON document per target.
//!
//! # Example
//!
//! ```no_run
//! use dns_footprint::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     target: "example.com".to_string(),
//!     concurrency: 20,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!("Found {} hosts in {:.1}s", report.hosts_found, report.elapsed_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod discovery;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod initialization;
mod run;
pub mod seeds;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{InitializationError, ReconError};
pub use run::{run_scan, run_scan_with, ScanReport};
