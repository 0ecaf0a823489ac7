//! Scan orchestration.
//!
//! `run_scan` wires the production resolver, the crt.sh seed source and the
//! Ctrl-C handler around the discovery engine. `run_scan_with` takes those
//! pieces as arguments so callers can substitute their own.

mod finalize;
mod init;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::app::{install_interrupt_handler, shutdown_gracefully};
use crate::config::{Config, CERT_SEARCH_TIMEOUT};
use crate::dns::DnsTransport;
use crate::initialization::{init_client, init_transport};
use crate::seeds::{CertificateSource, CrtShSource};

use finalize::finalize_scan;
use init::init_scan_resources;

/// Results of a scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Normalized target domain
    pub target: String,
    /// Records in the result document, including the wildcard record
    pub hosts_found: usize,
    /// The target zone has a wildcard record
    pub wildcard: bool,
    /// The scan was stopped by an interrupt; results are partial
    pub interrupted: bool,
    /// Wordlist entries that were looked up
    pub words_processed: usize,
    /// Path of the written result document
    pub output_path: Option<PathBuf>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs a scan with the provided configuration.
///
/// This is the main entry point for the library. Ctrl-C stops the scan after
/// the current batch; results found so far are still written.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid or the wordlist cannot be read
/// - The target has no NS records (`ReconError::TargetNotResolvable`); no
///   result document is written in that case
/// - The result document cannot be written
///
/// # Example
///
/// ```no_run
/// use dns_footprint::{run_scan, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     target: "example.com".to_string(),
///     no_cert_search: true,
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("Found {} hosts", report.hosts_found);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    let transport = init_transport(&config.resolver_config())
        .context("Failed to initialize DNS resolver")?;
    let seeds: Option<Arc<dyn CertificateSource>> = if config.no_cert_search {
        None
    } else {
        let client = init_client(CERT_SEARCH_TIMEOUT).context("Failed to initialize HTTP client")?;
        Some(Arc::new(CrtShSource::new(client)))
    };

    let cancel = CancellationToken::new();
    let interrupt_task = install_interrupt_handler(cancel.clone());
    let result = run_scan_with(config, transport, seeds, cancel.clone()).await;
    shutdown_gracefully(cancel, Some(interrupt_task)).await;
    result
}

/// Runs a scan over the given DNS transport and seed source.
///
/// Cancelling `cancel` has the same effect as Ctrl-C in [`run_scan`].
///
/// # Errors
///
/// Same as [`run_scan`].
pub async fn run_scan_with(
    config: Config,
    transport: Arc<dyn DnsTransport>,
    seeds: Option<Arc<dyn CertificateSource>>,
    cancel: CancellationToken,
) -> Result<ScanReport> {
    let (resources, words) = init_scan_resources(&config, transport, seeds, cancel)?;
    let outcome = resources.engine.run(words).await?;
    finalize_scan(&config, &resources, outcome)
}
