//! Scan resource initialization.
//!
//! This module contains the `init_scan_resources` function which handles
//! all setup before the discovery engine starts.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::discovery::{load_wordlist, DiscoveryEngine};
use crate::dns::{DnsTransport, ResolverClient};
use crate::domain::normalize;
use crate::error_handling::ProcessingStats;
use crate::seeds::CertificateSource;

/// Everything a scan needs once it is running.
pub(super) struct ScanResources {
    pub target: String,
    pub engine: DiscoveryEngine,
    pub stats: Arc<ProcessingStats>,
    pub start_time: Instant,
}

/// Initialize all resources needed for a scan.
///
/// 1. Validate the configuration and normalize the target
/// 2. Load the wordlist (file or bundled)
/// 3. Build the resolver client over `transport`
/// 4. Build the discovery engine with the follow policy and seed source
///
/// # Returns
///
/// The resources and the wordlist labels to sweep.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the wordlist cannot be
/// read.
pub(super) fn init_scan_resources(
    config: &Config,
    transport: Arc<dyn DnsTransport>,
    seeds: Option<Arc<dyn CertificateSource>>,
    cancel: CancellationToken,
) -> Result<(ScanResources, Vec<String>)> {
    config
        .validate()
        .context("Configuration validation failed")?;
    let start_time = Instant::now();
    let target = normalize(&config.target);

    let words = load_wordlist(config.wordlist.as_deref()).context("Failed to load wordlist")?;
    info!("Scanning {target} with {} wordlist entries", words.len());

    let stats = Arc::new(ProcessingStats::new());
    let client = ResolverClient::new(transport, &config.resolver_config(), Arc::clone(&stats));
    let engine = DiscoveryEngine::new(
        target.clone(),
        client,
        Arc::new(config.follow_scope()),
        Arc::clone(&stats),
        cancel,
    )
    .with_concurrency(config.concurrency)
    .with_seeds(seeds);

    Ok((
        ScanResources {
            target,
            engine,
            stats,
            start_time,
        },
        words,
    ))
}
