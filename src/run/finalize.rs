//! Scan finalization.
//!
//! This module contains the `finalize_scan` function which persists the
//! results and builds the report once the engine returned.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::app::{print_error_statistics, print_scan_summary};
use crate::config::Config;
use crate::discovery::EngineOutcome;
use crate::export::{write_scan_output, ScanOutput, SearchLinks};

use super::init::ScanResources;
use super::ScanReport;

/// Finalize a scan run and produce the final report.
///
/// 1. Write the result document (also for interrupted scans)
/// 2. Print counters when requested
/// 3. Construct, log and return the scan report
///
/// # Errors
///
/// Returns an error if the result document cannot be written.
pub(super) fn finalize_scan(
    config: &Config,
    resources: &ScanResources,
    outcome: EngineOutcome,
) -> Result<ScanReport> {
    let hosts_found = outcome.hosts.len();
    let output = ScanOutput {
        target: resources.target.clone(),
        generated_at: Utc::now().to_rfc3339(),
        wildcard: outcome.wildcard.is_some(),
        interrupted: outcome.interrupted,
        records: outcome.records,
        hosts: outcome.hosts,
        search_links: SearchLinks::for_target(&resources.target),
    };
    let output_path = write_scan_output(&config.output_dir, &output).context(format!(
        "Failed to save results below {}",
        config.output_dir.display()
    ))?;

    if config.show_stats {
        print_error_statistics(&resources.stats);
    }

    let report = ScanReport {
        target: resources.target.clone(),
        hosts_found,
        wildcard: output.wildcard,
        interrupted: outcome.interrupted,
        words_processed: outcome.sweep.processed,
        output_path: Some(output_path),
        elapsed_seconds: resources.start_time.elapsed().as_secs_f64(),
    };
    print_scan_summary(&report);
    info!("DONE");
    Ok(report)
}
