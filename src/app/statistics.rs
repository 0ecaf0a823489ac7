//! Statistics and summary printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::run::ScanReport;

/// Prints a one-line summary of a finished scan.
///
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_scan_summary(report: &ScanReport) {
    let status = if report.interrupted {
        "interrupted"
    } else {
        "finished"
    };
    info!(
        "✅ Scan of {} {}: {} host{} found{}, {} wordlist entr{} processed in {:.1}s",
        report.target,
        status,
        report.hosts_found,
        if report.hosts_found == 1 { "" } else { "s" },
        if report.wildcard { " (wildcard zone)" } else { "" },
        report.words_processed,
        if report.words_processed == 1 { "y" } else { "ies" },
        report.elapsed_seconds
    );
    if let Some(path) = &report.output_path {
        info!("Results written to {}", path.display());
    }
}

/// Prints error and info counters to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
