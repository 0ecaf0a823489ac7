//! Error handling and processing statistics.
//!
//! This module provides:
//! - Run-level error enums (`ReconError`, `InitializationError`)
//! - Processing statistics tracking (failures and notable events)
//!
//! Failure categories are split into:
//! - **Errors**: DNS or seed-source failures that were recovered locally
//! - **Info**: discovery events (hosts found, pivots, wildcard suppression)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, ReconError};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::DnsTransientRetry);
        stats.increment_error(ErrorType::DnsTransientRetry);
        stats.increment_error(ErrorType::DnsRetriesExhausted);
        stats.increment_info(InfoType::HostFound);

        assert_eq!(stats.get_error_count(ErrorType::DnsTransientRetry), 2);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        let stats = Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_info(InfoType::DuplicateSkipped);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_info_count(InfoType::DuplicateSkipped), 800);
    }
}
