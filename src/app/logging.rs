//! Progress logging utilities.

use log::info;
use std::time::Instant;

/// Logs progress of the wordlist sweep.
///
/// # Arguments
///
/// * `start_time` - When the sweep started
/// * `processed` - Wordlist entries finished so far
/// * `total` - Wordlist size
pub fn log_progress(start_time: Instant, processed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let percent = if total > 0 {
        processed as f64 * 100.0 / total as f64
    } else {
        100.0
    };
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "{:.0}% ({}/{}) in {:.2}s (~{:.2} names/sec)",
        percent, processed, total, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_handles_empty_wordlist() {
        // Should not panic or divide by zero
        log_progress(Instant::now(), 0, 0);
        log_progress(Instant::now(), 500, 1000);
    }
}
