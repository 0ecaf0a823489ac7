//! Main application modules.
//!
//! This module provides progress logging, interrupt and shutdown handling, and
//! statistics printing used by the scan driver.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::{install_interrupt_handler, shutdown_gracefully};
pub use statistics::{print_error_statistics, print_scan_summary};
