//! Export of scan results.
//!
//! The result store, basic records and search links are written as a single
//! JSON document when a scan finishes or is interrupted.

mod json;
mod types;

pub use json::{target_output_dir, write_scan_output};
pub use types::{ScanOutput, SearchLinks};
