//! JSON export of scan results.
//!
//! Writes one pretty-printed document per target to
//! `<output_dir>/<target with dots replaced by underscores>/enum.json`.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::types::ScanOutput;
use crate::config::OUTPUT_FILE_NAME;
use crate::error_handling::ReconError;

/// Directory that receives the results of `target`.
pub fn target_output_dir(output_dir: &Path, target: &str) -> PathBuf {
    output_dir.join(target.replace('.', "_"))
}

/// Writes `output` below `output_dir`, creating directories as needed.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns `ReconError::Output` if the directory or file cannot be written.
pub fn write_scan_output(output_dir: &Path, output: &ScanOutput) -> Result<PathBuf, ReconError> {
    info!("SAVING INFORMATION");
    let dir = target_output_dir(output_dir, &output.target);
    fs::create_dir_all(&dir)?;

    let path = dir.join(OUTPUT_FILE_NAME);
    let document = serde_json::to_string_pretty(output)?;
    fs::write(&path, document)?;
    Ok(path)
}
