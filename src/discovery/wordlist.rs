//! Wordlist loading.

use std::path::Path;

use crate::error_handling::ReconError;

/// Labels shipped with the binary, used when no wordlist is given.
const BUNDLED_WORDLIST: &str = include_str!("../../wordlists/subdomains.txt");

/// Splits wordlist text into labels, in file order.
///
/// Entries are trimmed; blank lines and `#` comments are skipped.
pub fn parse_wordlist(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Loads the wordlist at `path`, or the bundled one.
///
/// # Errors
///
/// Returns `ReconError::Wordlist` if the file cannot be read.
pub fn load_wordlist(path: Option<&Path>) -> Result<Vec<String>, ReconError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ReconError::Wordlist {
                path: path.display().to_string(),
                source,
            })?;
            Ok(parse_wordlist(&text))
        }
        None => Ok(parse_wordlist(BUNDLED_WORDLIST)),
    }
}
