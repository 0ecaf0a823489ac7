//! Configuration constants.
//!
//! This module defines the defaults and operational limits used throughout the
//! application: resolver settings, sweep sizing, recursion bounds and output paths.

use std::time::Duration;

// Resolver defaults
/// Default public resolver used when no nameserver is configured.
pub const DEFAULT_NAMESERVER: &str = "1.1.1.1";
/// DNS server port.
pub const DNS_PORT: u16 = 53;
/// Number of retries after a transient DNS failure (6 attempts in total).
pub const DNS_RETRY_LIMIT: usize = 5;
/// Per-query DNS timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Pause between retries of a transiently failed DNS query.
pub const DNS_RETRY_DELAY: Duration = Duration::from_millis(50);

// Wordlist sweep
/// Number of wordlist entries looked up concurrently per batch.
pub const DEFAULT_CONCURRENCY: usize = 50;
/// A progress line is logged every this many processed wordlist entries.
pub const PROGRESS_INTERVAL: usize = 500;

// Recursion bounds
/// Maximum `include`/`redirect` nesting followed while expanding SPF.
/// Mirrors the RFC 7208 limit of 10 DNS-querying mechanisms.
pub const MAX_SPF_DEPTH: usize = 10;
/// Maximum number of PTR hops followed from a single accepted name.
pub const MAX_PIVOT_DEPTH: usize = 8;

// Wildcard detection
/// Length of the random label used to probe for wildcard records.
pub const WILDCARD_PROBE_LABEL_LEN: usize = 32;

// Certificate transparency seed source
/// crt.sh search endpoint.
pub const CRTSH_URL: &str = "https://crt.sh/";
/// Request timeout for the certificate transparency query.
pub const CERT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Total attempts made against the certificate source before giving up.
pub const CERT_SEARCH_MAX_ATTEMPTS: usize = 4;
/// Pause between certificate source attempts.
pub const CERT_SEARCH_RETRY_DELAY: Duration = Duration::from_secs(1);

// Output
/// Directory that receives one sub-directory per scanned target.
pub const DEFAULT_OUTPUT_DIR: &str = "./out";
/// File name of the result document inside the target directory.
pub const OUTPUT_FILE_NAME: &str = "enum.json";
