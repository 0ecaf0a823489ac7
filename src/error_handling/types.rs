//! Error type definitions.
//!
//! This module defines the run-level error enums and the failure/info categories
//! counted while a scan is running.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Errors that stop a scan from starting or completing.
#[derive(Error, Debug)]
pub enum ReconError {
    /// The target's own NS lookup failed; the domain does not resolve.
    #[error("The domain '{0}' is not resolvable! Check it for typos!")]
    TargetNotResolvable(String),

    /// A configuration value cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The wordlist could not be read.
    #[error("Failed to read wordlist {path}: {source}")]
    Wordlist {
        /// Path that was opened
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The result document could not be written.
    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),

    /// The result document could not be serialized.
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client used by the certificate search.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Failures observed while a scan is running.
///
/// None of these abort the run; they are counted and reported at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// A DNS query failed transiently and was retried
    DnsTransientRetry,
    /// A DNS query kept failing transiently until the retry limit
    DnsRetriesExhausted,
    /// A name or address could not be turned into a DNS query
    DnsMalformedInput,
    /// MX, TXT or DMARC lookup for the target failed
    DnsBasicRecordError,
    /// The certificate name source could not be queried
    CertificateSourceError,
    /// A lookup task panicked or was aborted
    LookupTaskError,
}

/// Notable events counted during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A name resolved and was stored
    HostFound,
    /// A name was found by following a PTR record
    PtrPivot,
    /// A name resolved to the wildcard signature and was dropped
    WildcardSuppressed,
    /// A name was skipped because it had already been looked up
    DuplicateSkipped,
    /// A pivot was skipped because the follow policy rejected it
    OutOfScope,
    /// A pivot chain reached the depth limit
    PivotDepthLimit,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsTransientRetry => "DNS transient failures retried",
            ErrorType::DnsRetriesExhausted => "DNS retries exhausted",
            ErrorType::DnsMalformedInput => "DNS malformed input",
            ErrorType::DnsBasicRecordError => "DNS basic record lookup error",
            ErrorType::CertificateSourceError => "Certificate source error",
            ErrorType::LookupTaskError => "Lookup task error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HostFound => "Host found",
            InfoType::PtrPivot => "Host found via PTR",
            InfoType::WildcardSuppressed => "Wildcard match suppressed",
            InfoType::DuplicateSkipped => "Duplicate lookup skipped",
            InfoType::OutOfScope => "Pivot out of scope",
            InfoType::PivotDepthLimit => "Pivot depth limit reached",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str() {
        assert_eq!(
            ErrorType::DnsRetriesExhausted.as_str(),
            "DNS retries exhausted"
        );
        assert_eq!(
            ErrorType::CertificateSourceError.to_string(),
            "Certificate source error"
        );
    }

    #[test]
    fn test_all_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty(), "{:?}", error_type);
        }
        for info_type in InfoType::iter() {
            assert!(!info_type.as_str().is_empty(), "{:?}", info_type);
        }
    }

    #[test]
    fn test_target_not_resolvable_message() {
        let err = ReconError::TargetNotResolvable("doesnotexist.invalid".to_string());
        assert_eq!(
            err.to_string(),
            "The domain 'doesnotexist.invalid' is not resolvable! Check it for typos!"
        );
    }
}
