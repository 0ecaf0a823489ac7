//! crt.sh certificate transparency source.

use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;

use super::CertificateSource;
use crate::config::{CERT_SEARCH_MAX_ATTEMPTS, CERT_SEARCH_RETRY_DELAY, CRTSH_URL};
use crate::domain::normalize;

const HOSTNAME_PATTERN: &str = r"^(?:[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9])?\.)+[a-z][a-z0-9-]{0,61}[a-z0-9]$";

/// Helper function to safely compile a regex pattern, panicking with a detailed error message
/// if compilation fails. Used for static regex patterns that are compile-time constants.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static HOSTNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(HOSTNAME_PATTERN, "HOSTNAME_RE"));

/// One row of the crt.sh JSON answer; only the name fields are used.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateEntry {
    /// Newline-separated subject alternative names
    #[serde(default)]
    pub name_value: String,
    #[serde(default)]
    pub common_name: Option<String>,
}

/// Extracts the distinct host names of a crt.sh answer.
///
/// Wildcard prefixes (`*.`) are removed and anything that is not a plain host
/// name (e-mail addresses, IPs, garbage) is dropped.
pub fn certificate_names(entries: &[CertificateEntry]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for entry in entries {
        let candidates = entry
            .name_value
            .lines()
            .chain(entry.common_name.as_deref());
        for candidate in candidates {
            let name = normalize(candidate);
            let name = name.strip_prefix("*.").unwrap_or(name.as_str());
            if HOSTNAME_RE.is_match(name) {
                names.insert(name.to_string());
            }
        }
    }
    names.into_iter().collect()
}

/// Certificate source backed by the crt.sh JSON API.
pub struct CrtShSource {
    client: reqwest::Client,
    base_url: String,
    max_attempts: usize,
    retry_delay: Duration,
}

impl CrtShSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, CRTSH_URL)
    }

    /// Source pointed at another crt.sh-compatible endpoint.
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_attempts: CERT_SEARCH_MAX_ATTEMPTS,
            retry_delay: CERT_SEARCH_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    async fn fetch_entries(&self, target: &str) -> Result<Vec<CertificateEntry>, reqwest::Error> {
        debug!("Querying {} for certificates of {target}", self.base_url);
        self.client
            .get(&self.base_url)
            .query(&[("q", target), ("output", "json")])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CertificateEntry>>()
            .await
    }
}

/// Timeouts, connection failures and 5xx answers are worth another attempt.
fn is_retryable(error: &reqwest::Error) -> bool {
    error.is_timeout()
        || error.is_connect()
        || error.status().is_some_and(|status| status.is_server_error())
}

#[async_trait]
impl CertificateSource for CrtShSource {
    async fn names(&self, target: &str) -> anyhow::Result<Vec<String>> {
        let strategy =
            FixedInterval::new(self.retry_delay).take(self.max_attempts.saturating_sub(1));

        let entries = RetryIf::spawn(
            strategy,
            || self.fetch_entries(target),
            |e: &reqwest::Error| {
                debug!("Certificate search for {target} failed, retrying: {e}");
                is_retryable(e)
            },
        )
        .await
        .with_context(|| format!("Certificate information for {target} could not be downloaded"))?;

        let names = certificate_names(&entries);
        info!(
            "Pulled {} names from {} certificates for {target}",
            names.len(),
            entries.len()
        );
        Ok(names)
    }
}
