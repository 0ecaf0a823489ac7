//! Retrying resolver client.
//!
//! Wraps a [`DnsTransport`] with the retry policy: transient failures are
//! retried `retry_limit` times with a fixed pause, and a query that never
//! succeeds is treated as "not found". Negative answers are never retried.

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::proto::rr::RecordType;
use log::debug;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use super::transport::DnsTransport;
use super::types::{AddressSet, LookupOutcome, PtrNames, ResolverConfig};
use crate::error_handling::{ErrorType, ProcessingStats};

/// DNS client used by every discovery stage.
///
/// Cheap to clone; all clones share the transport and statistics.
#[derive(Clone)]
pub struct ResolverClient {
    transport: Arc<dyn DnsTransport>,
    retry_limit: usize,
    retry_delay: Duration,
    stats: Arc<ProcessingStats>,
}

impl ResolverClient {
    pub fn new(
        transport: Arc<dyn DnsTransport>,
        config: &ResolverConfig,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            transport,
            retry_limit: config.retry_limit,
            retry_delay: config.retry_delay,
            stats,
        }
    }

    /// Forward query with retries.
    ///
    /// Returns `Found`, `NotFound` or `Fatal`; transient failures are either
    /// retried away or collapsed into `NotFound` once the retries run out.
    pub async fn resolve(&self, name: &str, record_type: RecordType) -> LookupOutcome<Vec<String>> {
        let transport = &self.transport;
        self.with_retry(name, || transport.query(name, record_type))
            .await
    }

    /// Reverse query with retries.
    pub async fn resolve_reverse(&self, ip: IpAddr) -> LookupOutcome<Vec<String>> {
        let transport = &self.transport;
        let label = ip.to_string();
        self.with_retry(&label, || transport.reverse(ip)).await
    }

    /// Looks up A and AAAA records for `name`.
    ///
    /// A family with no records (or a failed lookup) contributes nothing; the
    /// name exists when either family is non-empty.
    pub async fn resolve_addresses(&self, name: &str) -> AddressSet {
        let (v4, v6) = futures::join!(
            self.values_or_empty(name, RecordType::A),
            self.values_or_empty(name, RecordType::AAAA)
        );
        AddressSet {
            ip4: v4
                .iter()
                .filter_map(|value| value.parse::<Ipv4Addr>().ok())
                .collect(),
            ip6: v6
                .iter()
                .filter_map(|value| value.parse::<Ipv6Addr>().ok())
                .collect(),
        }
    }

    /// PTR names for every address of `addresses`, split by family.
    pub async fn reverse_addresses(&self, addresses: &AddressSet) -> PtrNames {
        let mut ptr = PtrNames::default();
        for ip in &addresses.ip4 {
            ptr.ip4.extend(self.reverse_names(IpAddr::V4(*ip)).await);
        }
        for ip in &addresses.ip6 {
            ptr.ip6.extend(self.reverse_names(IpAddr::V6(*ip)).await);
        }
        ptr
    }

    /// PTR names for an address given as text.
    ///
    /// Anything that does not parse as a single address (for example an SPF
    /// `ip4:` network like `192.0.2.0/24`) yields no names.
    pub async fn reverse_text(&self, address: &str) -> Vec<String> {
        match address.trim().parse::<IpAddr>() {
            Ok(ip) => self.reverse_names(ip).await,
            Err(_) => {
                self.stats.increment_error(ErrorType::DnsMalformedInput);
                debug!("Skipping reverse lookup of malformed address '{address}'");
                Vec::new()
            }
        }
    }

    async fn reverse_names(&self, ip: IpAddr) -> Vec<String> {
        match self.resolve_reverse(ip).await {
            LookupOutcome::Found(names) => names,
            LookupOutcome::Fatal(reason) => {
                self.stats.increment_error(ErrorType::DnsMalformedInput);
                debug!("Reverse lookup of {ip} failed: {reason}");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    async fn values_or_empty(&self, name: &str, record_type: RecordType) -> Vec<String> {
        match self.resolve(name, record_type).await {
            LookupOutcome::Found(values) => values,
            LookupOutcome::Fatal(reason) => {
                self.stats.increment_error(ErrorType::DnsMalformedInput);
                debug!("{record_type} lookup of '{name}' failed: {reason}");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    async fn with_retry<F, Fut>(&self, label: &str, mut attempt: F) -> LookupOutcome<Vec<String>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = LookupOutcome<Vec<String>>>,
    {
        let strategy = FixedInterval::new(self.retry_delay).take(self.retry_limit);
        let stats = &self.stats;

        let result = Retry::spawn(strategy, || {
            let query = attempt();
            async move {
                match query.await {
                    LookupOutcome::Transient(reason) => {
                        stats.increment_error(ErrorType::DnsTransientRetry);
                        debug!("Transient DNS failure for '{label}': {reason}");
                        Err(reason)
                    }
                    outcome => Ok(outcome),
                }
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            // Not remembered as absent; a later candidate for the name queries again
            Err(reason) => {
                self.stats.increment_error(ErrorType::DnsRetriesExhausted);
                debug!(
                    "Giving up on '{label}' after {} attempts: {reason}",
                    self.retry_limit + 1
                );
                LookupOutcome::NotFound
            }
        }
    }
}
