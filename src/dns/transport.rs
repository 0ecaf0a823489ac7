//! Single-attempt DNS transport.
//!
//! [`DnsTransport`] issues exactly one query and classifies the result. Retries
//! live one level up in [`ResolverClient`](super::ResolverClient), so tests can
//! swap in an in-memory transport and script failure sequences.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig as HickoryConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::types::{LookupOutcome, ResolverConfig};
use crate::config::DNS_PORT;

/// One DNS query, one answer.
///
/// Record values are rendered as text:
/// - `A`/`AAAA`: the address
/// - `NS`/`PTR`: the host name as returned (with trailing dot)
/// - `MX`: `<preference> <exchange>`
/// - `TXT`: the character-strings of one record concatenated
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Forward query for `name`.
    async fn query(&self, name: &str, record_type: RecordType) -> LookupOutcome<Vec<String>>;

    /// Reverse (PTR) query for `ip`.
    async fn reverse(&self, ip: IpAddr) -> LookupOutcome<Vec<String>>;
}

/// Production transport backed by `hickory-resolver`.
pub struct HickoryTransport {
    resolver: TokioAsyncResolver,
}

impl HickoryTransport {
    /// Builds a resolver that only talks to the configured nameservers.
    ///
    /// The resolver makes a single attempt per query; retrying is the
    /// client's job.
    pub fn new(config: &ResolverConfig) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(&config.nameservers, DNS_PORT, true);
        let resolver_config = HickoryConfig::from_parts(None, vec![], group);

        let mut opts = ResolverOpts::default();
        opts.timeout = config.timeout;
        opts.attempts = 1;
        // Names are always absolute; never append search domains
        opts.ndots = 0;

        Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
        }
    }
}

#[async_trait]
impl DnsTransport for HickoryTransport {
    async fn query(&self, name: &str, record_type: RecordType) -> LookupOutcome<Vec<String>> {
        let mut fqdn = match Name::from_utf8(name) {
            Ok(fqdn) => fqdn,
            Err(e) => return LookupOutcome::Fatal(format!("invalid name '{name}': {e}")),
        };
        fqdn.set_fqdn(true);

        match self.resolver.lookup(fqdn, record_type).await {
            Ok(lookup) => {
                let values: Vec<String> = lookup
                    .iter()
                    .filter_map(|rdata| render_rdata(rdata, record_type))
                    .collect();
                if values.is_empty() {
                    LookupOutcome::NotFound
                } else {
                    LookupOutcome::Found(values)
                }
            }
            Err(e) => classify_error(&e),
        }
    }

    async fn reverse(&self, ip: IpAddr) -> LookupOutcome<Vec<String>> {
        match self.resolver.reverse_lookup(ip).await {
            Ok(response) => {
                let names: Vec<String> = response.iter().map(|ptr| ptr.to_utf8()).collect();
                if names.is_empty() {
                    LookupOutcome::NotFound
                } else {
                    LookupOutcome::Found(names)
                }
            }
            Err(e) => classify_error(&e),
        }
    }
}

/// Renders one answer record, skipping records of other types (e.g. the
/// CNAMEs that precede the A records of an aliased name).
fn render_rdata(rdata: &RData, record_type: RecordType) -> Option<String> {
    match (rdata, record_type) {
        (RData::A(a), RecordType::A) => Some(a.0.to_string()),
        (RData::AAAA(aaaa), RecordType::AAAA) => Some(aaaa.0.to_string()),
        (RData::NS(ns), RecordType::NS) => Some(ns.to_utf8()),
        (RData::MX(mx), RecordType::MX) => {
            Some(format!("{} {}", mx.preference(), mx.exchange().to_utf8()))
        }
        (RData::TXT(txt), RecordType::TXT) => Some(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        (RData::PTR(ptr), RecordType::PTR) => Some(ptr.to_utf8()),
        _ => None,
    }
}

/// Maps a resolver error onto the outcome taxonomy.
///
/// NXDOMAIN and empty answers are negative; SERVFAIL/REFUSED, timeouts and
/// connection problems are transient; anything else cannot be fixed by asking
/// again.
pub(crate) fn classify_error<T>(error: &ResolveError) -> LookupOutcome<T> {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::ServFail | ResponseCode::Refused => {
                LookupOutcome::Transient(format!("server answered {response_code}"))
            }
            _ => LookupOutcome::NotFound,
        },
        ResolveErrorKind::Timeout => LookupOutcome::Transient("request timed out".to_string()),
        ResolveErrorKind::NoConnections => {
            LookupOutcome::Transient("no nameserver reachable".to_string())
        }
        ResolveErrorKind::Io(_) | ResolveErrorKind::Proto(_) => {
            LookupOutcome::Transient(error.to_string())
        }
        _ => LookupOutcome::Fatal(error.to_string()),
    }
}
