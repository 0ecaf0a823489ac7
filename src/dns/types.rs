//! DNS data types shared by the resolver client and the discovery engine.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of a DNS query.
///
/// Negative answers and transport failures are values, not errors: callers
/// match on the variant to decide whether to retry, skip or abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    /// The query produced at least one record
    Found(T),
    /// The name or record does not exist (NXDOMAIN / no data)
    NotFound,
    /// Timeout, unreachable nameserver or server failure; worth retrying
    Transient(String),
    /// The query could not be issued (malformed name or address)
    Fatal(String),
}

impl<T> LookupOutcome<T> {
    /// Returns the found value, treating every other outcome as absent.
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Resolver settings shared by every component that issues DNS queries.
///
/// Built once from the [`Config`](crate::Config) and passed into constructors;
/// there is no process-wide resolver state.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Nameservers queried over UDP port 53
    pub nameservers: Vec<IpAddr>,
    /// Retries after a transient failure (attempts = `retry_limit + 1`)
    pub retry_limit: usize,
    /// Per-query timeout
    pub timeout: Duration,
    /// Pause between retries
    pub retry_delay: Duration,
}

/// IPv4 and IPv6 addresses a name resolved to, in answer order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet {
    pub ip4: Vec<Ipv4Addr>,
    pub ip6: Vec<Ipv6Addr>,
}

impl AddressSet {
    /// A name "exists" when it has at least one address of either family.
    pub fn exists(&self) -> bool {
        !self.ip4.is_empty() || !self.ip6.is_empty()
    }

    /// All addresses, IPv4 first.
    pub fn addresses(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ip4
            .iter()
            .map(|ip| IpAddr::V4(*ip))
            .chain(self.ip6.iter().map(|ip| IpAddr::V6(*ip)))
    }
}

/// PTR names found for the addresses of an [`AddressSet`], split by family.
///
/// Names are kept exactly as the resolver returned them (usually with the
/// trailing root dot).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtrNames {
    pub ip4: Vec<String>,
    pub ip6: Vec<String>,
}

impl PtrNames {
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.ip4
            .iter()
            .chain(self.ip6.iter())
            .map(String::as_str)
    }
}

/// Everything recorded for one accepted name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub ip: AddressSet,
    pub ptr: PtrNames,
}
