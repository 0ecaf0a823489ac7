//! DNS resolution and record querying.
//!
//! This module provides async DNS operations on top of `hickory-resolver`:
//! - Single-attempt transport with outcome classification (`DnsTransport`)
//! - Retrying client for forward and reverse lookups (`ResolverClient`)
//! - Zone-level record collection (NS, MX, TXT, DMARC)
//! - SPF/DMARC extraction from TXT records
//!
//! Nameservers, timeout and retry budget come from a [`ResolverConfig`] value;
//! nothing here reads global state.

mod client;
mod extract;
mod records;
mod transport;
mod types;

// Re-export public API
pub use client::ResolverClient;
pub use extract::{extract_dmarc_record, extract_spf_record};
pub use records::{
    collect_basic_records, lookup_ns_records, lookup_optional_records, BasicRecords,
};
pub use transport::{DnsTransport, HickoryTransport};
pub use types::{AddressSet, HostRecord, LookupOutcome, PtrNames, ResolverConfig};

// Re-exported so callers and tests don't need a direct hickory import
pub use hickory_resolver::proto::rr::RecordType;

#[cfg(test)]
mod tests;
