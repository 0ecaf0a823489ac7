// Shared test helpers: an in-memory DNS zone and scan configuration.
//
// Each integration test file pulls this in with `mod helpers;`, so not every
// helper is used by every file.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::net::IpAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use dns_footprint::dns::{DnsTransport, LookupOutcome, RecordType, ResolverClient, ResolverConfig};
use dns_footprint::error_handling::ProcessingStats;
use dns_footprint::Config;

/// In-memory DNS data answering like an authoritative server.
///
/// Names without data answer NXDOMAIN, except A queries below a zone that was
/// given a wildcard record.
#[derive(Default)]
pub struct FakeDns {
    forward: Mutex<HashMap<(String, RecordType), LookupOutcome<Vec<String>>>>,
    reverse: Mutex<HashMap<IpAddr, Vec<String>>>,
    wildcard: Mutex<Option<(String, Vec<String>)>>,
    queries: Mutex<Vec<(String, RecordType)>>,
}

impl FakeDns {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, name: &str, record_type: RecordType, outcome: LookupOutcome<Vec<String>>) {
        self.forward
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), outcome);
    }

    pub fn values(&self, name: &str, record_type: RecordType, values: &[&str]) {
        self.record(
            name,
            record_type,
            LookupOutcome::Found(values.iter().map(|v| v.to_string()).collect()),
        );
    }

    pub fn ns(&self, zone: &str) {
        self.values(zone, RecordType::NS, &[&format!("ns1.{zone}.")]);
    }

    pub fn a(&self, name: &str, ips: &[&str]) {
        self.values(name, RecordType::A, ips);
    }

    pub fn txt(&self, name: &str, records: &[&str]) {
        self.values(name, RecordType::TXT, records);
    }

    pub fn ptr(&self, ip: &str, names: &[&str]) {
        self.reverse.lock().unwrap().insert(
            ip.parse().unwrap(),
            names.iter().map(|n| n.to_string()).collect(),
        );
    }

    /// Every A query below `zone` without its own data answers `ips`.
    pub fn wildcard(&self, zone: &str, ips: &[&str]) {
        *self.wildcard.lock().unwrap() =
            Some((zone.to_string(), ips.iter().map(|ip| ip.to_string()).collect()));
    }

    pub fn query_count(&self, name: &str, record_type: RecordType) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, t)| n == name && *t == record_type)
            .count()
    }

    pub fn was_queried(&self, name: &str, record_type: RecordType) -> bool {
        self.query_count(name, record_type) > 0
    }
}

#[async_trait]
impl DnsTransport for FakeDns {
    async fn query(&self, name: &str, record_type: RecordType) -> LookupOutcome<Vec<String>> {
        self.queries
            .lock()
            .unwrap()
            .push((name.to_string(), record_type));

        if let Some(outcome) = self
            .forward
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
        {
            return outcome.clone();
        }
        if record_type == RecordType::A {
            if let Some((zone, ips)) = self.wildcard.lock().unwrap().as_ref() {
                if name.ends_with(&format!(".{zone}")) {
                    return LookupOutcome::Found(ips.clone());
                }
            }
        }
        LookupOutcome::NotFound
    }

    async fn reverse(&self, ip: IpAddr) -> LookupOutcome<Vec<String>> {
        match self.reverse.lock().unwrap().get(&ip) {
            Some(names) => LookupOutcome::Found(names.clone()),
            None => LookupOutcome::NotFound,
        }
    }
}

pub fn resolver_config() -> ResolverConfig {
    ResolverConfig {
        nameservers: vec!["127.0.0.1".parse().unwrap()],
        retry_limit: 5,
        timeout: Duration::from_secs(1),
        retry_delay: Duration::from_millis(1),
    }
}

pub fn client_for(dns: Arc<FakeDns>) -> ResolverClient {
    ResolverClient::new(dns, &resolver_config(), Arc::new(ProcessingStats::new()))
}

/// Writes wordlist labels to a temporary file.
pub fn write_wordlist(words: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for word in words {
        writeln!(file, "{}", word).expect("Failed to write word");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// Offline scan configuration writing below `output_dir`.
pub fn scan_config(target: &str, wordlist: &Path, output_dir: &Path) -> Config {
    Config {
        target: target.to_string(),
        wordlist: Some(wordlist.to_path_buf()),
        output_dir: output_dir.to_path_buf(),
        no_cert_search: true,
        concurrency: 4,
        retry_delay: Duration::from_millis(1),
        ..Default::default()
    }
}
