//! DNS module tests.

use super::*;
use crate::error_handling::{ErrorType, ProcessingStats, ReconError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that replays scripted outcomes per (name, type) and counts attempts.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<HashMap<(String, RecordType), VecDeque<LookupOutcome<Vec<String>>>>>,
    attempts: Mutex<HashMap<(String, RecordType), usize>>,
}

impl ScriptedTransport {
    fn push(&self, name: &str, record_type: RecordType, outcome: LookupOutcome<Vec<String>>) {
        self.script
            .lock()
            .unwrap()
            .entry((name.to_string(), record_type))
            .or_default()
            .push_back(outcome);
    }

    fn attempts(&self, name: &str, record_type: RecordType) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .copied()
            .unwrap_or(0)
    }

    fn next(&self, key: (String, RecordType)) -> LookupOutcome<Vec<String>> {
        *self.attempts.lock().unwrap().entry(key.clone()).or_default() += 1;
        self.script
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(LookupOutcome::NotFound)
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn query(&self, name: &str, record_type: RecordType) -> LookupOutcome<Vec<String>> {
        self.next((name.to_string(), record_type))
    }

    async fn reverse(&self, ip: IpAddr) -> LookupOutcome<Vec<String>> {
        self.next((ip.to_string(), RecordType::PTR))
    }
}

fn test_config() -> ResolverConfig {
    ResolverConfig {
        nameservers: vec!["127.0.0.1".parse().unwrap()],
        retry_limit: 5,
        timeout: Duration::from_secs(1),
        retry_delay: Duration::from_millis(1),
    }
}

fn client_with(transport: Arc<ScriptedTransport>) -> (ResolverClient, Arc<ProcessingStats>) {
    let stats = Arc::new(ProcessingStats::new());
    let client = ResolverClient::new(transport, &test_config(), Arc::clone(&stats));
    (client, stats)
}

fn transient() -> LookupOutcome<Vec<String>> {
    LookupOutcome::Transient("request timed out".to_string())
}

#[tokio::test]
async fn test_four_transient_failures_then_success() {
    let transport = Arc::new(ScriptedTransport::default());
    for _ in 0..4 {
        transport.push("www.example.com", RecordType::A, transient());
    }
    transport.push(
        "www.example.com",
        RecordType::A,
        LookupOutcome::Found(vec!["192.0.2.10".to_string()]),
    );
    let (client, stats) = client_with(Arc::clone(&transport));

    let outcome = client.resolve("www.example.com", RecordType::A).await;

    assert_eq!(
        outcome,
        LookupOutcome::Found(vec!["192.0.2.10".to_string()])
    );
    assert_eq!(transport.attempts("www.example.com", RecordType::A), 5);
    assert_eq!(stats.get_error_count(ErrorType::DnsTransientRetry), 4);
    assert_eq!(stats.get_error_count(ErrorType::DnsRetriesExhausted), 0);
}

#[tokio::test]
async fn test_six_transient_failures_become_not_found() {
    let transport = Arc::new(ScriptedTransport::default());
    for _ in 0..6 {
        transport.push("www.example.com", RecordType::A, transient());
    }
    // A seventh answer must never be requested
    transport.push(
        "www.example.com",
        RecordType::A,
        LookupOutcome::Found(vec!["192.0.2.10".to_string()]),
    );
    let (client, stats) = client_with(Arc::clone(&transport));

    let outcome = client.resolve("www.example.com", RecordType::A).await;

    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(transport.attempts("www.example.com", RecordType::A), 6);
    assert_eq!(stats.get_error_count(ErrorType::DnsRetriesExhausted), 1);
}

#[tokio::test]
async fn test_negative_answer_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::default());
    let (client, _stats) = client_with(Arc::clone(&transport));

    let outcome = client.resolve("missing.example.com", RecordType::A).await;

    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(transport.attempts("missing.example.com", RecordType::A), 1);
}

#[tokio::test]
async fn test_fatal_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.push(
        "bad name.example.com",
        RecordType::A,
        LookupOutcome::Fatal("invalid name".to_string()),
    );
    let (client, _stats) = client_with(Arc::clone(&transport));

    let outcome = client.resolve("bad name.example.com", RecordType::A).await;

    assert!(matches!(outcome, LookupOutcome::Fatal(_)));
    assert_eq!(transport.attempts("bad name.example.com", RecordType::A), 1);
}

#[tokio::test]
async fn test_resolve_addresses_merges_families() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.push(
        "mail.example.com",
        RecordType::A,
        LookupOutcome::Found(vec!["5.6.7.8".to_string()]),
    );
    transport.push(
        "mail.example.com",
        RecordType::AAAA,
        LookupOutcome::Found(vec!["2001:db8::25".to_string()]),
    );
    let (client, _stats) = client_with(transport);

    let addresses = client.resolve_addresses("mail.example.com").await;

    assert!(addresses.exists());
    assert_eq!(addresses.ip4, vec!["5.6.7.8".parse::<std::net::Ipv4Addr>().unwrap()]);
    assert_eq!(addresses.ip6, vec!["2001:db8::25".parse::<std::net::Ipv6Addr>().unwrap()]);
    assert_eq!(addresses.addresses().count(), 2);
}

#[tokio::test]
async fn test_resolve_addresses_absent_name() {
    let transport = Arc::new(ScriptedTransport::default());
    let (client, _stats) = client_with(transport);

    let addresses = client.resolve_addresses("nothing.example.com").await;

    assert!(!addresses.exists());
    assert_eq!(addresses, AddressSet::default());
}

#[tokio::test]
async fn test_reverse_addresses_split_by_family() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.push(
        "5.6.7.8",
        RecordType::PTR,
        LookupOutcome::Found(vec!["mail.example.com.".to_string()]),
    );
    let (client, _stats) = client_with(transport);
    let addresses = AddressSet {
        ip4: vec!["5.6.7.8".parse().unwrap()],
        ip6: vec!["2001:db8::1".parse().unwrap()],
    };

    let ptr = client.reverse_addresses(&addresses).await;

    assert_eq!(ptr.ip4, vec!["mail.example.com.".to_string()]);
    assert!(ptr.ip6.is_empty());
    assert_eq!(ptr.names().collect::<Vec<_>>(), vec!["mail.example.com."]);
}

#[tokio::test]
async fn test_reverse_text_skips_malformed_address() {
    let transport = Arc::new(ScriptedTransport::default());
    let (client, stats) = client_with(Arc::clone(&transport));

    let names = client.reverse_text("192.0.2.0/24").await;

    assert!(names.is_empty());
    assert_eq!(stats.get_error_count(ErrorType::DnsMalformedInput), 1);
    assert_eq!(transport.attempts("192.0.2.0", RecordType::PTR), 0);
}

#[tokio::test]
async fn test_collect_basic_records() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.push(
        "example.com",
        RecordType::NS,
        LookupOutcome::Found(vec!["ns1.example.com.".to_string()]),
    );
    transport.push(
        "example.com",
        RecordType::MX,
        LookupOutcome::Found(vec!["10 mx.example.com.".to_string()]),
    );
    transport.push(
        "_dmarc.example.com",
        RecordType::TXT,
        LookupOutcome::Found(vec!["v=DMARC1; p=reject".to_string()]),
    );
    let (client, stats) = client_with(transport);

    let records = collect_basic_records(&client, "example.com", &stats)
        .await
        .unwrap();

    assert_eq!(records.ns, vec!["ns1.example.com.".to_string()]);
    assert_eq!(records.mx, Some(vec!["10 mx.example.com.".to_string()]));
    assert_eq!(records.txt, None);
    assert!(records.txt_records().is_empty());
    assert_eq!(
        extract_dmarc_record(records.dmarc.as_deref().unwrap()),
        Some("v=DMARC1; p=reject")
    );
}

#[tokio::test]
async fn test_collect_basic_records_without_ns_aborts() {
    let transport = Arc::new(ScriptedTransport::default());
    let (client, stats) = client_with(transport);

    let result = collect_basic_records(&client, "doesnotexist.invalid", &stats).await;

    assert!(matches!(
        result,
        Err(ReconError::TargetNotResolvable(ref domain)) if domain == "doesnotexist.invalid"
    ));
}

#[test]
fn test_basic_records_serialize_with_upper_case_keys() {
    let records = BasicRecords {
        ns: vec!["ns1.example.com.".to_string()],
        mx: None,
        txt: Some(vec!["v=spf1 -all".to_string()]),
        dmarc: None,
    };
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json["NS"][0], "ns1.example.com.");
    assert_eq!(json["TXT"][0], "v=spf1 -all");
    assert!(json.get("MX").is_none());
    assert!(json.get("DMARC").is_none());
}

#[test]
fn test_extract_spf_record() {
    let txt = vec![
        "google-site-verification=abc".to_string(),
        "v=spf1 include:_spf.example.com -all".to_string(),
    ];
    assert_eq!(
        extract_spf_record(&txt),
        Some("v=spf1 include:_spf.example.com -all")
    );
    assert_eq!(extract_spf_record(&txt[..1]), None);
    assert_eq!(extract_spf_record(&[]), None);
}

#[test]
fn test_lookup_outcome_helpers() {
    let found: LookupOutcome<Vec<String>> = LookupOutcome::Found(vec!["a".to_string()]);
    assert_eq!(found.found(), Some(vec!["a".to_string()]));
    assert_eq!(transient().found(), None);
    assert_eq!(LookupOutcome::<Vec<String>>::NotFound.found(), None);
}

#[tokio::test]
async fn test_hickory_transport_builds_with_custom_nameservers() {
    // Construction must not touch the network or the system resolv.conf
    let _transport = HickoryTransport::new(&test_config());
}
