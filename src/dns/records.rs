//! Zone-level record queries (NS, MX, TXT, DMARC).
//!
//! These run once per scan against the target itself. A missing NS set means the
//! target does not exist, which is the only condition that aborts a scan; the
//! other record types are optional.

use hickory_resolver::proto::rr::RecordType;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::client::ResolverClient;
use super::types::LookupOutcome;
use crate::error_handling::{ErrorType, ProcessingStats, ReconError};

/// Basic records of the scan target, persisted under `records` in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicRecords {
    #[serde(rename = "NS")]
    pub ns: Vec<String>,
    #[serde(rename = "MX", skip_serializing_if = "Option::is_none", default)]
    pub mx: Option<Vec<String>>,
    #[serde(rename = "TXT", skip_serializing_if = "Option::is_none", default)]
    pub txt: Option<Vec<String>>,
    #[serde(rename = "DMARC", skip_serializing_if = "Option::is_none", default)]
    pub dmarc: Option<Vec<String>>,
}

impl BasicRecords {
    /// TXT strings of the target, empty when it has none.
    pub fn txt_records(&self) -> &[String] {
        self.txt.as_deref().unwrap_or(&[])
    }
}

/// Queries NS records for the target.
///
/// # Errors
///
/// Returns `ReconError::TargetNotResolvable` when the target has no NS records,
/// including when every retry failed.
pub async fn lookup_ns_records(
    client: &ResolverClient,
    domain: &str,
) -> Result<Vec<String>, ReconError> {
    match client.resolve(domain, RecordType::NS).await {
        LookupOutcome::Found(nameservers) => Ok(nameservers),
        LookupOutcome::Fatal(reason) => {
            debug!("NS lookup for {domain} failed: {reason}");
            Err(ReconError::TargetNotResolvable(domain.to_string()))
        }
        _ => Err(ReconError::TargetNotResolvable(domain.to_string())),
    }
}

/// Queries an optional record set, returning `None` when it is absent.
pub async fn lookup_optional_records(
    client: &ResolverClient,
    domain: &str,
    record_type: RecordType,
    stats: &ProcessingStats,
) -> Option<Vec<String>> {
    match client.resolve(domain, record_type).await {
        LookupOutcome::Found(values) => Some(values),
        LookupOutcome::Fatal(reason) => {
            stats.increment_error(ErrorType::DnsBasicRecordError);
            warn!("Failed to lookup {record_type} records for {domain}: {reason}");
            None
        }
        _ => None,
    }
}

/// Collects NS, MX, TXT and the `_dmarc` TXT of the target.
///
/// # Errors
///
/// Propagates the NS failure; every other lookup degrades to `None`.
pub async fn collect_basic_records(
    client: &ResolverClient,
    target: &str,
    stats: &ProcessingStats,
) -> Result<BasicRecords, ReconError> {
    let ns = lookup_ns_records(client, target).await?;
    let mx = lookup_optional_records(client, target, RecordType::MX, stats).await;
    let txt = lookup_optional_records(client, target, RecordType::TXT, stats).await;
    let dmarc_name = format!("_dmarc.{target}");
    let dmarc = lookup_optional_records(client, &dmarc_name, RecordType::TXT, stats).await;

    Ok(BasicRecords { ns, mx, txt, dmarc })
}
