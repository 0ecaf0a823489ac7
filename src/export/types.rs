//! Output document types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dns::{BasicRecords, HostRecord};

/// Links to public search services pre-filled for the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLinks {
    pub shodan_url: String,
    pub shodan_domain_url: String,
    pub censys_url: String,
    pub google_url: String,
    pub cert_search_url: String,
    pub dnsdumpster_url: String,
}

impl SearchLinks {
    pub fn for_target(target: &str) -> Self {
        Self {
            shodan_url: format!("https://www.shodan.io/search?query=hostname%3A{target}"),
            shodan_domain_url: format!("https://www.shodan.io/domain/{target}"),
            censys_url: format!(
                "https://search.censys.io/search?resource=hosts&sort=RELEVANCE&per_page=25&virtual_hosts=INCLUDE&q={target}"
            ),
            google_url: format!("https://www.google.com/search?q=site%3A{target}"),
            cert_search_url: format!("https://crt.sh/?q={target}"),
            dnsdumpster_url: format!("https://dnsdumpster.com/?q={target}"),
        }
    }
}

/// The persisted result of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    pub target: String,
    /// RFC 3339 timestamp of when the document was written
    pub generated_at: String,
    /// Whether the zone answers for arbitrary labels
    pub wildcard: bool,
    /// The scan stopped early; `hosts` is partial
    pub interrupted: bool,
    pub records: BasicRecords,
    pub hosts: BTreeMap<String, HostRecord>,
    pub search_links: SearchLinks,
}
