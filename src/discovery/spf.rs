//! SPF expansion.
//!
//! Turns the SPF record of the target into candidate host names: `a:` values
//! are taken verbatim, `ip4:`/`ip6:` addresses are reverse-resolved, and
//! `include:`/`redirect:` domains are fetched and expanded in turn when the
//! follow policy allows it.

use std::collections::HashSet;

use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};

use super::follow::FollowPolicy;
use crate::config::MAX_SPF_DEPTH;
use crate::dns::{extract_spf_record, RecordType, ResolverClient};
use crate::domain::normalize;

/// One `key:value` term of an SPF record that yields names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpfMechanism {
    Ip4(String),
    Ip6(String),
    A(String),
    Include(String),
    Redirect(String),
}

/// Parses the name-bearing mechanisms of an SPF record.
///
/// Tokens are split on whitespace; only `key:value` tokens are considered and
/// a leading qualifier (`+`, `-`, `~`, `?`) is ignored. Terms without a value
/// (`mx`, `-all`) and unknown keys are skipped.
pub fn parse_spf_mechanisms(record: &str) -> Vec<SpfMechanism> {
    record
        .split_whitespace()
        .filter_map(|token| {
            let (key, value) = token.split_once(':')?;
            let key = key.trim_start_matches(['+', '-', '~', '?']);
            let value = value.to_string();
            match key.to_ascii_lowercase().as_str() {
                "ip4" => Some(SpfMechanism::Ip4(value)),
                "ip6" => Some(SpfMechanism::Ip6(value)),
                "a" => Some(SpfMechanism::A(value)),
                "include" => Some(SpfMechanism::Include(value)),
                "redirect" => Some(SpfMechanism::Redirect(value)),
                _ => None,
            }
        })
        .collect()
}

/// Expands SPF records into candidate names.
pub struct SpfExpander<'a> {
    client: &'a ResolverClient,
    policy: &'a dyn FollowPolicy,
}

impl<'a> SpfExpander<'a> {
    pub fn new(client: &'a ResolverClient, policy: &'a dyn FollowPolicy) -> Self {
        Self { client, policy }
    }

    /// Candidate names from the first `v=spf1` entry of `txt_records`.
    ///
    /// Returns an empty list when there is no SPF record.
    pub async fn expand(&self, txt_records: &[String]) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut candidates = Vec::new();
        self.expand_records(txt_records.to_vec(), 0, &mut visited, &mut candidates)
            .await;
        candidates
    }

    fn expand_records<'b>(
        &'b self,
        txt_records: Vec<String>,
        depth: usize,
        visited: &'b mut HashSet<String>,
        candidates: &'b mut Vec<String>,
    ) -> BoxFuture<'b, ()> {
        async move {
            let Some(spf) = extract_spf_record(&txt_records) else {
                return;
            };
            debug!("Expanding SPF record at depth {depth}: {spf}");

            for mechanism in parse_spf_mechanisms(spf) {
                match mechanism {
                    SpfMechanism::Ip4(address) | SpfMechanism::Ip6(address) => {
                        candidates.extend(self.client.reverse_text(&address).await);
                    }
                    SpfMechanism::A(name) => candidates.push(name),
                    SpfMechanism::Include(domain) | SpfMechanism::Redirect(domain) => {
                        if !self.policy.allow_follow(&domain) {
                            debug!("Not following SPF reference to unrelated domain {domain}");
                            continue;
                        }
                        if !visited.insert(normalize(&domain)) {
                            continue;
                        }
                        if depth >= MAX_SPF_DEPTH {
                            warn!("SPF chain too deep, not following {domain}");
                            continue;
                        }
                        let nested = self
                            .client
                            .resolve(&domain, RecordType::TXT)
                            .await
                            .found()
                            .unwrap_or_default();
                        self.expand_records(nested, depth + 1, visited, candidates)
                            .await;
                    }
                }
            }
        }
        .boxed()
    }
}
