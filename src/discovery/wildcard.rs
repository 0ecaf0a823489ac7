//! Wildcard zone detection.
//!
//! A zone with a `*` record answers for every label. Resolving a random label
//! that cannot exist captures the wildcard's address set; later candidates that
//! resolve to exactly the same set are treated as wildcard noise.

use log::info;
use rand::distr::{Alphanumeric, SampleString};

use crate::config::WILDCARD_PROBE_LABEL_LEN;
use crate::dns::{AddressSet, ResolverClient};

/// Address set answered by the zone's wildcard record.
///
/// Captured once per scan and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardSignature {
    addresses: AddressSet,
}

impl WildcardSignature {
    pub fn new(addresses: AddressSet) -> Self {
        Self { addresses }
    }

    pub fn addresses(&self) -> &AddressSet {
        &self.addresses
    }

    /// True when `addresses` is exactly the wildcard answer (both families, in order).
    pub fn matches(&self, addresses: &AddressSet) -> bool {
        self.addresses == *addresses
    }
}

/// Store key under which the wildcard record is kept.
pub fn wildcard_name(target: &str) -> String {
    format!("*.{target}")
}

/// Random lowercase alphanumeric label used for the probe.
pub fn probe_label() -> String {
    Alphanumeric
        .sample_string(&mut rand::rng(), WILDCARD_PROBE_LABEL_LEN)
        .to_ascii_lowercase()
}

/// Resolves `<random label>.<target>` and returns the signature if anything
/// answered.
pub async fn detect_wildcard(client: &ResolverClient, target: &str) -> Option<WildcardSignature> {
    let probe = format!("{}.{}", probe_label(), target);
    let addresses = client.resolve_addresses(&probe).await;
    if !addresses.exists() {
        return None;
    }

    let shown: Vec<String> = addresses.addresses().map(|ip| ip.to_string()).collect();
    info!("HAS WILDCARD: {} -> {}", wildcard_name(target), shown.join(", "));
    Some(WildcardSignature::new(addresses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_label_shape() {
        let label = probe_label();
        assert_eq!(label.len(), WILDCARD_PROBE_LABEL_LEN);
        assert!(label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(probe_label(), label);
    }

    #[test]
    fn test_wildcard_name() {
        assert_eq!(wildcard_name("example.com"), "*.example.com");
    }

    #[test]
    fn test_signature_requires_exact_match() {
        let signature = WildcardSignature::new(AddressSet {
            ip4: vec!["1.2.3.4".parse().unwrap()],
            ip6: vec![],
        });
        assert!(signature.matches(&AddressSet {
            ip4: vec!["1.2.3.4".parse().unwrap()],
            ip6: vec![],
        }));
        // A superset is a real host, not wildcard noise
        assert!(!signature.matches(&AddressSet {
            ip4: vec!["1.2.3.4".parse().unwrap(), "5.6.7.8".parse().unwrap()],
            ip6: vec![],
        }));
        assert!(!signature.matches(&AddressSet {
            ip4: vec!["1.2.3.4".parse().unwrap()],
            ip6: vec!["2001:db8::1".parse().unwrap()],
        }));
    }
}
