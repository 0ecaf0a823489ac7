//! Seed name sources.
//!
//! Seeds are candidate names found outside DNS. They are resolved through the
//! same lookup path as every other candidate, so a source only has to produce
//! names. The only shipped source queries certificate transparency logs.

mod crtsh;

use async_trait::async_trait;

pub use crtsh::{certificate_names, CertificateEntry, CrtShSource};

/// Source of host names that appeared in certificates issued for a domain.
#[async_trait]
pub trait CertificateSource: Send + Sync {
    /// Names (without wildcard prefix, lowercased, deduplicated) for `target`.
    ///
    /// # Errors
    ///
    /// Returns an error when the source could not be reached or answered with
    /// something unusable; callers log it and continue without seeds.
    async fn names(&self, target: &str) -> anyhow::Result<Vec<String>>;
}
