//! DNS transport initialization.

use std::sync::Arc;

use log::debug;

use crate::dns::{DnsTransport, HickoryTransport, ResolverConfig};
use crate::error_handling::InitializationError;

/// Initializes the DNS transport for a scan.
///
/// Queries go only to the configured nameservers, never to the system
/// resolver, with the configured per-query timeout.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if no nameserver is
/// configured.
pub fn init_transport(config: &ResolverConfig) -> Result<Arc<dyn DnsTransport>, InitializationError> {
    if config.nameservers.is_empty() {
        return Err(InitializationError::DnsResolverError(
            "at least one nameserver is required".to_string(),
        ));
    }
    debug!(
        "Using nameservers {:?} (timeout {:?}, {} retries)",
        config.nameservers, config.timeout, config.retry_limit
    );
    Ok(Arc::new(HickoryTransport::new(config)))
}
