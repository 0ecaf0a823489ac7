//! Discovery engine.
//!
//! Drives one scan through its stages:
//!
//! 1. `CollectBasicRecords` - NS (fatal if absent), MX, TXT and `_dmarc` TXT
//! 2. `DetectWildcard` - probe a random label, store the wildcard record
//! 3. `ExpandSeeds` - SPF candidates and certificate names
//! 4. `SweepWordlist` - `<word>.<target>` in concurrent batches
//! 5. `Finalize` - hand the accepted records back to the caller
//!
//! Every candidate goes through [`Lookup::lookup_and_maybe_pivot`], which
//! resolves it, filters wildcard noise, stores it and follows its PTR names.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::batch::{BatchScheduler, SweepSummary};
use super::follow::FollowPolicy;
use super::spf::SpfExpander;
use super::store::ResultStore;
use super::wildcard::{detect_wildcard, wildcard_name, WildcardSignature};
use crate::config::{DEFAULT_CONCURRENCY, MAX_PIVOT_DEPTH};
use crate::dns::{
    collect_basic_records, extract_dmarc_record, AddressSet, BasicRecords, HostRecord,
    PtrNames, ResolverClient,
};
use crate::domain::{normalize, subdomain};
use crate::error_handling::{ErrorType, InfoType, ProcessingStats, ReconError};
use crate::seeds::CertificateSource;

/// Scan stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    CollectBasicRecords,
    DetectWildcard,
    ExpandSeeds,
    SweepWordlist,
    Finalize,
}

/// Everything a finished (or interrupted) scan produced.
#[derive(Debug, Clone)]
pub struct EngineOutcome {
    pub records: BasicRecords,
    pub wildcard: Option<WildcardSignature>,
    pub hosts: BTreeMap<String, HostRecord>,
    pub sweep: SweepSummary,
    pub interrupted: bool,
}

struct Pending {
    name: String,
    depth: usize,
    wildcard_filter: bool,
}

/// Lookup machinery shared by every task of a scan.
///
/// Cheap to clone; clones share the store, the statistics and the
/// cancellation token.
#[derive(Clone)]
pub struct Lookup {
    client: ResolverClient,
    store: Arc<ResultStore>,
    policy: Arc<dyn FollowPolicy>,
    wildcard: Option<Arc<WildcardSignature>>,
    stats: Arc<ProcessingStats>,
    cancel: CancellationToken,
}

impl Lookup {
    pub fn new(
        client: ResolverClient,
        store: Arc<ResultStore>,
        policy: Arc<dyn FollowPolicy>,
        wildcard: Option<WildcardSignature>,
        stats: Arc<ProcessingStats>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            store,
            policy,
            wildcard: wildcard.map(Arc::new),
            stats,
            cancel,
        }
    }

    /// Resolves `name`, stores it if it is a real host and follows its PTR
    /// names.
    ///
    /// With `wildcard_filter` set, a name answering exactly like the wildcard
    /// record is dropped. PTR pivots always run with the filter disabled, are
    /// limited to names the follow policy accepts and stop at
    /// [`MAX_PIVOT_DEPTH`] hops. Returns the number of records stored.
    pub async fn lookup_and_maybe_pivot(&self, name: &str, wildcard_filter: bool) -> usize {
        let pending = VecDeque::from([Pending {
            name: normalize(name),
            depth: 0,
            wildcard_filter,
        }]);
        self.drain(pending).await
    }

    /// Follows the PTR names of a record that was stored elsewhere (the
    /// wildcard record).
    pub async fn pivot_from(&self, origin: &str, ptr: PtrNames) -> usize {
        let mut pending = VecDeque::new();
        self.queue_pivots(origin, ptr, 1, &mut pending).await;
        self.drain(pending).await
    }

    async fn drain(&self, mut pending: VecDeque<Pending>) -> usize {
        let mut stored = 0;
        while let Some(next) = pending.pop_front() {
            let Some(ptr) = self.lookup_one(&next).await else {
                continue;
            };
            stored += 1;
            if self.cancel.is_cancelled() {
                continue;
            }
            self.queue_pivots(&next.name, ptr, next.depth + 1, &mut pending)
                .await;
        }
        stored
    }

    /// Resolves and stores one name; returns its PTR names when it was stored.
    ///
    /// A name that is dropped (no address, wildcard noise, retries exhausted)
    /// gives up its claim, so a later candidate for it, in particular a PTR
    /// pivot, resolves it again.
    async fn lookup_one(&self, pending: &Pending) -> Option<PtrNames> {
        let name = pending.name.as_str();
        if name.is_empty() {
            return None;
        }
        if !self.store.try_reserve(name, pending.wildcard_filter).await {
            self.stats.increment_info(InfoType::DuplicateSkipped);
            return None;
        }

        let Some(addresses) = self.resolve_accepted(pending).await else {
            self.store.release(name, pending.wildcard_filter).await;
            return None;
        };

        let ptr = self.client.reverse_addresses(&addresses).await;
        let record = HostRecord {
            ip: addresses,
            ptr: ptr.clone(),
        };
        if !self.store.insert(name, record).await {
            self.stats.increment_info(InfoType::DuplicateSkipped);
            return None;
        }

        self.stats.increment_info(InfoType::HostFound);
        if pending.depth > 0 {
            self.stats.increment_info(InfoType::PtrPivot);
            info!("FOUND: {name} (PTR)");
        } else {
            info!("FOUND: {name}");
        }
        Some(ptr)
    }

    /// Addresses of a name that exists and is not wildcard noise.
    async fn resolve_accepted(&self, pending: &Pending) -> Option<AddressSet> {
        let name = pending.name.as_str();
        let addresses = self.client.resolve_addresses(name).await;
        if !addresses.exists() {
            return None;
        }
        if pending.wildcard_filter
            && self
                .wildcard
                .as_ref()
                .is_some_and(|signature| signature.matches(&addresses))
        {
            self.stats.increment_info(InfoType::WildcardSuppressed);
            debug!("Ignoring {name}: answers like the wildcard record");
            return None;
        }
        Some(addresses)
    }

    async fn queue_pivots(
        &self,
        origin: &str,
        ptr: PtrNames,
        depth: usize,
        pending: &mut VecDeque<Pending>,
    ) {
        for ptr_name in ptr.names() {
            let name = normalize(ptr_name);
            if name.is_empty() || name == origin {
                continue;
            }
            if !self.policy.allow_follow(&name) {
                self.stats.increment_info(InfoType::OutOfScope);
                debug!("Not following PTR {name} of {origin}: out of scope");
                continue;
            }
            if self.store.contains(&name).await {
                continue;
            }
            if depth > MAX_PIVOT_DEPTH {
                self.stats.increment_info(InfoType::PivotDepthLimit);
                debug!("Not following PTR {name} of {origin}: pivot depth limit");
                continue;
            }
            pending.push_back(Pending {
                name,
                depth,
                wildcard_filter: false,
            });
        }
    }
}

/// Runs the scan stages for one target.
pub struct DiscoveryEngine {
    target: String,
    client: ResolverClient,
    store: Arc<ResultStore>,
    policy: Arc<dyn FollowPolicy>,
    seeds: Option<Arc<dyn CertificateSource>>,
    concurrency: usize,
    stats: Arc<ProcessingStats>,
    cancel: CancellationToken,
}

impl DiscoveryEngine {
    /// `target` must already be normalized.
    pub fn new(
        target: impl Into<String>,
        client: ResolverClient,
        policy: Arc<dyn FollowPolicy>,
        stats: Arc<ProcessingStats>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            target: target.into(),
            client,
            store: Arc::new(ResultStore::new()),
            policy,
            seeds: None,
            concurrency: DEFAULT_CONCURRENCY,
            stats,
            cancel,
        }
    }

    pub fn with_seeds(mut self, seeds: Option<Arc<dyn CertificateSource>>) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Runs every stage and returns the accepted records.
    ///
    /// An interrupt skips the remaining stages but still returns what was
    /// found so far.
    ///
    /// # Errors
    ///
    /// Returns `ReconError::TargetNotResolvable` when the target has no NS
    /// records; nothing else aborts a scan.
    pub async fn run(&self, words: Vec<String>) -> Result<EngineOutcome, ReconError> {
        self.enter(EngineState::CollectBasicRecords);
        let records = collect_basic_records(&self.client, &self.target, &self.stats).await?;
        info!("NS for {}: {}", self.target, records.ns.join(", "));
        if let Some(policy) = records.dmarc.as_deref().and_then(extract_dmarc_record) {
            info!("DMARC policy: {policy}");
        }

        self.enter(EngineState::DetectWildcard);
        let wildcard = detect_wildcard(&self.client, &self.target).await;
        let lookup = Lookup::new(
            self.client.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.policy),
            wildcard.clone(),
            Arc::clone(&self.stats),
            self.cancel.clone(),
        );
        if let Some(signature) = &wildcard {
            self.store_wildcard(&lookup, signature).await;
        }

        let mut sweep = SweepSummary::default();
        if !self.cancel.is_cancelled() {
            self.enter(EngineState::ExpandSeeds);
            let candidates = self.seed_candidates(&records).await;
            self.scheduler()
                .run(candidates, |name: String| {
                    let lookup = lookup.clone();
                    async move {
                        lookup.lookup_and_maybe_pivot(&name, true).await;
                    }
                })
                .await;
        }

        if !self.cancel.is_cancelled() {
            self.enter(EngineState::SweepWordlist);
            let target = self.target.clone();
            sweep = self
                .scheduler()
                .run(words, |word: String| {
                    let lookup = lookup.clone();
                    let name = subdomain(&word, &target);
                    async move {
                        lookup.lookup_and_maybe_pivot(&name, true).await;
                    }
                })
                .await;
        }

        self.enter(EngineState::Finalize);
        let interrupted = self.cancel.is_cancelled();
        if interrupted {
            warn!("SCAN INTERRUPTED: keeping {} records found so far", self.store.len().await);
        }
        Ok(EngineOutcome {
            records,
            wildcard,
            hosts: self.store.snapshot().await,
            sweep,
            interrupted,
        })
    }

    fn enter(&self, state: EngineState) {
        debug!("{}: entering {state:?}", self.target);
    }

    fn scheduler(&self) -> BatchScheduler {
        BatchScheduler::new(self.concurrency, self.cancel.clone(), Arc::clone(&self.stats))
    }

    /// Stores the wildcard answer under `*.<target>` and follows its PTR names.
    async fn store_wildcard(&self, lookup: &Lookup, signature: &WildcardSignature) {
        let name = wildcard_name(&self.target);
        let ptr = self.client.reverse_addresses(signature.addresses()).await;
        let record = HostRecord {
            ip: signature.addresses().clone(),
            ptr: ptr.clone(),
        };
        if self.store.insert(&name, record).await {
            self.stats.increment_info(InfoType::HostFound);
        }
        warn!("We will ignore all records that match the wildcard. Some generic ones might be missing!");
        lookup.pivot_from(&name, ptr).await;
    }

    /// SPF names plus certificate names; a failing certificate source is
    /// logged and skipped.
    async fn seed_candidates(&self, records: &BasicRecords) -> Vec<String> {
        let mut candidates = SpfExpander::new(&self.client, self.policy.as_ref())
            .expand(records.txt_records())
            .await;
        debug!("SPF yielded {} candidates", candidates.len());

        if let Some(seeds) = &self.seeds {
            match seeds.names(&self.target).await {
                Ok(names) => candidates.extend(names),
                Err(e) => {
                    self.stats.increment_error(ErrorType::CertificateSourceError);
                    warn!("{e:#}");
                }
            }
        }
        candidates
    }
}
