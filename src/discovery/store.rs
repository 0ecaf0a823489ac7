//! Shared result store.
//!
//! One coarse async mutex guards both the accepted records and the set of
//! lookups currently in flight. Lookup tasks only hold the lock for the map
//! operation itself, never across DNS I/O.
//!
//! A claim is held while a lookup runs and dropped when the lookup ends
//! without storing a record (no answer, wildcard noise, retries exhausted).
//! Only stored records make a name permanently known, so a later candidate
//! for a discarded name is resolved again. Claims are kept per filter mode: a
//! PTR pivot (filter off) is never blocked by a filtered lookup of the same
//! name that may still reject it as wildcard noise.

use std::collections::{BTreeMap, HashSet};

use tokio::sync::Mutex;

use crate::dns::HostRecord;

#[derive(Default)]
struct StoreState {
    records: BTreeMap<String, HostRecord>,
    in_flight: HashSet<(String, bool)>,
}

/// Accepted host records keyed by normalized name.
#[derive(Default)]
pub struct ResultStore {
    state: Mutex<StoreState>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name` for a lookup with the given wildcard filter mode.
    ///
    /// Returns `false` if the name is already stored or another lookup with
    /// the same mode holds a claim, in which case the caller must not resolve
    /// it again.
    pub async fn try_reserve(&self, name: &str, wildcard_filter: bool) -> bool {
        let mut state = self.state.lock().await;
        if state.records.contains_key(name) {
            return false;
        }
        state.in_flight.insert((name.to_string(), wildcard_filter))
    }

    /// Drops a claim taken with [`try_reserve`](Self::try_reserve).
    pub async fn release(&self, name: &str, wildcard_filter: bool) {
        self.state
            .lock()
            .await
            .in_flight
            .remove(&(name.to_string(), wildcard_filter));
    }

    /// Stores a record. The first write for a name wins; returns whether this
    /// call stored it. Claims on the name are dropped either way.
    pub async fn insert(&self, name: &str, record: HostRecord) -> bool {
        let mut state = self.state.lock().await;
        state.in_flight.retain(|(claimed, _)| claimed != name);
        if state.records.contains_key(name) {
            return false;
        }
        state.records.insert(name.to_string(), record);
        true
    }

    /// Whether a record is stored under `name`.
    pub async fn contains(&self, name: &str) -> bool {
        self.state.lock().await.records.contains_key(name)
    }

    pub async fn get(&self, name: &str) -> Option<HostRecord> {
        self.state.lock().await.records.get(name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Copy of all accepted records, sorted by name.
    pub async fn snapshot(&self) -> BTreeMap<String, HostRecord> {
        self.state.lock().await.records.clone()
    }
}
