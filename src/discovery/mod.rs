//! Recursive subdomain discovery.
//!
//! This module implements the scan itself:
//! - Follow policy deciding which discovered names are chased (`follow`)
//! - Mutex-guarded result store with lookup reservations (`store`)
//! - Wildcard zone detection (`wildcard`)
//! - SPF mechanism expansion (`spf`)
//! - Batched wordlist sweep (`batch`)
//! - The staged engine tying them together (`engine`)

mod batch;
mod engine;
mod follow;
mod spf;
mod store;
mod wildcard;
mod wordlist;

// Re-export public API
pub use batch::{BatchScheduler, SweepSummary};
pub use engine::{DiscoveryEngine, EngineOutcome, EngineState, Lookup};
pub use follow::{FollowPolicy, FollowScope, ScopeMode};
pub use spf::{parse_spf_mechanisms, SpfExpander, SpfMechanism};
pub use store::ResultStore;
pub use wildcard::{detect_wildcard, probe_label, wildcard_name, WildcardSignature};
pub use wordlist::{load_wordlist, parse_wordlist};
