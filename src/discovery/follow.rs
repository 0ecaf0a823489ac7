//! Follow policy: which names are related enough to chase.

use clap::ValueEnum;

use crate::domain::{base_label, is_subdomain_of, normalize};

/// Decides whether a name discovered through SPF or PTR data may be followed.
pub trait FollowPolicy: Send + Sync {
    fn allow_follow(&self, name: &str) -> bool;
}

/// Relatedness predicate used when unrelated names are not followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScopeMode {
    /// The name is the target or a label-aligned subdomain of it
    #[default]
    Suffix,
    /// The name contains the target's base label anywhere (`example` for
    /// `example.com`)
    Substring,
}

/// Follow policy bound to one scan target.
#[derive(Debug, Clone)]
pub struct FollowScope {
    pub base_domain: String,
    pub allow_unrelated: bool,
    pub mode: ScopeMode,
}

impl FollowPolicy for FollowScope {
    fn allow_follow(&self, name: &str) -> bool {
        if self.allow_unrelated {
            return true;
        }
        let name = normalize(name);
        match self.mode {
            ScopeMode::Suffix => is_subdomain_of(&name, &self.base_domain),
            ScopeMode::Substring => name.contains(base_label(&self.base_domain)),
        }
    }
}
