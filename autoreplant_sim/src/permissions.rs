// Permission grants — the permission collaborator.
//
// The host's permission backend decides who may use or reload the replant
// feature; the sim only asks. This is the minimal in-memory view the host
// keeps populated: per player, the set of granted nodes. Console callers
// bypass it entirely (see `sim.rs` — the console holds every permission).

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The permission nodes the sim consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// Toggle activation and trigger auto-replant on harvest.
    Use,
    /// Reload configuration and wipe runtime state.
    Reload,
}

/// Per-player permission grants.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Permissions {
    grants: BTreeMap<PlayerId, BTreeSet<Permission>>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, player: PlayerId, permission: Permission) {
        self.grants.entry(player).or_default().insert(permission);
    }

    pub fn revoke(&mut self, player: PlayerId, permission: Permission) {
        if let Some(set) = self.grants.get_mut(&player) {
            set.remove(&permission);
            if set.is_empty() {
                self.grants.remove(&player);
            }
        }
    }

    pub fn has(&self, player: PlayerId, permission: Permission) -> bool {
        self.grants
            .get(&player)
            .is_some_and(|set| set.contains(&permission))
    }
}
