// Timed permission store — per-player activation windows and cooldowns.
//
// Each player is in exactly one of three states: inactive (no entry in
// either map), active (an `ActiveUntil` entry), or cooling down (a cooldown
// expiry entry). The two maps are never populated for the same player at
// once.
//
// There is no background expiry sweep. A timed window that has elapsed stays
// in the map until the player next performs the gated action, at which point
// `expire_if_needed` performs the active → cooling-down transition and the
// caller notifies the player once. Stale cooldown entries are likewise
// cleared lazily by `cooldown_remaining_secs`. The only consumer of "is this
// player active" is the triggering action itself, so lazy expiry observes
// exactly the same states an eager sweep would.
//
// See also: `sim.rs` for the event gate and command surface that drive
// these transitions, `config.rs` for the window and cooldown durations.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// When a player's activation window closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveUntil {
    /// Timed window: active while `now <= deadline` (milliseconds).
    At(u64),
    /// Ignore-cooldown mode: active until explicitly toggled off.
    Toggled,
}

/// Per-player activation windows and cooldown lockouts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivationStore {
    active: BTreeMap<PlayerId, ActiveUntil>,
    /// Cooldown expiry timestamps, in milliseconds.
    cooldowns: BTreeMap<PlayerId, u64>,
}

impl ActivationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a timed activation window ending at
    /// `now + active_seconds`. Clears any cooldown entry so the two maps
    /// never hold the same player at once.
    pub fn activate_timed(&mut self, player: PlayerId, now_ms: u64, active_seconds: u32) {
        self.cooldowns.remove(&player);
        self.active
            .insert(player, ActiveUntil::At(now_ms + u64::from(active_seconds) * 1000));
    }

    /// Ignore-cooldown mode: flip the player's activation on or off.
    /// Returns the new state (true = now active).
    pub fn toggle(&mut self, player: PlayerId) -> bool {
        if self.active.remove(&player).is_some() {
            false
        } else {
            self.cooldowns.remove(&player);
            self.active.insert(player, ActiveUntil::Toggled);
            true
        }
    }

    /// Whether the player has an activation entry at all, elapsed or not.
    /// The gate uses this before deciding whether an expiry transition is
    /// due; `is_active` is the time-aware check.
    pub fn has_entry(&self, player: PlayerId) -> bool {
        self.active.contains_key(&player)
    }

    /// True while the player's window is open: a toggled entry, or a timed
    /// entry whose deadline has not passed.
    pub fn is_active(&self, player: PlayerId, now_ms: u64) -> bool {
        match self.active.get(&player) {
            Some(ActiveUntil::Toggled) => true,
            Some(ActiveUntil::At(deadline)) => now_ms <= *deadline,
            None => false,
        }
    }

    /// If the player's timed window has elapsed, transition them to cooling
    /// down (`now + cooldown_seconds`) and return true — the caller sends
    /// the one-time expiry notification. Toggled entries never expire.
    pub fn expire_if_needed(
        &mut self,
        player: PlayerId,
        now_ms: u64,
        cooldown_seconds: u32,
    ) -> bool {
        match self.active.get(&player).copied() {
            Some(ActiveUntil::At(deadline)) if now_ms > deadline => {
                self.active.remove(&player);
                self.cooldowns
                    .insert(player, now_ms + u64::from(cooldown_seconds) * 1000);
                true
            }
            _ => false,
        }
    }

    /// Remaining cooldown in whole seconds, or `None` if no cooldown is
    /// pending. An elapsed cooldown entry is removed here, lazily.
    pub fn cooldown_remaining_secs(&mut self, player: PlayerId, now_ms: u64) -> Option<u64> {
        match self.cooldowns.get(&player).copied() {
            Some(expiry) if now_ms < expiry => Some((expiry - now_ms) / 1000),
            Some(_) => {
                self.cooldowns.remove(&player);
                None
            }
            None => None,
        }
    }

    /// Remove the player's activation entry, if any. Returns whether one
    /// existed.
    pub fn deactivate(&mut self, player: PlayerId) -> bool {
        self.active.remove(&player).is_some()
    }

    /// Wipe both maps. Reload and shutdown call this unconditionally.
    pub fn clear(&mut self) {
        self.active.clear();
        self.cooldowns.clear();
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn cooldown_count(&self) -> usize {
        self.cooldowns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PlayerId = PlayerId(7);

    #[test]
    fn timed_window_opens_and_closes() {
        let mut store = ActivationStore::new();
        assert!(!store.is_active(P, 0));

        store.activate_timed(P, 1_000, 10);
        assert!(store.is_active(P, 1_000));
        assert!(store.is_active(P, 11_000)); // inclusive deadline
        assert!(!store.is_active(P, 11_001));
    }

    #[test]
    fn expiry_transitions_to_cooldown_once() {
        let mut store = ActivationStore::new();
        store.activate_timed(P, 0, 10);

        // Not elapsed yet.
        assert!(!store.expire_if_needed(P, 10_000, 30));
        assert!(store.has_entry(P));

        // Elapsed: one transition, then nothing further to expire.
        assert!(store.expire_if_needed(P, 10_001, 30));
        assert!(!store.has_entry(P));
        assert!(!store.expire_if_needed(P, 10_001, 30));

        // Inactive immediately after the cooldown is set.
        assert!(!store.is_active(P, 10_001));
        assert_eq!(store.cooldown_remaining_secs(P, 10_001), Some(30));
    }

    #[test]
    fn cooldown_counts_down_and_clears_lazily() {
        let mut store = ActivationStore::new();
        store.activate_timed(P, 0, 10);
        store.expire_if_needed(P, 10_001, 20);

        assert_eq!(store.cooldown_remaining_secs(P, 10_001), Some(20));
        assert_eq!(store.cooldown_remaining_secs(P, 25_001), Some(5));

        // Elapsed: entry removed on the read.
        assert_eq!(store.cooldown_remaining_secs(P, 30_001), None);
        assert_eq!(store.cooldown_count(), 0);
    }

    #[test]
    fn activation_clears_stale_cooldown() {
        let mut store = ActivationStore::new();
        store.activate_timed(P, 0, 10);
        store.expire_if_needed(P, 10_001, 20);
        assert_eq!(store.cooldown_count(), 1);

        // Cooldown elapsed; re-activating must not leave the player in both maps.
        store.activate_timed(P, 40_000, 10);
        assert_eq!(store.cooldown_count(), 0);
        assert_eq!(store.active_count(), 1);
        assert!(store.is_active(P, 40_000));
    }

    #[test]
    fn toggle_flips_and_never_expires() {
        let mut store = ActivationStore::new();
        assert!(store.toggle(P));
        assert!(store.is_active(P, u64::MAX));
        assert!(!store.expire_if_needed(P, u64::MAX, 30));

        assert!(!store.toggle(P));
        assert!(!store.is_active(P, 0));
    }

    #[test]
    fn deactivate_removes_the_window_without_a_cooldown() {
        let mut store = ActivationStore::new();
        store.activate_timed(P, 0, 10);
        assert!(store.deactivate(P));
        assert!(!store.is_active(P, 0));
        assert_eq!(store.cooldown_count(), 0);
        // Nothing left to deactivate.
        assert!(!store.deactivate(P));
    }

    #[test]
    fn clear_wipes_both_maps() {
        let mut store = ActivationStore::new();
        store.activate_timed(PlayerId(1), 0, 10);
        store.toggle(PlayerId(2));
        store.activate_timed(PlayerId(3), 0, 10);
        store.expire_if_needed(PlayerId(3), 10_001, 30);

        store.clear();
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.cooldown_count(), 0);
        assert!(!store.is_active(PlayerId(2), 0));
    }

    #[test]
    fn store_serialization_roundtrip() {
        let mut store = ActivationStore::new();
        store.activate_timed(PlayerId(1), 0, 10);
        store.toggle(PlayerId(2));

        let json = serde_json::to_string(&store).unwrap();
        let restored: ActivationStore = serde_json::from_str(&json).unwrap();
        assert!(restored.is_active(PlayerId(1), 5_000));
        assert!(restored.is_active(PlayerId(2), 5_000));
    }
}
