// Per-player inventories — the inventory collaborator.
//
// The host runtime owns inventories; the sim reads the held (main-hand)
// item for the tool check and removes exactly one seed on a qualifying
// harvest. This in-memory implementation backs the scenario tests and a
// headless host. Counts are tracked per item kind — slot layout is a host
// concern the sim never observes.

use crate::types::{ItemKind, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-player item counts and held items.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inventories {
    held: BTreeMap<PlayerId, ItemKind>,
    counts: BTreeMap<PlayerId, BTreeMap<ItemKind, u32>>,
}

impl Inventories {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item in the player's main hand, if any.
    pub fn held_item(&self, player: PlayerId) -> Option<ItemKind> {
        self.held.get(&player).copied()
    }

    /// Put an item in (or clear) the player's main hand.
    pub fn set_held_item(&mut self, player: PlayerId, item: Option<ItemKind>) {
        match item {
            Some(item) => {
                self.held.insert(player, item);
            }
            None => {
                self.held.remove(&player);
            }
        }
    }

    /// Add `count` of an item to the player's inventory.
    pub fn give(&mut self, player: PlayerId, item: ItemKind, count: u32) {
        if count == 0 {
            return;
        }
        *self
            .counts
            .entry(player)
            .or_default()
            .entry(item)
            .or_insert(0) += count;
    }

    /// How many of an item the player carries.
    pub fn count(&self, player: PlayerId, item: ItemKind) -> u32 {
        self.counts
            .get(&player)
            .and_then(|items| items.get(&item))
            .copied()
            .unwrap_or(0)
    }

    /// Remove exactly one unit of an item. Returns false, removing nothing,
    /// if the player has none.
    pub fn remove_one(&mut self, player: PlayerId, item: ItemKind) -> bool {
        let Some(items) = self.counts.get_mut(&player) else {
            return false;
        };
        let Some(count) = items.get_mut(&item) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            items.remove(&item);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PlayerId = PlayerId(3);

    #[test]
    fn give_and_count() {
        let mut inv = Inventories::new();
        assert_eq!(inv.count(P, ItemKind::WheatSeeds), 0);
        inv.give(P, ItemKind::WheatSeeds, 4);
        inv.give(P, ItemKind::WheatSeeds, 2);
        assert_eq!(inv.count(P, ItemKind::WheatSeeds), 6);
        // Other items and players are untouched.
        assert_eq!(inv.count(P, ItemKind::Carrot), 0);
        assert_eq!(inv.count(PlayerId(4), ItemKind::WheatSeeds), 0);
    }

    #[test]
    fn remove_one_consumes_exactly_one() {
        let mut inv = Inventories::new();
        inv.give(P, ItemKind::Potato, 2);
        assert!(inv.remove_one(P, ItemKind::Potato));
        assert_eq!(inv.count(P, ItemKind::Potato), 1);
        assert!(inv.remove_one(P, ItemKind::Potato));
        assert_eq!(inv.count(P, ItemKind::Potato), 0);
        // Nothing left to remove.
        assert!(!inv.remove_one(P, ItemKind::Potato));
    }

    #[test]
    fn remove_from_empty_inventory_fails() {
        let mut inv = Inventories::new();
        assert!(!inv.remove_one(P, ItemKind::NetherWart));
    }

    #[test]
    fn held_item_is_settable_and_clearable() {
        let mut inv = Inventories::new();
        assert_eq!(inv.held_item(P), None);
        inv.set_held_item(P, Some(ItemKind::IronHoe));
        assert_eq!(inv.held_item(P), Some(ItemKind::IronHoe));
        inv.set_held_item(P, None);
        assert_eq!(inv.held_item(P), None);
    }
}
