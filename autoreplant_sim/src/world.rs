// Sparse block grid — the world collaborator.
//
// The host runtime owns block state; the sim only reads a position when a
// replant comes due and writes it when the replant applies. This in-memory
// grid is the reference implementation the scenario tests and a headless
// host drive. Positions without an entry read as `Air`, and writing `Air`
// removes the entry, so the map stays sparse over an unbounded grid.
//
// See also: `sim.rs` whose poll loop reads and writes through this,
// `types.rs` for `BlockPos` and `BlockState`.

use crate::types::{BlockPos, BlockState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse, unbounded block grid.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldWorld {
    blocks: BTreeMap<BlockPos, BlockState>,
}

impl FieldWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a block. Positions never written read as `Air`.
    pub fn get(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or(BlockState::Air)
    }

    /// Write a block. Writing `Air` removes the entry.
    pub fn set(&mut self, pos: BlockPos, block: BlockState) {
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
    }

    /// Number of non-air positions.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CropKind;

    #[test]
    fn unwritten_positions_read_as_air() {
        let world = FieldWorld::new();
        assert_eq!(world.get(BlockPos::new(0, 0, 0)), BlockState::Air);
        assert_eq!(world.get(BlockPos::new(-40, 200, 7)), BlockState::Air);
    }

    #[test]
    fn set_and_get() {
        let mut world = FieldWorld::new();
        let pos = BlockPos::new(3, 64, 2);
        let crop = BlockState::Crop {
            kind: CropKind::Carrots,
            age: 7,
        };
        world.set(pos, crop);
        assert_eq!(world.get(pos), crop);
        // Neighbors are still air.
        assert_eq!(world.get(BlockPos::new(3, 64, 3)), BlockState::Air);
    }

    #[test]
    fn writing_air_removes_the_entry() {
        let mut world = FieldWorld::new();
        let pos = BlockPos::new(1, 64, 1);
        world.set(pos, BlockState::Other);
        assert_eq!(world.len(), 1);

        world.set(pos, BlockState::Air);
        assert_eq!(world.get(pos), BlockState::Air);
        assert!(world.is_empty());
    }
}
