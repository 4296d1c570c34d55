// Core types shared across the replant simulation.
//
// Defines the block-grid coordinate (`BlockPos`), the host-assigned player
// identifier, crop and item kinds, and the block states the sim can observe
// or produce. All types derive `Serialize` and `Deserialize` for config
// loading and state inspection, and `Ord` where they serve as keys in the
// BTree collections (deterministic iteration).
//
// **Critical constraint: the sim never reads the clock.** Every timestamp in
// this crate is a `u64` millisecond value supplied by the host.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Milliseconds per game tick. The host's scheduler runs the poll loop at
/// this fixed period; replant delays configured in ticks convert through it.
pub const MS_PER_TICK: u64 = 50;

// ---------------------------------------------------------------------------
// Identity and spatial types
// ---------------------------------------------------------------------------

/// Opaque player identifier, assigned by the host runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

/// A position in the block grid. Each component is in block units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Parse the `"x,y,z"` form produced by serialization.
    pub fn from_str(s: &str) -> Option<Self> {
        let mut parts = s.split(',');
        let x = parts.next()?.trim().parse().ok()?;
        let y = parts.next()?.trim().parse().ok()?;
        let z = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { x, y, z })
    }
}

// Custom serde: serialize as the "x,y,z" string so BlockPos can be used as
// a JSON map key (serde_json requires string keys).
impl Serialize for BlockPos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{},{},{}", self.x, self.y, self.z))
    }
}

impl<'de> Deserialize<'de> for BlockPos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BlockPos::from_str(&s).ok_or_else(|| serde::de::Error::custom("invalid block position"))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Crops and items
// ---------------------------------------------------------------------------

/// The age-tracked crop kinds the sim knows how to replant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropKind {
    Wheat,
    Carrots,
    Potatoes,
    Beetroots,
    Cocoa,
    NetherWart,
}

impl CropKind {
    /// Maximum growth stage for this crop. A crop at its maximum age is
    /// mature and eligible for auto-replant on harvest.
    pub fn max_age(self) -> u8 {
        match self {
            CropKind::Wheat | CropKind::Carrots | CropKind::Potatoes => 7,
            CropKind::Beetroots | CropKind::NetherWart => 3,
            CropKind::Cocoa => 2,
        }
    }

    /// The item consumed to replant this crop. Carrots, potatoes, and nether
    /// wart have no distinct seed item — the harvested crop is its own seed.
    pub fn seed_item(self) -> ItemKind {
        match self {
            CropKind::Wheat => ItemKind::WheatSeeds,
            CropKind::Carrots => ItemKind::Carrot,
            CropKind::Potatoes => ItemKind::Potato,
            CropKind::Beetroots => ItemKind::BeetrootSeeds,
            CropKind::Cocoa => ItemKind::CocoaBeans,
            CropKind::NetherWart => ItemKind::NetherWart,
        }
    }
}

/// Inventory item kinds the sim interacts with: seed items, hoe-class
/// tools, and a few non-tool items for hands that hold something else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    WheatSeeds,
    Carrot,
    Potato,
    BeetrootSeeds,
    CocoaBeans,
    NetherWart,
    WoodenHoe,
    StoneHoe,
    IronHoe,
    GoldenHoe,
    DiamondHoe,
    NetheriteHoe,
    Wheat,
    Beetroot,
    Stick,
}

impl ItemKind {
    /// Whether this item satisfies the hoe tool requirement.
    pub fn is_hoe(self) -> bool {
        matches!(
            self,
            ItemKind::WoodenHoe
                | ItemKind::StoneHoe
                | ItemKind::IronHoe
                | ItemKind::GoldenHoe
                | ItemKind::DiamondHoe
                | ItemKind::NetheriteHoe
        )
    }
}

// ---------------------------------------------------------------------------
// Block states
// ---------------------------------------------------------------------------

/// The state of a single position in the block grid, as far as the replant
/// sim is concerned: empty, an age-tracked crop, or something else entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    Air,
    Crop { kind: CropKind, age: u8 },
    /// Any non-crop, non-air block. The sim never replants over these.
    Other,
}

impl BlockState {
    pub fn is_air(self) -> bool {
        matches!(self, BlockState::Air)
    }

    /// Returns the crop kind if this block is a crop at its maximum age.
    pub fn mature_crop_kind(self) -> Option<CropKind> {
        match self {
            BlockState::Crop { kind, age } if age >= kind.max_age() => Some(kind),
            _ => None,
        }
    }
}

impl Default for BlockState {
    fn default() -> Self {
        Self::Air
    }
}
