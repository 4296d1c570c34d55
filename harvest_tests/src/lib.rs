// Test harness for end-to-end replant scenarios.
//
// Bundles a real `ReplantState` with the host-owned collaborators (world,
// inventories, permissions) and a manually advanced clock, then exposes the
// same sequence a live host performs: dispatch the break event to the gate,
// apply the host's default break handling (the block becomes air), and run
// the poll loop once per tick. All replant logic uses the same code paths as
// a live host — the only test-specific code is the clock and the helpers.
//
// See also: `tests/replant_flow.rs` for the scenarios.

use autoreplant_sim::command::{Caller, CommandAction, ReplantCommand};
use autoreplant_sim::config::ReplantConfig;
use autoreplant_sim::event::{BlockBreakEvent, Notice};
use autoreplant_sim::inventory::Inventories;
use autoreplant_sim::lang::MessageCatalog;
use autoreplant_sim::permissions::{Permission, Permissions};
use autoreplant_sim::sim::{PollStats, ReplantState};
use autoreplant_sim::types::{BlockPos, BlockState, CropKind, ItemKind, PlayerId, MS_PER_TICK};
use autoreplant_sim::world::FieldWorld;

/// A headless field: sim state, host collaborators, and a manual clock.
pub struct TestField {
    pub state: ReplantState,
    pub world: FieldWorld,
    pub inventories: Inventories,
    pub permissions: Permissions,
    pub now_ms: u64,
}

impl TestField {
    pub fn new() -> Self {
        Self::with_config(ReplantConfig::default())
    }

    pub fn with_config(config: ReplantConfig) -> Self {
        Self {
            state: ReplantState::new(config, MessageCatalog::default()),
            world: FieldWorld::new(),
            inventories: Inventories::new(),
            permissions: Permissions::new(),
            now_ms: 0,
        }
    }

    /// A player holding a hoe, carrying seeds of every crop kind, with the
    /// use permission granted.
    pub fn add_farmer(&mut self, player: PlayerId, seeds_each: u32) {
        self.permissions.grant(player, Permission::Use);
        self.inventories
            .set_held_item(player, Some(ItemKind::DiamondHoe));
        for crop in [
            CropKind::Wheat,
            CropKind::Carrots,
            CropKind::Potatoes,
            CropKind::Beetroots,
            CropKind::Cocoa,
            CropKind::NetherWart,
        ] {
            self.inventories.give(player, crop.seed_item(), seeds_each);
        }
    }

    pub fn plant_mature(&mut self, pos: BlockPos, kind: CropKind) {
        self.world.set(
            pos,
            BlockState::Crop {
                kind,
                age: kind.max_age(),
            },
        );
    }

    /// Issue the default invocation for a player.
    pub fn toggle(&mut self, player: PlayerId) -> Vec<Notice> {
        let cmd = ReplantCommand {
            caller: Caller::Player(player),
            action: CommandAction::Toggle,
        };
        self.state
            .handle_command(&cmd, &self.permissions, self.now_ms)
            .expect("toggle never fails")
    }

    /// Issue a console reload with optional new config contents.
    pub fn reload(&mut self, config_json: Option<&str>) -> Vec<Notice> {
        let cmd = ReplantCommand {
            caller: Caller::Console,
            action: CommandAction::Reload {
                config_json: config_json.map(str::to_string),
                lang_json: None,
            },
        };
        self.state
            .handle_command(&cmd, &self.permissions, self.now_ms)
            .expect("reload payload is valid")
    }

    /// Console reload with a fully serialized config, as a host that keeps
    /// its config in memory would issue it.
    pub fn reload_with(&mut self, config: &ReplantConfig) -> Vec<Notice> {
        let json = serde_json::to_string(config).expect("serialize ReplantConfig failed");
        self.reload(Some(&json))
    }

    /// Break the block at `pos` as `player`: dispatch the event to the gate
    /// while the block still holds its pre-break state, then apply the
    /// host's default handling (the position becomes air).
    pub fn harvest(&mut self, player: PlayerId, pos: BlockPos) -> Vec<Notice> {
        let ev = BlockBreakEvent {
            player,
            position: pos,
            block: self.world.get(pos),
            cancelled: false,
        };
        let notices =
            self.state
                .on_block_break(&ev, &mut self.inventories, &self.permissions, self.now_ms);
        self.world.set(pos, BlockState::Air);
        notices
    }

    /// Advance the clock without polling (time passes between ticks too).
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Advance one tick and run the poll loop, as the host scheduler does.
    pub fn tick(&mut self) -> PollStats {
        self.now_ms += MS_PER_TICK;
        self.state.poll(&mut self.world, self.now_ms)
    }

    /// Run `n` ticks, accumulating poll stats.
    pub fn run_ticks(&mut self, n: u32) -> PollStats {
        let mut total = PollStats::default();
        for _ in 0..n {
            let stats = self.tick();
            total.applied += stats.applied;
            total.dropped += stats.dropped;
        }
        total
    }
}

impl Default for TestField {
    fn default() -> Self {
        Self::new()
    }
}
