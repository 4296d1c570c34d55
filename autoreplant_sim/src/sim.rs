// Core replant state, event gate, and poll loop.
//
// `ReplantState` is the single service-owned scheduler-state object: the
// config, the message catalog, the per-player activation store, and the
// pending-job queue. It is constructed on startup, wiped on reload, and
// dropped on shutdown — nothing survives either boundary.
//
// Three entry points drive it, all called from the host's single logical
// thread:
//
// - `handle_command` — the command surface: the default invocation toggles
//   or extends the caller's activation window; `reload` swaps config and
//   catalog and wipes all runtime state.
// - `on_block_break` — the event gate. Evaluated synchronously per break
//   event, it walks a fixed chain of checks (permission, activation,
//   expiry, tool, queue capacity, crop maturity, seed availability) and on
//   success consumes one seed and enqueues a delayed replant job. Failure
//   at any step aborts — silently for non-applicability, with a notice for
//   denied/cooldown/full — and is never re-evaluated later.
// - `poll` — the scheduler. The host invokes it once per tick; it drains up
//   to `replants_per_tick` due jobs and applies each to positions that are
//   still empty. Occupied positions drop their job silently, with no
//   restoration and no retry.
//
// The host engine owns block state, inventories, and permissions; they
// arrive by reference at each entry point (`world.rs`, `inventory.rs`,
// `permissions.rs`). The sim owns nothing it cannot wipe.
//
// See also: `activation.rs` for the window/cooldown state machine,
// `queue.rs` for the job set, `event.rs` for notices, `lang.rs` for
// rendering them.
//
// **Critical constraint: host-serialized.** The host guarantees the event
// handler and the periodic poll never overlap; every entry point takes
// `&mut self` and the clock arrives as a parameter. No locks, no interior
// mutability, no system time.

use crate::activation::ActivationStore;
use crate::command::{Caller, CommandAction, ReplantCommand};
use crate::config::ReplantConfig;
use crate::event::{BlockBreakEvent, Notice, NoticeKind};
use crate::inventory::Inventories;
use crate::lang::MessageCatalog;
use crate::permissions::{Permission, Permissions};
use crate::queue::{ReplantJob, ReplantQueue};
use crate::types::{BlockState, PlayerId, MS_PER_TICK};
use crate::world::FieldWorld;
use serde::{Deserialize, Serialize};

/// What a single poll invocation did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollStats {
    /// Due jobs whose position was still empty: crop placed at age zero.
    pub applied: usize,
    /// Due jobs whose position was occupied: dropped without mutation.
    pub dropped: usize,
}

/// The replant service's entire runtime state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplantState {
    pub config: ReplantConfig,
    pub catalog: MessageCatalog,
    pub activations: ActivationStore,
    pub queue: ReplantQueue,
}

impl Default for ReplantState {
    fn default() -> Self {
        Self::new(ReplantConfig::default(), MessageCatalog::default())
    }
}

impl ReplantState {
    pub fn new(config: ReplantConfig, catalog: MessageCatalog) -> Self {
        let queue = ReplantQueue::new(config.max_queue_size as usize);
        Self {
            config,
            catalog,
            activations: ActivationStore::new(),
            queue,
        }
    }

    // -----------------------------------------------------------------------
    // Command surface
    // -----------------------------------------------------------------------

    /// Process a command. The only error is a malformed reload payload, in
    /// which case the current config and catalog stay in effect and no
    /// state is touched.
    pub fn handle_command(
        &mut self,
        cmd: &ReplantCommand,
        permissions: &Permissions,
        now_ms: u64,
    ) -> Result<Vec<Notice>, String> {
        match &cmd.action {
            CommandAction::Reload {
                config_json,
                lang_json,
            } => self.handle_reload(
                cmd.caller,
                config_json.as_deref(),
                lang_json.as_deref(),
                permissions,
            ),
            CommandAction::Toggle => Ok(self.handle_toggle(cmd.caller, permissions, now_ms)),
        }
    }

    fn handle_reload(
        &mut self,
        caller: Caller,
        config_json: Option<&str>,
        lang_json: Option<&str>,
        permissions: &Permissions,
    ) -> Result<Vec<Notice>, String> {
        if !self.caller_has(caller, Permission::Reload, permissions) {
            return Ok(vec![Notice {
                player: caller.player(),
                kind: NoticeKind::NoPermission,
            }]);
        }

        // Parse both payloads before touching anything, so a bad file
        // leaves the old config and catalog fully in effect.
        let new_config = config_json
            .map(ReplantConfig::from_json)
            .transpose()
            .map_err(|e| format!("invalid replant config: {e}"))?;
        let new_catalog = lang_json
            .map(MessageCatalog::from_json)
            .transpose()
            .map_err(|e| format!("invalid message catalog: {e}"))?;

        if let Some(config) = new_config {
            self.config = config;
        }
        if let Some(catalog) = new_catalog {
            self.catalog = catalog;
        }

        // Wipe runtime state unconditionally: stale windows, cooldowns, and
        // queued jobs must not survive a config change.
        self.clear_runtime_state();

        Ok(vec![Notice {
            player: caller.player(),
            kind: NoticeKind::Reloaded,
        }])
    }

    fn handle_toggle(
        &mut self,
        caller: Caller,
        permissions: &Permissions,
        now_ms: u64,
    ) -> Vec<Notice> {
        let player = match caller {
            Caller::Player(p) => p,
            Caller::Console => return vec![Notice::console(NoticeKind::OnlyPlayers)],
        };
        if !permissions.has(player, Permission::Use) {
            return vec![Notice::to(player, NoticeKind::NoPermission)];
        }

        if self.config.ignore_cooldown {
            let kind = if self.activations.toggle(player) {
                NoticeKind::Enabled
            } else {
                NoticeKind::Disabled
            };
            return vec![Notice::to(player, kind)];
        }

        if let Some(seconds) = self.activations.cooldown_remaining_secs(player, now_ms) {
            return vec![Notice::to(player, NoticeKind::CooldownActive { seconds })];
        }

        self.activations
            .activate_timed(player, now_ms, self.config.active_seconds);
        vec![Notice::to(
            player,
            NoticeKind::EnabledTimed {
                seconds: self.config.active_seconds,
            },
        )]
    }

    fn caller_has(
        &self,
        caller: Caller,
        permission: Permission,
        permissions: &Permissions,
    ) -> bool {
        match caller {
            // The console holds every permission.
            Caller::Console => true,
            Caller::Player(p) => permissions.has(p, permission),
        }
    }

    // -----------------------------------------------------------------------
    // Event gate
    // -----------------------------------------------------------------------

    /// Evaluate a block-break event. On a fully qualifying harvest, one seed
    /// is consumed and a replant job is enqueued `replant_delay_ticks` ticks
    /// out. Every other outcome aborts this event: silently when it simply
    /// doesn't apply, with a notice for the expiry transition and the full
    /// queue. The break itself always proceeds through the host.
    pub fn on_block_break(
        &mut self,
        ev: &BlockBreakEvent,
        inventories: &mut Inventories,
        permissions: &Permissions,
        now_ms: u64,
    ) -> Vec<Notice> {
        if ev.cancelled {
            return Vec::new();
        }
        let player = ev.player;
        if !permissions.has(player, Permission::Use) {
            return Vec::new();
        }
        if !self.activations.has_entry(player) {
            return Vec::new();
        }

        // Lazy expiry: the window may have elapsed since the last action.
        // Notify once, at the moment of the triggering event.
        if !self.config.ignore_cooldown
            && self
                .activations
                .expire_if_needed(player, now_ms, self.config.cooldown_seconds)
        {
            return vec![Notice::to(player, NoticeKind::WindowExpired)];
        }

        if self.config.require_hoe {
            match inventories.held_item(player) {
                Some(item) if item.is_hoe() => {}
                _ => return Vec::new(),
            }
        }

        // Capacity is checked before the seed leaves the inventory, so a
        // rejected enqueue has no side effects.
        if self.queue.is_full() {
            return vec![Notice::to(player, NoticeKind::QueueFull)];
        }

        let crop = match ev.block.mature_crop_kind() {
            Some(crop) => crop,
            None => return Vec::new(),
        };

        if !inventories.remove_one(player, crop.seed_item()) {
            return Vec::new();
        }

        self.queue.push(ReplantJob {
            position: ev.position,
            crop,
            execute_at_ms: now_ms + u64::from(self.config.replant_delay_ticks) * MS_PER_TICK,
        });
        Vec::new()
    }

    // -----------------------------------------------------------------------
    // Poll loop
    // -----------------------------------------------------------------------

    /// Drain due jobs, up to `replants_per_tick`. A due job applies only if
    /// its position is still empty; anything else occupying the position
    /// drops the job. Jobs not yet due stay queued for the next poll.
    pub fn poll(&mut self, world: &mut FieldWorld, now_ms: u64) -> PollStats {
        let mut stats = PollStats::default();
        if self.queue.is_empty() {
            return stats;
        }

        let due = self
            .queue
            .take_due(now_ms, self.config.replants_per_tick as usize);
        for job in due {
            if world.get(job.position).is_air() {
                world.set(
                    job.position,
                    BlockState::Crop {
                        kind: job.crop,
                        age: 0,
                    },
                );
                stats.applied += 1;
            } else {
                stats.dropped += 1;
            }
        }
        stats
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Wipe activations, cooldowns, and the queue. Called on reload and by
    /// the host on shutdown. The queue is rebuilt at the current config's
    /// capacity.
    pub fn clear_runtime_state(&mut self) {
        self.activations.clear();
        self.queue = ReplantQueue::new(self.config.max_queue_size as usize);
    }

    /// Convenience for hosts that resolve a player's activation state for
    /// display. Time-aware: an elapsed window reads as inactive even before
    /// its lazy expiry transition runs.
    pub fn is_active(&self, player: PlayerId, now_ms: u64) -> bool {
        self.activations.is_active(player, now_ms)
    }
}
