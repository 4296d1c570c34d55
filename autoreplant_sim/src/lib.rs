// autoreplant_sim — pure Rust auto-replant simulation library.
//
// When a player harvests a fully-grown crop, the crop is replanted a few
// ticks later, gated by per-player activation windows and cooldowns. This
// crate contains all of that logic — the timed permission store, the
// bounded job queue, the event gate, and the poll loop — with zero host
// dependencies. It can be tested and run headless.
//
// Module overview:
// - `sim.rs`:         Top-level ReplantState, command surface, event gate, poll loop.
// - `activation.rs`:  Per-player activation windows and cooldowns (lazy expiry).
// - `queue.rs`:       Bounded set of pending replant jobs.
// - `config.rs`:      ReplantConfig — all tunable parameters, JSON-loaded.
// - `lang.rs`:        Message catalog with placeholder and color-code rendering.
// - `command.rs`:     ReplantCommand — the sim's command surface.
// - `event.rs`:       Inbound BlockBreakEvent, outbound player Notices.
// - `world.rs`:       Sparse block grid (host-owned world collaborator).
// - `inventory.rs`:   Per-player item counts (host-owned inventory collaborator).
// - `permissions.rs`: Permission grants (host-owned permission collaborator).
// - `types.rs`:       BlockPos, PlayerId, crop/item kinds, block states.
//
// The host runtime wraps this library: it dispatches block-break events and
// parsed commands in, delivers the returned notices, and invokes the poll
// loop once per tick. That boundary is strict — this crate cannot read the
// clock, touch files, or reach the host engine.
//
// **Critical constraint: host-serialized, clock-free.** The host guarantees
// all entry points run on one logical thread, serialized with respect to
// each other, and supplies every timestamp as a parameter. The sim needs no
// locks and must never acquire any.

pub mod activation;
pub mod command;
pub mod config;
pub mod event;
pub mod inventory;
pub mod lang;
pub mod permissions;
pub mod queue;
pub mod sim;
pub mod types;
pub mod world;
