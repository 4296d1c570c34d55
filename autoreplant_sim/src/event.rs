// Host events in, player notices out.
//
// This file defines two related but distinct concepts:
// - `BlockBreakEvent`: the inbound host event the gate evaluates. The host
//   dispatches it synchronously while the broken block still holds its
//   pre-break state; the break itself proceeds through the host's default
//   handling regardless of what the gate decides.
// - `Notice`: outbound player-facing notifications. The sim returns these
//   from its entry points; the host renders them through the message
//   catalog (`lang.rs`) and delivers them. Silent aborts produce no notice.
//
// See also: `sim.rs` for the gate and command surface, `lang.rs` for
// rendering.

use crate::types::{BlockPos, BlockState, PlayerId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound host events
// ---------------------------------------------------------------------------

/// A block-break event as delivered by the host, snapshotted at break time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BlockBreakEvent {
    pub player: PlayerId,
    pub position: BlockPos,
    /// The block being broken — still its pre-break state.
    pub block: BlockState,
    /// Set when another handler already cancelled the break. Cancelled
    /// events are ignored entirely.
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// Outbound player notices
// ---------------------------------------------------------------------------

/// A notification for a player (or the console, when `player` is `None`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub player: Option<PlayerId>,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn to(player: PlayerId, kind: NoticeKind) -> Self {
        Self {
            player: Some(player),
            kind,
        }
    }

    pub fn console(kind: NoticeKind) -> Self {
        Self { player: None, kind }
    }
}

/// The kinds of notification the sim emits. Every user-visible string lives
/// in the message catalog, keyed per kind — see `lang.rs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Caller lacks the required permission node.
    NoPermission,
    /// The default invocation came from the console.
    OnlyPlayers,
    /// Config and catalog reloaded, runtime state wiped.
    Reloaded,
    /// Ignore-cooldown mode: toggled on.
    Enabled,
    /// Ignore-cooldown mode: toggled off.
    Disabled,
    /// Timed mode: window started or extended.
    EnabledTimed { seconds: u32 },
    /// Timed mode: reactivation blocked, `seconds` remain on the lockout.
    CooldownActive { seconds: u64 },
    /// The activation window elapsed at the moment of a gated action.
    WindowExpired,
    /// The replant queue is at capacity; the harvest was not queued.
    QueueFull,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_serialization_roundtrip() {
        let notice = Notice::to(PlayerId(9), NoticeKind::CooldownActive { seconds: 17 });
        let json = serde_json::to_string(&notice).unwrap();
        let restored: Notice = serde_json::from_str(&json).unwrap();
        assert_eq!(notice, restored);

        let console = Notice::console(NoticeKind::Reloaded);
        let json = serde_json::to_string(&console).unwrap();
        let restored: Notice = serde_json::from_str(&json).unwrap();
        assert_eq!(console, restored);
    }
}
