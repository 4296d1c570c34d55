// Commands — the sim's command surface.
//
// The host parses chat input and hands the sim a structured
// `ReplantCommand`; command-string parsing never happens here. Two actions
// exist: the no-argument invocation toggles or extends the caller's
// activation window, and `reload` swaps in new config/catalog contents and
// wipes all runtime state.
//
// See also: `sim.rs` for `handle_command`, `event.rs` for the notices each
// action produces, `permissions.rs` for the nodes they require.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Who issued a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    Player(PlayerId),
    Console,
}

impl Caller {
    /// The player to address notices to; `None` addresses the console.
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Caller::Player(p) => Some(p),
            Caller::Console => None,
        }
    }
}

/// The action a command performs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CommandAction {
    /// The default invocation: toggle (ignore-cooldown mode) or start/extend
    /// (timed mode) the caller's activation window. Players only.
    Toggle,
    /// Reload configuration and message catalog, then wipe all runtime
    /// state. The host reads the files; `None` keeps the current contents.
    Reload {
        config_json: Option<String>,
        lang_json: Option<String>,
    },
}

/// A command issued to the replant sim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplantCommand {
    pub caller: Caller,
    pub action: CommandAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serialization_roundtrip() {
        let cmd = ReplantCommand {
            caller: Caller::Player(PlayerId(12)),
            action: CommandAction::Reload {
                config_json: Some(r#"{"replant-delay-ticks": 3}"#.to_string()),
                lang_json: None,
            },
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let restored: ReplantCommand = serde_json::from_str(&json).unwrap();
        // CommandAction doesn't derive PartialEq (String payloads make it
        // unnecessary overhead), so verify via re-serialization.
        assert_eq!(json, serde_json::to_string(&restored).unwrap());
    }

    #[test]
    fn caller_addressing() {
        assert_eq!(Caller::Player(PlayerId(5)).player(), Some(PlayerId(5)));
        assert_eq!(Caller::Console.player(), None);
    }
}
