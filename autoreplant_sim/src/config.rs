// Data-driven replant configuration.
//
// All tunable parameters live here in `ReplantConfig`, loaded from a JSON
// string the host reads from its config file. The sim never uses magic
// numbers — it reads from the config. Field names serialize in the
// kebab-case form the host's config file uses; any field missing from the
// file falls back to its default, so a partial config is valid.
//
// See also: `sim.rs` which owns the `ReplantConfig` as part of
// `ReplantState`, `lang.rs` for the message catalog loaded alongside it.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the replant sim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReplantConfig {
    /// Ticks between a qualifying harvest and its replant becoming due.
    pub replant_delay_ticks: u32,

    /// Maximum jobs drained per poll invocation.
    pub replants_per_tick: u32,

    /// Duration of a timed activation window, in seconds.
    pub active_seconds: u32,

    /// Lockout duration after a window expires, in seconds.
    pub cooldown_seconds: u32,

    /// If true, activation is a plain on/off toggle: no window timer, no
    /// cooldown. The config file spells this key without a separator.
    #[serde(rename = "ignorecooldown")]
    pub ignore_cooldown: bool,

    /// If true, the gate requires a hoe-class item in the harvesting hand.
    pub require_hoe: bool,

    /// Hard cap on pending replant jobs.
    pub max_queue_size: u32,
}

impl Default for ReplantConfig {
    fn default() -> Self {
        Self {
            replant_delay_ticks: 2,
            replants_per_tick: 100,
            active_seconds: 10,
            cooldown_seconds: 30,
            ignore_cooldown: false,
            require_hoe: true,
            max_queue_size: 5000,
        }
    }
}

impl ReplantConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = ReplantConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = ReplantConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "replant-delay-ticks": 4,
            "replants-per-tick": 50,
            "active-seconds": 60,
            "cooldown-seconds": 120,
            "ignorecooldown": true,
            "require-hoe": false,
            "max-queue-size": 200
        }"#;
        let config = ReplantConfig::from_json(json).unwrap();
        assert_eq!(config.replant_delay_ticks, 4);
        assert_eq!(config.replants_per_tick, 50);
        assert_eq!(config.active_seconds, 60);
        assert_eq!(config.cooldown_seconds, 120);
        assert!(config.ignore_cooldown);
        assert!(!config.require_hoe);
        assert_eq!(config.max_queue_size, 200);
    }

    #[test]
    fn partial_config_takes_defaults() {
        let config = ReplantConfig::from_json(r#"{"replant-delay-ticks": 10}"#).unwrap();
        assert_eq!(config.replant_delay_ticks, 10);
        // Everything else is the default.
        assert_eq!(config.replants_per_tick, 100);
        assert_eq!(config.cooldown_seconds, 30);
        assert!(config.require_hoe);
        assert!(!config.ignore_cooldown);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(ReplantConfig::from_json("{not json").is_err());
        assert!(ReplantConfig::from_json(r#"{"replant-delay-ticks": "soon"}"#).is_err());
    }
}
