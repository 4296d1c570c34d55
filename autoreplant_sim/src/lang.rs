// Localized message catalog with placeholder substitution.
//
// User-facing strings load from an external key→template resource the host
// reads at startup and on reload. Templates carry `{placeholder}` slots and
// the `&x` color-code escape convention; rendering substitutes placeholders
// first, then translates `&` escapes to the `§` control character the
// client displays. A missing key renders a visible fallback string rather
// than failing — localization problems must never break gameplay.
//
// See also: `event.rs` for `NoticeKind` (each kind maps to one catalog
// key), `sim.rs` which owns the catalog as part of `ReplantState`.

use crate::event::{Notice, NoticeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Color-code escape character in catalog templates.
const COLOR_ESCAPE: char = '&';
/// Control character the client renders color codes with.
const COLOR_CONTROL: char = '\u{a7}';

/// Key→template message catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut messages = BTreeMap::new();
        let mut put = |key: &str, template: &str| {
            messages.insert(key.to_string(), template.to_string());
        };
        put("no-permission", "&cYou don't have permission to do that.");
        put("only-player", "&cOnly players can use this command.");
        put("reloaded", "&aAutoReplant configuration reloaded.");
        put("enabled", "&aAuto-replant enabled.");
        put("disabled", "&7Auto-replant disabled.");
        put(
            "enabled-timed",
            "&aAuto-replant enabled for &e{seconds}&a seconds.",
        );
        put(
            "cooldown",
            "&cYou must wait &e{seconds}&c more seconds before reactivating.",
        );
        put("expired", "&7Your auto-replant window has expired.");
        put("queue-full", "&cThe replant queue is full. Try again shortly.");
        Self { messages }
    }
}

impl MessageCatalog {
    /// Parse a catalog from a JSON object of key→template pairs.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let messages: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { messages })
    }

    /// Render a key with the given placeholder substitutions. Missing keys
    /// degrade to a visible "Missing lang" string.
    pub fn render(&self, key: &str, args: &[(&str, String)]) -> String {
        let template = match self.messages.get(key) {
            Some(t) => t.clone(),
            None => format!("&cMissing lang: {key}"),
        };
        let mut message = template;
        for (name, value) in args {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        translate_color_codes(&message)
    }

    /// Render the message for a notice.
    pub fn render_notice(&self, notice: &Notice) -> String {
        match notice.kind {
            NoticeKind::NoPermission => self.render("no-permission", &[]),
            NoticeKind::OnlyPlayers => self.render("only-player", &[]),
            NoticeKind::Reloaded => self.render("reloaded", &[]),
            NoticeKind::Enabled => self.render("enabled", &[]),
            NoticeKind::Disabled => self.render("disabled", &[]),
            NoticeKind::EnabledTimed { seconds } => {
                self.render("enabled-timed", &[("seconds", seconds.to_string())])
            }
            NoticeKind::CooldownActive { seconds } => {
                self.render("cooldown", &[("seconds", seconds.to_string())])
            }
            NoticeKind::WindowExpired => self.render("expired", &[]),
            NoticeKind::QueueFull => self.render("queue-full", &[]),
        }
    }
}

/// Translate `&x` escapes to `§x` for every valid color/format code
/// (`0-9`, `a-f`, `k-o`, `r`). Other `&` occurrences pass through.
pub fn translate_color_codes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == COLOR_ESCAPE {
            match chars.peek() {
                Some(&code) if is_color_code(code) => {
                    out.push(COLOR_CONTROL);
                    out.push(code);
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn is_color_code(c: char) -> bool {
    let c = c.to_ascii_lowercase();
    c.is_ascii_digit() || ('a'..='f').contains(&c) || ('k'..='o').contains(&c) || c == 'r'
}
