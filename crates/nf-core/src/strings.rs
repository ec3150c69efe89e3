use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label keys the engine reads from the table.
pub mod labels {
    /// Title shown for a victory ending.
    pub const VICTORY_TITLE: &str = "ending.victory.title";
    /// Closing message for a victory ending.
    pub const VICTORY_MESSAGE: &str = "ending.victory.message";
    /// Title shown for a defeat ending.
    pub const DEFEAT_TITLE: &str = "ending.defeat.title";
    /// Closing message for a defeat ending.
    pub const DEFEAT_MESSAGE: &str = "ending.defeat.message";
    /// Title shown for a fragile ending.
    pub const FRAGILE_TITLE: &str = "ending.fragile.title";
    /// Closing message for a fragile ending.
    pub const FRAGILE_MESSAGE: &str = "ending.fragile.message";
    /// Template announcing a granted charge; `{resource}` is substituted.
    pub const REWARD_GRANTED: &str = "reward.granted";

    /// Every key the engine looks up.
    pub const ALL: &[&str] = &[
        VICTORY_TITLE,
        VICTORY_MESSAGE,
        DEFEAT_TITLE,
        DEFEAT_MESSAGE,
        FRAGILE_TITLE,
        FRAGILE_MESSAGE,
        REWARD_GRANTED,
    ];
}

/// Flat map from label keys to localized text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    entries: BTreeMap<String, String>,
}

impl StringTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label.
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    /// Look up a label.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a label, falling back to `default` when missing.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Whether a label is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Render a template label, replacing `{name}` placeholders with values.
    pub fn render(&self, key: &str, default: &str, args: &[(&str, &str)]) -> String {
        let mut out = self.get_or(key, default).to_string();
        for (name, value) in args {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_when_missing() {
        let table = StringTable::new().with("ending.victory.title", "SIEG");
        assert_eq!(table.get_or("ending.victory.title", "VICTORY"), "SIEG");
        assert_eq!(table.get_or("ending.defeat.title", "DEFEAT"), "DEFEAT");
    }

    #[test]
    fn render_replaces_placeholders() {
        let table = StringTable::new().with("reward.granted", "+1 {resource} charge");
        assert_eq!(
            table.render("reward.granted", "", &[("resource", "coalition")]),
            "+1 coalition charge"
        );
        assert_eq!(
            table.render("missing", "got {resource}", &[("resource", "prebunk")]),
            "got prebunk"
        );
    }
}
