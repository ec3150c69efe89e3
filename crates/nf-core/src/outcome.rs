use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::{OutcomeCategory, ResponseKey};

/// A concrete narrative outcome and its effect on the meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeVariant {
    /// Signed meter shift applied when this variant is drawn.
    pub shift: i32,
    /// Feedback text shown to the player.
    pub text: String,
}

impl OutcomeVariant {
    /// Create a new variant.
    pub fn new(shift: i32, text: impl Into<String>) -> Self {
        Self {
            shift,
            text: text.into(),
        }
    }
}

/// Outcome text banks keyed by response and category.
///
/// Serialized as `{ "<response>": { "success": [...], "neutral": [...], ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeBank {
    banks: BTreeMap<ResponseKey, BTreeMap<OutcomeCategory, Vec<OutcomeVariant>>>,
}

impl OutcomeBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant for a response and category.
    pub fn insert(
        &mut self,
        key: impl Into<ResponseKey>,
        category: OutcomeCategory,
        variant: OutcomeVariant,
    ) {
        self.banks
            .entry(key.into())
            .or_default()
            .entry(category)
            .or_default()
            .push(variant);
    }

    /// Builder form of [`OutcomeBank::insert`].
    pub fn with(
        mut self,
        key: impl Into<ResponseKey>,
        category: OutcomeCategory,
        variant: OutcomeVariant,
    ) -> Self {
        self.insert(key, category, variant);
        self
    }

    /// The variants for a combination. Missing combinations yield an empty slice.
    pub fn variants(&self, key: &ResponseKey, category: OutcomeCategory) -> &[OutcomeVariant] {
        self.banks
            .get(key)
            .and_then(|by_cat| by_cat.get(&category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Response keys that have at least one bank.
    pub fn keys(&self) -> impl Iterator<Item = &ResponseKey> {
        self.banks.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_json() {
        let json = r#"{
            "debunk": {
                "success": [{"shift": 2, "text": "The myth collapses."}],
                "failure": [{"shift": -1, "text": "The correction spreads the rumor."}]
            }
        }"#;
        let bank: OutcomeBank = serde_json::from_str(json).unwrap();
        let key = ResponseKey::new("debunk");
        assert_eq!(bank.variants(&key, OutcomeCategory::Success)[0].shift, 2);
        assert!(bank.variants(&key, OutcomeCategory::Neutral).is_empty());
    }

    #[test]
    fn unknown_key_is_empty() {
        let bank = OutcomeBank::new();
        assert!(bank.variants(&ResponseKey::new("x"), OutcomeCategory::Failure).is_empty());
    }

    #[test]
    fn insert_preserves_order() {
        let bank = OutcomeBank::new()
            .with("ignore", OutcomeCategory::Neutral, OutcomeVariant::new(0, "first"))
            .with("ignore", OutcomeCategory::Neutral, OutcomeVariant::new(1, "second"));
        let texts: Vec<_> = bank
            .variants(&ResponseKey::new("ignore"), OutcomeCategory::Neutral)
            .iter()
            .map(|v| v.text.as_str())
            .collect();
        assert_eq!(texts, ["first", "second"]);
    }
}
