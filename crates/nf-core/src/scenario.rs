//! Scenarios and the thresholds that partition each response's roll.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::{OutcomeCategory, ResponseKey};

/// Probabilities attached to one response of one scenario.
///
/// In content files this is the four-element array
/// `[success, neutral, reward_chance, reward_resource]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSpec", into = "RawSpec")]
pub struct ResponseSpec {
    /// Rolls below this value succeed.
    pub success_threshold: f64,
    /// Rolls at or above `success_threshold` and below this value are neutral.
    pub neutral_threshold: f64,
    /// Probability that `reward_resource` gains a charge.
    pub reward_chance: f64,
    /// The limited response rewarded on a winning reward roll.
    pub reward_resource: Option<ResponseKey>,
}

#[derive(Serialize, Deserialize)]
struct RawSpec(f64, f64, f64, Option<ResponseKey>);

impl From<RawSpec> for ResponseSpec {
    fn from(raw: RawSpec) -> Self {
        Self {
            success_threshold: raw.0,
            neutral_threshold: raw.1,
            reward_chance: raw.2,
            reward_resource: raw.3,
        }
    }
}

impl From<ResponseSpec> for RawSpec {
    fn from(spec: ResponseSpec) -> Self {
        RawSpec(
            spec.success_threshold,
            spec.neutral_threshold,
            spec.reward_chance,
            spec.reward_resource,
        )
    }
}

impl ResponseSpec {
    /// A spec with no reward.
    pub fn new(success_threshold: f64, neutral_threshold: f64) -> Self {
        Self {
            success_threshold,
            neutral_threshold,
            reward_chance: 0.0,
            reward_resource: None,
        }
    }

    /// Attach a reward roll for `resource`.
    pub fn with_reward(mut self, chance: f64, resource: impl Into<ResponseKey>) -> Self {
        self.reward_chance = chance;
        self.reward_resource = Some(resource.into());
        self
    }

    /// Map a roll in `[0, 1)` onto an outcome category.
    ///
    /// The partition is `[0, success)`, `[success, neutral)`, `[neutral, 1)`.
    pub fn categorize(&self, roll: f64) -> OutcomeCategory {
        if roll < self.success_threshold {
            OutcomeCategory::Success
        } else if roll < self.neutral_threshold {
            OutcomeCategory::Neutral
        } else {
            OutcomeCategory::Failure
        }
    }

    /// Whether some roll in `[0, 1)` lands in `category`.
    pub fn can_reach(&self, category: OutcomeCategory) -> bool {
        match category {
            OutcomeCategory::Success => self.success_threshold > 0.0,
            OutcomeCategory::Neutral => self.neutral_threshold > self.success_threshold,
            OutcomeCategory::Failure => self.neutral_threshold < 1.0,
        }
    }

    /// Whether the thresholds satisfy `0 <= success <= neutral <= 1`.
    pub fn thresholds_ordered(&self) -> bool {
        0.0 <= self.success_threshold
            && self.success_threshold <= self.neutral_threshold
            && self.neutral_threshold <= 1.0
    }
}

/// One adversary inject and the responses the player may choose from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Authored round number, used for display and diagnostics.
    pub round: u32,
    /// The inject text shown to the player.
    #[serde(rename = "inject")]
    pub prompt: String,
    /// Available responses keyed by category.
    pub responses: BTreeMap<ResponseKey, ResponseSpec>,
}

impl Scenario {
    /// Create a scenario with no responses.
    pub fn new(round: u32, prompt: impl Into<String>) -> Self {
        Self {
            round,
            prompt: prompt.into(),
            responses: BTreeMap::new(),
        }
    }

    /// Add a response to the scenario.
    pub fn with_response(mut self, key: impl Into<ResponseKey>, spec: ResponseSpec) -> Self {
        self.responses.insert(key.into(), spec);
        self
    }

    /// Look up the spec for a response key.
    pub fn response(&self, key: &ResponseKey) -> Option<&ResponseSpec> {
        self.responses.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_reads_from_array_form() {
        let spec: ResponseSpec = serde_json::from_str(r#"[0.3, 0.7, 0.25, "coalition"]"#).unwrap();
        assert_eq!(spec.success_threshold, 0.3);
        assert_eq!(spec.neutral_threshold, 0.7);
        assert_eq!(spec.reward_chance, 0.25);
        assert_eq!(spec.reward_resource, Some(ResponseKey::new("coalition")));

        let bare: ResponseSpec = serde_json::from_str("[0.5, 0.5, 0.0, null]").unwrap();
        assert!(bare.reward_resource.is_none());
    }

    #[test]
    fn categorize_boundaries() {
        let spec = ResponseSpec::new(0.3, 0.7);
        assert_eq!(spec.categorize(0.0), OutcomeCategory::Success);
        assert_eq!(spec.categorize(0.299), OutcomeCategory::Success);
        assert_eq!(spec.categorize(0.3), OutcomeCategory::Neutral);
        assert_eq!(spec.categorize(0.699), OutcomeCategory::Neutral);
        assert_eq!(spec.categorize(0.7), OutcomeCategory::Failure);
        assert_eq!(spec.categorize(0.999), OutcomeCategory::Failure);
    }

    #[test]
    fn reachability_follows_partition() {
        let always = ResponseSpec::new(1.0, 1.0);
        assert!(always.can_reach(OutcomeCategory::Success));
        assert!(!always.can_reach(OutcomeCategory::Neutral));
        assert!(!always.can_reach(OutcomeCategory::Failure));

        let never = ResponseSpec::new(0.0, 0.0);
        assert!(!never.can_reach(OutcomeCategory::Success));
        assert!(never.can_reach(OutcomeCategory::Failure));
    }

    #[test]
    fn ordering_check() {
        assert!(ResponseSpec::new(0.2, 0.6).thresholds_ordered());
        assert!(!ResponseSpec::new(0.6, 0.2).thresholds_ordered());
        assert!(!ResponseSpec::new(-0.1, 0.2).thresholds_ordered());
        assert!(!ResponseSpec::new(0.1, 1.2).thresholds_ordered());
    }

    #[test]
    fn scenario_uses_inject_field() {
        let json = r#"{"round": 2, "inject": "A rumor spreads", "responses": {"debunk": [0.4, 0.8, 0.0, null]}}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.round, 2);
        assert_eq!(scenario.prompt, "A rumor spreads");
        assert!(scenario.response(&ResponseKey::new("debunk")).is_some());
    }
}
