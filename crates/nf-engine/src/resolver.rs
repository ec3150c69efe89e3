//! Probabilistic resolution of a chosen response.
//!
//! A resolution takes up to three draws, always in this order:
//!
//! 1. the category roll, partitioned by the response's thresholds;
//! 2. the variant pick, uniform over the bank for that category;
//! 3. the reward roll, only when the response names a reward resource.
//!
//! No draw is reused across decisions, so a replayed source reproduces a
//! playthrough exactly.

use nf_core::{OutcomeBank, OutcomeCategory, OutcomeVariant, RandomSource, ResponseKey, Scenario};
use serde::{Deserialize, Serialize};

use crate::economy::ResourceEconomy;
use crate::error::{EngineError, EngineResult};

/// The result of resolving one choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Which bucket the category roll fell into.
    pub category: OutcomeCategory,
    /// The outcome drawn from the bank.
    pub variant: OutcomeVariant,
    /// The resource that gained a charge, if the reward roll succeeded.
    pub reward: Option<ResponseKey>,
}

/// Resolves choices against an outcome bank.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeResolver<'a> {
    outcomes: &'a OutcomeBank,
}

impl<'a> OutcomeResolver<'a> {
    /// Create a resolver over `outcomes`.
    pub fn new(outcomes: &'a OutcomeBank) -> Self {
        Self { outcomes }
    }

    /// Resolve `key` for `scenario`.
    ///
    /// Does not touch `economy`; the caller commits the charge spend and any
    /// reward after a successful resolution.
    pub fn resolve(
        &self,
        scenario: &Scenario,
        key: &ResponseKey,
        economy: &ResourceEconomy,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<Resolution> {
        let spec = scenario
            .response(key)
            .ok_or_else(|| EngineError::InvalidChoice {
                round: scenario.round,
                key: key.clone(),
            })?;
        economy.ensure_available(key)?;

        let roll = rng.next_f64();
        let category = spec.categorize(roll);

        let variants = self.outcomes.variants(key, category);
        if variants.is_empty() {
            return Err(EngineError::ContentIntegrity(format!(
                "no {category} outcomes for '{key}' in round {}",
                scenario.round
            )));
        }
        let variant = variants[rng.next_index(variants.len())].clone();

        let reward = match &spec.reward_resource {
            Some(resource) if rng.chance(spec.reward_chance) => Some(resource.clone()),
            _ => None,
        };

        tracing::trace!(
            round = scenario.round,
            key = %key,
            roll,
            category = %category,
            shift = variant.shift,
            reward = ?reward,
            "choice resolved"
        );

        Ok(Resolution {
            category,
            variant,
            reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::{ChargeTable, ResponseSpec, SeededRandom, SequenceRandom};

    fn bank() -> OutcomeBank {
        OutcomeBank::new()
            .with("debunk", OutcomeCategory::Success, OutcomeVariant::new(2, "s0"))
            .with("debunk", OutcomeCategory::Success, OutcomeVariant::new(1, "s1"))
            .with("debunk", OutcomeCategory::Neutral, OutcomeVariant::new(0, "n0"))
            .with("debunk", OutcomeCategory::Failure, OutcomeVariant::new(-2, "f0"))
            .with("prebunk", OutcomeCategory::Success, OutcomeVariant::new(3, "p0"))
            .with("prebunk", OutcomeCategory::Failure, OutcomeVariant::new(-1, "p1"))
    }

    fn scenario() -> Scenario {
        Scenario::new(4, "Deepfake of a minister")
            .with_response(
                "debunk",
                ResponseSpec::new(0.3, 0.7).with_reward(0.5, "coalition"),
            )
            .with_response("prebunk", ResponseSpec::new(0.6, 0.6))
    }

    fn economy() -> ResourceEconomy {
        ResourceEconomy::from_table(
            &ChargeTable::new().with("prebunk", 1).with("coalition", 1),
            None,
        )
    }

    fn key(s: &str) -> ResponseKey {
        ResponseKey::new(s)
    }

    #[test]
    fn draws_in_fixed_order() {
        let bank = bank();
        let resolver = OutcomeResolver::new(&bank);
        // category 0.1 -> success, variant 0.6 -> index 1, reward 0.4 < 0.5
        let mut rng = SequenceRandom::new(vec![0.1, 0.6, 0.4]);
        let res = resolver
            .resolve(&scenario(), &key("debunk"), &economy(), &mut rng)
            .unwrap();
        assert_eq!(res.category, OutcomeCategory::Success);
        assert_eq!(res.variant.text, "s1");
        assert_eq!(res.reward, Some(key("coalition")));
        assert_eq!(rng.drawn(), 3);
    }

    #[test]
    fn reward_roll_can_miss() {
        let bank = bank();
        let resolver = OutcomeResolver::new(&bank);
        let mut rng = SequenceRandom::new(vec![0.8, 0.0, 0.5]);
        let res = resolver
            .resolve(&scenario(), &key("debunk"), &economy(), &mut rng)
            .unwrap();
        assert_eq!(res.category, OutcomeCategory::Failure);
        assert_eq!(res.variant.shift, -2);
        assert_eq!(res.reward, None);
    }

    #[test]
    fn no_reward_roll_without_resource() {
        let bank = bank();
        let resolver = OutcomeResolver::new(&bank);
        let mut rng = SequenceRandom::new(vec![0.9, 0.0]);
        let res = resolver
            .resolve(&scenario(), &key("prebunk"), &economy(), &mut rng)
            .unwrap();
        assert_eq!(res.category, OutcomeCategory::Failure);
        assert_eq!(rng.drawn(), 2);
    }

    #[test]
    fn unknown_key_is_invalid_choice() {
        let bank = bank();
        let resolver = OutcomeResolver::new(&bank);
        let mut rng = SequenceRandom::new(vec![0.5]);
        let err = resolver
            .resolve(&scenario(), &key("amplify"), &economy(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidChoice { round: 4, .. }));
        assert_eq!(rng.drawn(), 0);
    }

    #[test]
    fn depleted_limited_response_rejected() {
        let bank = bank();
        let resolver = OutcomeResolver::new(&bank);
        let mut eco = economy();
        eco.consume(&key("prebunk")).unwrap();
        let mut rng = SequenceRandom::new(vec![0.1]);
        let err = resolver
            .resolve(&scenario(), &key("prebunk"), &eco, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientCharges(_)));
    }

    #[test]
    fn empty_bank_is_content_integrity_error() {
        let bank = OutcomeBank::new();
        let resolver = OutcomeResolver::new(&bank);
        let mut rng = SequenceRandom::new(vec![0.1]);
        let err = resolver
            .resolve(&scenario(), &key("debunk"), &economy(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::ContentIntegrity(_)));
    }

    #[test]
    fn category_rates_follow_thresholds() {
        let bank = bank();
        let resolver = OutcomeResolver::new(&bank);
        let scenario = Scenario::new(1, "x").with_response("debunk", ResponseSpec::new(0.3, 0.7));
        let eco = economy();
        let mut rng = SeededRandom::new(2024);

        let n = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let res = resolver
                .resolve(&scenario, &key("debunk"), &eco, &mut rng)
                .unwrap();
            let idx = match res.category {
                OutcomeCategory::Success => 0,
                OutcomeCategory::Neutral => 1,
                OutcomeCategory::Failure => 2,
            };
            counts[idx] += 1;
        }
        let rate = |c: usize| c as f64 / n as f64;
        assert!((rate(counts[0]) - 0.3).abs() < 0.02, "success {}", rate(counts[0]));
        assert!((rate(counts[1]) - 0.4).abs() < 0.02, "neutral {}", rate(counts[1]));
        assert!((rate(counts[2]) - 0.3).abs() < 0.02, "failure {}", rate(counts[2]));
    }
}
