//! Charges for limited responses.

use std::collections::BTreeMap;

use nf_core::{ChargeTable, ResponseKey};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Remaining charges per limited response.
///
/// Counts never go below zero. Unlimited responses are not tracked and are
/// always available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEconomy {
    charges: BTreeMap<ResponseKey, u32>,
}

impl ResourceEconomy {
    /// Seed counts from the content's charge table, optionally overriding
    /// every starting count.
    pub fn from_table(table: &ChargeTable, override_initial: Option<u32>) -> Self {
        let charges = table
            .iter()
            .map(|(key, initial)| (key.clone(), override_initial.unwrap_or(initial)))
            .collect();
        Self { charges }
    }

    /// Whether `key` is a limited response.
    pub fn is_limited(&self, key: &ResponseKey) -> bool {
        self.charges.contains_key(key)
    }

    /// Remaining charges, or `None` for an unlimited response.
    pub fn count(&self, key: &ResponseKey) -> Option<u32> {
        self.charges.get(key).copied()
    }

    /// Whether the response may be chosen right now.
    pub fn is_available(&self, key: &ResponseKey) -> bool {
        self.count(key).is_none_or(|n| n > 0)
    }

    /// Fail with `InsufficientCharges` if a limited response is depleted.
    pub fn ensure_available(&self, key: &ResponseKey) -> EngineResult<()> {
        if self.is_available(key) {
            Ok(())
        } else {
            Err(EngineError::InsufficientCharges(key.clone()))
        }
    }

    /// Spend one charge. Returns the remaining count.
    pub fn consume(&mut self, key: &ResponseKey) -> EngineResult<u32> {
        let count = self
            .charges
            .get_mut(key)
            .ok_or_else(|| EngineError::NotLimited(key.clone()))?;
        if *count == 0 {
            return Err(EngineError::InsufficientCharges(key.clone()));
        }
        *count -= 1;
        Ok(*count)
    }

    /// Add one charge. Returns the new count.
    pub fn grant(&mut self, key: &ResponseKey) -> EngineResult<u32> {
        let count = self
            .charges
            .get_mut(key)
            .ok_or_else(|| EngineError::NotLimited(key.clone()))?;
        *count = count.saturating_add(1);
        Ok(*count)
    }

    /// Iterate over `(key, remaining)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ResponseKey, u32)> {
        self.charges.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ResponseKey {
        ResponseKey::new(s)
    }

    fn economy() -> ResourceEconomy {
        ResourceEconomy::from_table(
            &ChargeTable::new().with("prebunk", 1).with("coalition", 1),
            None,
        )
    }

    #[test]
    fn starts_from_table() {
        let eco = economy();
        assert_eq!(eco.count(&key("prebunk")), Some(1));
        assert_eq!(eco.count(&key("debunk")), None);
        assert!(eco.is_available(&key("debunk")));
    }

    #[test]
    fn override_replaces_initial_counts() {
        let eco = ResourceEconomy::from_table(&ChargeTable::new().with("prebunk", 1), Some(3));
        assert_eq!(eco.count(&key("prebunk")), Some(3));
    }

    #[test]
    fn consume_on_zero_fails_and_stays_zero() {
        let mut eco = economy();
        assert_eq!(eco.consume(&key("prebunk")).unwrap(), 0);
        let err = eco.consume(&key("prebunk")).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientCharges(_)));
        assert_eq!(eco.count(&key("prebunk")), Some(0));
        assert!(!eco.is_available(&key("prebunk")));
        assert!(eco.ensure_available(&key("prebunk")).is_err());
    }

    #[test]
    fn grant_has_no_upper_bound() {
        let mut eco = economy();
        for _ in 0..10 {
            eco.grant(&key("coalition")).unwrap();
        }
        assert_eq!(eco.count(&key("coalition")), Some(11));
    }

    #[test]
    fn unlimited_keys_are_not_tracked() {
        let mut eco = economy();
        assert!(matches!(
            eco.consume(&key("debunk")),
            Err(EngineError::NotLimited(_))
        ));
        assert!(matches!(
            eco.grant(&key("debunk")),
            Err(EngineError::NotLimited(_))
        ));
    }
}
