use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::key::ResponseKey;
use crate::outcome::OutcomeBank;
use crate::scenario::Scenario;
use crate::strings::StringTable;
use crate::validate::{ValidationIssue, validate_content};

/// Initial charge count for every limited response.
///
/// A response is limited exactly when it appears in this table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeTable {
    initial: BTreeMap<ResponseKey, u32>,
}

impl ChargeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a limited response with its starting charge count.
    pub fn with(mut self, key: impl Into<ResponseKey>, initial: u32) -> Self {
        self.initial.insert(key.into(), initial);
        self
    }

    /// Whether `key` draws from the charge economy.
    pub fn is_limited(&self, key: &ResponseKey) -> bool {
        self.initial.contains_key(key)
    }

    /// Starting count for a limited response.
    pub fn initial(&self, key: &ResponseKey) -> Option<u32> {
        self.initial.get(key).copied()
    }

    /// Iterate over `(key, initial)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ResponseKey, u32)> {
        self.initial.iter().map(|(k, v)| (k, *v))
    }

    /// Number of limited responses.
    pub fn len(&self) -> usize {
        self.initial.len()
    }

    /// Whether no limited responses are declared.
    pub fn is_empty(&self) -> bool {
        self.initial.is_empty()
    }
}

/// Everything the engine needs to run a playthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The scenario collection, in authored order.
    pub scenarios: Vec<Scenario>,
    /// Outcome text banks.
    pub outcomes: OutcomeBank,
    /// Localized labels.
    #[serde(default)]
    pub strings: StringTable,
    /// Limited responses and their starting charges.
    pub charges: ChargeTable,
}

impl Content {
    /// Bundle content without validating it.
    pub fn new(
        scenarios: Vec<Scenario>,
        outcomes: OutcomeBank,
        strings: StringTable,
        charges: ChargeTable,
    ) -> Self {
        Self {
            scenarios,
            outcomes,
            strings,
            charges,
        }
    }

    /// Collect every validation issue, errors and warnings alike.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_content(self)
    }

    /// Return the content if it has no validation errors.
    ///
    /// Warnings do not block acceptance.
    pub fn validated(self) -> CoreResult<Self> {
        let issues = self.validate();
        if issues.iter().any(|i| i.is_error) {
            return Err(CoreError::ContentIntegrity(issues));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_table_marks_limited() {
        let table = ChargeTable::new().with("prebunk", 1).with("coalition", 2);
        assert!(table.is_limited(&ResponseKey::new("prebunk")));
        assert!(!table.is_limited(&ResponseKey::new("debunk")));
        assert_eq!(table.initial(&ResponseKey::new("coalition")), Some(2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_content_is_rejected() {
        let result = Content::default().validated();
        assert!(matches!(result, Err(CoreError::ContentIntegrity(_))));
    }
}
