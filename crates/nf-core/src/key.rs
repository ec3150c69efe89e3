use std::fmt;

use serde::{Deserialize, Serialize};

/// The name of a response category, e.g. `debunk` or `coalition`.
///
/// Keys are plain strings in content files. Whether a key is limited is
/// decided by the [`ChargeTable`](crate::ChargeTable), not by the key itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseKey(String);

impl ResponseKey {
    /// Create a key from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResponseKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How a resolved choice turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeCategory {
    /// The response landed.
    Success,
    /// The response had little effect either way.
    Neutral,
    /// The response backfired.
    Failure,
}

impl OutcomeCategory {
    /// All categories in partition order.
    pub fn all() -> &'static [Self] {
        &[Self::Success, Self::Neutral, Self::Failure]
    }
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Failure => write!(f, "FAILURE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_a_bare_json_string() {
        let key = ResponseKey::new("prebunk");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"prebunk\"");
    }

    #[test]
    fn category_uses_lowercase_names() {
        let cat: OutcomeCategory = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(cat, OutcomeCategory::Neutral);
        assert_eq!(cat.to_string(), "NEUTRAL");
    }
}
