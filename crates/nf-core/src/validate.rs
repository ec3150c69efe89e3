//! Eager validation of a content bundle.
//!
//! Checks threshold ordering, reward references, charge declarations, and
//! that every reachable response/category pair has outcome text. Problems are
//! collected rather than returned one at a time so authors can fix a whole
//! file in one pass.

use std::collections::BTreeSet;

use crate::content::Content;
use crate::key::{OutcomeCategory, ResponseKey};
use crate::scenario::{ResponseSpec, Scenario};
use crate::strings::labels;

/// Minimum number of limited responses a game must declare.
pub const MIN_LIMITED_RESPONSES: usize = 2;

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found, e.g. `round 3 / debunk`.
    pub location: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    /// Create an error-level issue.
    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: true,
        }
    }

    /// Create a warning-level issue.
    pub fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.location, self.message)
    }
}

/// Validate a content bundle, returning every issue found.
pub fn validate_content(content: &Content) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if content.scenarios.is_empty() {
        issues.push(ValidationIssue::error("scenarios", "no scenarios defined"));
    }

    if content.charges.len() < MIN_LIMITED_RESPONSES {
        issues.push(ValidationIssue::error(
            "charges",
            format!(
                "{} limited response(s) declared, at least {MIN_LIMITED_RESPONSES} required",
                content.charges.len()
            ),
        ));
    }

    let mut seen_rounds = BTreeSet::new();
    let mut offered: BTreeSet<&ResponseKey> = BTreeSet::new();
    for scenario in &content.scenarios {
        if !seen_rounds.insert(scenario.round) {
            issues.push(ValidationIssue::warning(
                format!("round {}", scenario.round),
                "duplicate round number",
            ));
        }
        if scenario.responses.is_empty() {
            issues.push(ValidationIssue::error(
                format!("round {}", scenario.round),
                "scenario offers no responses",
            ));
        } else if scenario
            .responses
            .keys()
            .all(|key| content.charges.is_limited(key))
        {
            issues.push(ValidationIssue::error(
                format!("round {}", scenario.round),
                "every response is limited, the round has no move once charges run out",
            ));
        }
        for (key, spec) in &scenario.responses {
            offered.insert(key);
            validate_response(content, scenario, key, spec, &mut issues);
        }
    }

    for (key, _) in content.charges.iter() {
        if !offered.contains(key) {
            issues.push(ValidationIssue::warning(
                format!("charges / {key}"),
                "limited response is never offered by any scenario",
            ));
        }
    }

    for label in labels::ALL {
        if !content.strings.contains(label) {
            issues.push(ValidationIssue::warning(
                "strings",
                format!("missing label '{label}', built-in text will be used"),
            ));
        }
    }

    issues
}

fn validate_response(
    content: &Content,
    scenario: &Scenario,
    key: &ResponseKey,
    spec: &ResponseSpec,
    issues: &mut Vec<ValidationIssue>,
) {
    let location = format!("round {} / {key}", scenario.round);

    if !spec.thresholds_ordered() {
        issues.push(ValidationIssue::error(
            &location,
            format!(
                "thresholds must satisfy 0 <= success ({}) <= neutral ({}) <= 1",
                spec.success_threshold, spec.neutral_threshold
            ),
        ));
        // Reachability is meaningless for a malformed partition.
        return;
    }

    if !(0.0..=1.0).contains(&spec.reward_chance) {
        issues.push(ValidationIssue::error(
            &location,
            format!("reward chance {} is outside [0, 1]", spec.reward_chance),
        ));
    }

    if let Some(resource) = &spec.reward_resource {
        if !content.charges.is_limited(resource) {
            issues.push(ValidationIssue::error(
                &location,
                format!("reward resource '{resource}' is not a limited response"),
            ));
        }
    } else if spec.reward_chance > 0.0 {
        issues.push(ValidationIssue::warning(
            &location,
            "reward chance set without a reward resource",
        ));
    }

    for &category in OutcomeCategory::all() {
        if spec.can_reach(category) && content.outcomes.variants(key, category).is_empty() {
            issues.push(ValidationIssue::error(
                &location,
                format!("no outcome text for reachable {category} result"),
            ));
        }
    }
}
