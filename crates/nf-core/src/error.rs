use crate::validate::ValidationIssue;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while accepting content.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The content failed validation. Carries every issue found, warnings
    /// included, so callers can report them together.
    #[error(
        "content integrity error: {} problem(s), first: {}",
        .0.iter().filter(|i| i.is_error).count(),
        first_error(.0)
    )]
    ContentIntegrity(Vec<ValidationIssue>),
}

fn first_error(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .find(|i| i.is_error)
        .map(|i| i.to_string())
        .unwrap_or_else(|| "none".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_counts_errors_only() {
        let err = CoreError::ContentIntegrity(vec![
            ValidationIssue::warning("round 1", "duplicate round"),
            ValidationIssue::error("round 2 / debunk", "success threshold above neutral"),
        ]);
        let text = err.to_string();
        assert!(text.contains("1 problem(s)"));
        assert!(text.contains("success threshold above neutral"));
    }
}
