pub mod check;
pub mod init;
pub mod intro;
pub mod play;
pub mod simulate;

use std::path::Path;

use colored::Colorize;
use nf_core::{Content, ValidationIssue};

/// Load content and refuse it if validation finds errors.
/// Errors are printed to stderr; warnings are left to `check`.
fn load_checked(dir: Option<&Path>) -> Result<Content, String> {
    let content = crate::content::load(dir)?;
    let errors: Vec<_> = content
        .validate()
        .into_iter()
        .filter(|i| i.is_error)
        .collect();
    if !errors.is_empty() {
        print_issues(&errors);
        return Err(format!("content has {} error(s)", errors.len()));
    }
    Ok(content)
}

fn print_issues(issues: &[ValidationIssue]) {
    for issue in issues {
        let line = issue.to_string();
        if issue.is_error {
            eprintln!("  {}", line.red());
        } else {
            eprintln!("  {}", line.yellow());
        }
    }
}

fn source_label(dir: Option<&Path>) -> String {
    dir.map(|d| format!("'{}'", d.display()))
        .unwrap_or_else(|| "the built-in demo".to_string())
}
