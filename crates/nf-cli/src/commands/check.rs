use std::path::Path;

pub fn run(dir: Option<&Path>) -> Result<(), String> {
    let content = crate::content::load(dir)?;
    let issues = content.validate();
    super::print_issues(&issues);

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "validation failed with {errors} error(s), {warnings} warning(s)"
        ));
    }

    println!("  All checks passed for {}.", super::source_label(dir));
    println!(
        "  {} scenarios, {} limited responses, {warnings} warning(s)",
        content.scenarios.len(),
        content.charges.len()
    );
    Ok(())
}
