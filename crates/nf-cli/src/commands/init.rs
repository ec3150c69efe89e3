use std::fs;
use std::path::Path;

use crate::content::{CHARGES_FILE, OUTCOMES_FILE, SCENARIOS_FILE, STRINGS_FILE};

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;
    crate::content::write_demo(dir)?;

    println!("Created content '{name}' in {name}/");
    println!("  {SCENARIOS_FILE:<15} injects and response thresholds");
    println!("  {OUTCOMES_FILE:<15} outcome text per response and result");
    println!("  {STRINGS_FILE:<15} ending titles and messages");
    println!("  {CHARGES_FILE:<15} limited responses and their starting charges");
    println!();
    println!("Get started:");
    println!("  nf check -d {name}      # Validate the content");
    println!("  nf play -d {name}       # Play it");
    println!("  nf simulate -d {name}   # See how it tends to end");

    Ok(())
}
