//! Content bundles on disk and the demo bundle compiled into the binary.

use std::fs;
use std::path::Path;

use nf_core::Content;
use serde::de::DeserializeOwned;

pub const SCENARIOS_FILE: &str = "scenarios.json";
pub const OUTCOMES_FILE: &str = "outcomes.json";
pub const STRINGS_FILE: &str = "strings.json";
pub const CHARGES_FILE: &str = "charges.json";

/// File name and text of every demo content file.
pub const DEMO_FILES: [(&str, &str); 4] = [
    (SCENARIOS_FILE, include_str!("../content/scenarios.json")),
    (OUTCOMES_FILE, include_str!("../content/outcomes.json")),
    (STRINGS_FILE, include_str!("../content/strings.json")),
    (CHARGES_FILE, include_str!("../content/charges.json")),
];

/// Load `dir`, or the demo bundle when no directory is given. Not validated.
pub fn load(dir: Option<&Path>) -> Result<Content, String> {
    match dir {
        Some(dir) => load_dir(dir),
        None => demo(),
    }
}

/// Read a bundle from a directory. `strings.json` is optional.
pub fn load_dir(dir: &Path) -> Result<Content, String> {
    if !dir.is_dir() {
        return Err(format!("'{}' is not a directory", dir.display()));
    }
    let strings_path = dir.join(STRINGS_FILE);
    let strings = if strings_path.exists() {
        read_json(dir, STRINGS_FILE)?
    } else {
        Default::default()
    };
    Ok(Content::new(
        read_json(dir, SCENARIOS_FILE)?,
        read_json(dir, OUTCOMES_FILE)?,
        strings,
        read_json(dir, CHARGES_FILE)?,
    ))
}

/// The demo bundle.
pub fn demo() -> Result<Content, String> {
    let [scenarios, outcomes, strings, charges] = DEMO_FILES;
    Ok(Content::new(
        parse(scenarios.0, scenarios.1)?,
        parse(outcomes.0, outcomes.1)?,
        parse(strings.0, strings.1)?,
        parse(charges.0, charges.1)?,
    ))
}

/// Write the demo bundle into an existing directory.
pub fn write_demo(dir: &Path) -> Result<(), String> {
    for (name, text) in DEMO_FILES {
        fs::write(dir.join(name), text).map_err(|e| format!("cannot write {name}: {e}"))?;
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, String> {
    let path = dir.join(name);
    let text =
        fs::read_to_string(&path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    parse(name, &text)
}

fn parse<T: DeserializeOwned>(name: &str, text: &str) -> Result<T, String> {
    serde_json::from_str(text).map_err(|e| format!("{name}: {e}"))
}
