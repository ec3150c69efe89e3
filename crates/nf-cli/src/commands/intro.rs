use std::time::Duration;

use colored::Colorize;
use nf_core::SeededRandom;
use nf_mood::{AmbienceConfig, CrowdAmbience, CrowdMood};

/// Reactions shown per line.
const SHOWN: usize = 12;

pub fn run(seconds: u64, seed: u64) -> Result<(), String> {
    let mut crowd = CrowdAmbience::new(AmbienceConfig::default());
    let mut rng = SeededRandom::new(seed);
    crowd.start(Duration::ZERO);

    println!(
        "  {} {}",
        "Crowd".bold(),
        format!("({seconds}s, seed={seed})").dimmed()
    );
    println!();

    for second in 0..=seconds {
        let mood = crowd.advance(Duration::from_secs(second), &mut rng);
        let live = crowd.reactions();
        let shown: String = live
            .iter()
            .skip(live.len().saturating_sub(SHOWN))
            .map(|r| r.emoji)
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {:>3}s  {:<16} {:>3}  {shown}",
            second,
            colorize(mood),
            live.len()
        );
    }

    crowd.teardown();
    Ok(())
}

fn colorize(mood: CrowdMood) -> colored::ColoredString {
    let label = mood.to_string();
    match mood {
        CrowdMood::Happy => label.green(),
        CrowdMood::SlightlyMixed | CrowdMood::Mixed => label.yellow(),
        CrowdMood::MostlyNegative | CrowdMood::VeryNegative => label.red(),
        CrowdMood::Negative => label.red().bold(),
    }
}
