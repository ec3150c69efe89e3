use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nf_core::{Content, OutcomeCategory, RandomSource, ResponseKey, ResponseSpec, SeededRandom};
use nf_engine::{EngineConfig, Ending, Playthrough, ResponseOption, Screen};

/// How the simulated player picks a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Uniformly among the available responses.
    Random,
    /// The available response with the highest expected shift.
    Greedy,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Greedy => write!(f, "greedy"),
        }
    }
}

#[derive(Default)]
struct Usage {
    picks: u32,
    successes: u32,
}

#[derive(Default)]
struct Tally {
    endings: BTreeMap<&'static str, u32>,
    meter_sum: i64,
    rewards: u32,
    usage: BTreeMap<ResponseKey, Usage>,
}

pub fn run(dir: Option<&Path>, runs: u32, seed: u64, strategy: Strategy) -> Result<(), String> {
    if runs == 0 {
        return Err("--runs must be at least 1".into());
    }
    let content = super::load_checked(dir)?;

    let mut tally = Tally::default();
    for run in 0..runs {
        let run_seed = seed.wrapping_add(u64::from(run));
        let ending = play_one(&content, run_seed, strategy, &mut tally)?;
        *tally.endings.entry(ending_label(ending)).or_default() += 1;
    }

    println!(
        "  {} {} {}",
        "Simulation".bold(),
        super::source_label(dir),
        format!("({runs} runs, seed={seed}, strategy={strategy})").dimmed()
    );
    println!(
        "  Mean final meter: {:+.2} | Charges earned: {}",
        tally.meter_sum as f64 / f64::from(runs),
        tally.rewards
    );
    println!();

    println!("  {}", "Endings".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Ending", "Runs", "Share"]);
    for ending in Ending::all() {
        let count = tally
            .endings
            .get(ending_label(*ending))
            .copied()
            .unwrap_or(0);
        let share = f64::from(count) / f64::from(runs);
        let label = match ending {
            Ending::Victory => ending.title(&content.strings).green().to_string(),
            Ending::Defeat => ending.title(&content.strings).red().to_string(),
            Ending::Fragile => ending.title(&content.strings).yellow().to_string(),
        };
        table.add_row(vec![label, count.to_string(), format_share(share)]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Responses".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Response", "Picks", "Success rate"]);
    for (key, usage) in &tally.usage {
        let rate = if usage.picks == 0 {
            0.0
        } else {
            f64::from(usage.successes) / f64::from(usage.picks)
        };
        table.add_row(vec![
            key.to_string(),
            usage.picks.to_string(),
            format!("{:.0}%", rate * 100.0),
        ]);
    }
    println!("{table}");
    println!();

    Ok(())
}

fn play_one(
    content: &Content,
    seed: u64,
    strategy: Strategy,
    tally: &mut Tally,
) -> Result<Ending, String> {
    let mut p = Playthrough::new(content.clone(), EngineConfig::default().with_seed(seed))
        .map_err(|e| e.to_string())?;
    let mut picker = SeededRandom::new(!seed);

    p.swear().map_err(|e| e.to_string())?;
    p.start_game().map_err(|e| e.to_string())?;

    while p.screen() == Screen::Game {
        let options: Vec<ResponseOption> = p
            .options()
            .map_err(|e| e.to_string())?
            .into_iter()
            .filter(|o| o.enabled)
            .collect();
        let key = pick(&p, &options, strategy, &mut picker)
            .ok_or("no response is available this round")?;

        let outcome = p.choose(&key).map_err(|e| e.to_string())?;
        let usage = tally.usage.entry(key).or_default();
        usage.picks += 1;
        if outcome.resolution.category == OutcomeCategory::Success {
            usage.successes += 1;
        }
        if outcome.resolution.reward.is_some() {
            tally.rewards += 1;
        }
        p.proceed().map_err(|e| e.to_string())?;
    }

    tally.meter_sum += i64::from(p.meter());
    let ending = p.ending().ok_or("playthrough did not reach an ending")?;
    tracing::debug!(seed, meter = p.meter(), ending = %ending, "simulated run");
    Ok(ending)
}

fn pick(
    p: &Playthrough,
    options: &[ResponseOption],
    strategy: Strategy,
    rng: &mut dyn RandomSource,
) -> Option<ResponseKey> {
    if options.is_empty() {
        return None;
    }
    match strategy {
        Strategy::Random => Some(options[rng.next_index(options.len())].key.clone()),
        Strategy::Greedy => {
            let scenario = p.current_scenario()?;
            options
                .iter()
                .filter_map(|o| {
                    scenario
                        .response(&o.key)
                        .map(|spec| (o, expected_shift(p.content(), &o.key, spec)))
                })
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(o, _)| o.key.clone())
        }
    }
}

/// Mean shift of a response given its category probabilities.
fn expected_shift(content: &Content, key: &ResponseKey, spec: &ResponseSpec) -> f64 {
    let success = spec.success_threshold;
    let neutral = spec.neutral_threshold - spec.success_threshold;
    let failure = 1.0 - spec.neutral_threshold;
    [
        (OutcomeCategory::Success, success),
        (OutcomeCategory::Neutral, neutral),
        (OutcomeCategory::Failure, failure),
    ]
    .into_iter()
    .map(|(category, probability)| {
        let variants = content.outcomes.variants(key, category);
        if variants.is_empty() {
            return 0.0;
        }
        let mean = variants.iter().map(|v| f64::from(v.shift)).sum::<f64>() / variants.len() as f64;
        probability * mean
    })
    .sum()
}

fn ending_label(ending: Ending) -> &'static str {
    match ending {
        Ending::Victory => "victory",
        Ending::Defeat => "defeat",
        Ending::Fragile => "fragile",
    }
}

fn format_share(share: f64) -> String {
    let pct = share * 100.0;
    let filled = (share * 20.0).round() as usize;
    format!("{:>5.1}% {}", pct, "#".repeat(filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::{ChargeTable, OutcomeBank, OutcomeVariant, Scenario, StringTable};

    fn content() -> Content {
        Content::new(
            vec![
                Scenario::new(1, "x")
                    .with_response("safe", ResponseSpec::new(0.9, 1.0))
                    .with_response("prebunk", ResponseSpec::new(0.0, 0.0))
                    .with_response("coalition", ResponseSpec::new(0.0, 0.0))
                    .with_response("risky", ResponseSpec::new(0.1, 0.2)),
            ],
            OutcomeBank::new()
                .with("safe", OutcomeCategory::Success, OutcomeVariant::new(1, "s"))
                .with("safe", OutcomeCategory::Neutral, OutcomeVariant::new(0, "n"))
                .with("risky", OutcomeCategory::Success, OutcomeVariant::new(3, "s"))
                .with("risky", OutcomeCategory::Neutral, OutcomeVariant::new(0, "n"))
                .with("risky", OutcomeCategory::Failure, OutcomeVariant::new(-2, "f"))
                .with("prebunk", OutcomeCategory::Failure, OutcomeVariant::new(-3, "f"))
                .with("coalition", OutcomeCategory::Failure, OutcomeVariant::new(-3, "f")),
            StringTable::new(),
            ChargeTable::new().with("prebunk", 1).with("coalition", 1),
        )
    }

    #[test]
    fn expected_shift_weights_categories() {
        let c = content();
        let spec = c.scenarios[0].response(&ResponseKey::new("risky")).unwrap();
        let e = expected_shift(&c, &ResponseKey::new("risky"), spec);
        // 0.1 * 3 + 0.1 * 0 + 0.8 * -2
        assert!((e - -1.3).abs() < 1e-9, "{e}");
    }

    #[test]
    fn greedy_prefers_higher_expectation() {
        let mut p = Playthrough::new(content(), EngineConfig::default()).unwrap();
        p.swear().unwrap();
        p.start_game().unwrap();
        let options = p.options().unwrap();
        let mut rng = SeededRandom::new(1);
        let key = pick(&p, &options, Strategy::Greedy, &mut rng);
        assert_eq!(key, Some(ResponseKey::new("safe")));
    }

    #[test]
    fn share_bar() {
        assert_eq!(format_share(0.5), " 50.0% ##########");
        assert_eq!(format_share(0.0), "  0.0% ");
    }
}
