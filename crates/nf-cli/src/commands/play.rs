//! Line-driven play over stdin.

use std::cmp::Ordering;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use strsim::jaro_winkler;

use nf_core::{OutcomeCategory, ResponseKey};
use nf_engine::{EngineConfig, Ending, Playthrough, RestartTarget, RoundOutcome, Screen};
use nf_mood::{AudioResult, AudioSink, MoodAudioSelector, MoodState};

/// Minimum similarity for a "did you mean" suggestion.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Announces stream changes on stdout in place of real playback.
struct ConsoleSink;

impl AudioSink for ConsoleSink {
    fn start(&mut self, mood: MoodState) -> AudioResult<()> {
        println!("  {}", format!("~ ambient: {mood} ~").dimmed());
        Ok(())
    }

    fn stop(&mut self, _mood: MoodState) -> AudioResult<()> {
        Ok(())
    }
}

enum Flow {
    Continue,
    Quit,
}

struct Session {
    playthrough: Playthrough,
    audio: MoodAudioSelector<ConsoleSink>,
}

pub fn run(
    dir: Option<&Path>,
    seed: u64,
    mute: bool,
    charges: Option<u32>,
) -> Result<(), String> {
    let content = super::load_checked(dir)?;
    let mut config = EngineConfig::default().with_seed(seed);
    if let Some(n) = charges {
        config = config.with_initial_charges(n);
    }
    let playthrough =
        Playthrough::new(content, config).map_err(|e| format!("failed to start: {e}"))?;
    let audio = if mute {
        MoodAudioSelector::muted(ConsoleSink)
    } else {
        MoodAudioSelector::new(ConsoleSink)
    };
    let mut session = Session { playthrough, audio };

    println!("  {} Narrative Front", "Starting".bold());
    println!("  Seed: {seed} | Type 'help' for commands, 'quit' to exit.\n");
    session.render();

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.handle(input) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(msg) => println!("{}\n", msg.yellow()),
        }
    }

    session.audio.stop();
    Ok(())
}

impl Session {
    fn handle(&mut self, input: &str) -> Result<Flow, String> {
        let lower = input.to_lowercase();
        match lower.as_str() {
            "quit" | "q" | "exit" => return Ok(Flow::Quit),
            "help" | "?" => {
                self.help();
                return Ok(Flow::Continue);
            }
            "mute" => {
                self.audio.mute();
                println!("  Audio muted.\n");
                return Ok(Flow::Continue);
            }
            "unmute" => {
                println!("  Audio on.\n");
                if self.playthrough.screen() == Screen::Game {
                    self.audio.unmute(self.playthrough.meter());
                } else {
                    self.audio.lift_mute();
                }
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let screen = self.playthrough.screen();
        let result = match (screen, lower.as_str()) {
            (Screen::Start, "swear" | "yes" | "y") => self.playthrough.swear(),
            (Screen::Briefing, "start" | "begin") => self.playthrough.start_game(),
            (Screen::Briefing | Screen::Game, "doctrine") => self.playthrough.open_doctrine(),
            (Screen::Doctrine, "back") => self.playthrough.close_doctrine(),
            (Screen::Game, "next" | "n") => self.playthrough.proceed(),
            (Screen::End, "restart") => self.playthrough.restart(RestartTarget::Briefing),
            (Screen::End, "again") => self.playthrough.restart(RestartTarget::Game),
            (Screen::End, "report") => {
                println!("{}", self.playthrough.report());
                return Ok(Flow::Continue);
            }
            (Screen::Game, _) => return self.choose(input),
            _ => return Err(self.unknown(input)),
        };
        result.map_err(|e| e.to_string())?;
        self.render();
        Ok(Flow::Continue)
    }

    fn choose(&mut self, input: &str) -> Result<Flow, String> {
        if self.playthrough.state().pending.is_some() {
            return Err(self.unknown(input));
        }
        let options = self.playthrough.options().map_err(|e| e.to_string())?;
        let key = match input.parse::<usize>() {
            Ok(n) => options
                .get(n.wrapping_sub(1))
                .map(|o| o.key.clone())
                .ok_or_else(|| format!("pick a number from 1 to {}", options.len()))?,
            Err(_) => {
                let key = ResponseKey::new(input.to_lowercase());
                if !options.iter().any(|o| o.key == key) {
                    return Err(self.unknown(input));
                }
                key
            }
        };

        let outcome = self
            .playthrough
            .choose(&key)
            .map_err(|e| e.to_string())?
            .clone();
        self.show_outcome(&outcome);
        self.audio.evaluate(outcome.meter_after);
        Ok(Flow::Continue)
    }

    fn unknown(&self, input: &str) -> String {
        let candidates = self.candidates();
        let lower = input.to_lowercase();
        let best = candidates
            .iter()
            .map(|c| (c, jaro_winkler(&lower, c)))
            .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        match best {
            Some((c, _)) => format!("unknown command '{input}'. Did you mean '{c}'?"),
            None => format!("unknown command '{input}'. Type 'help' for commands."),
        }
    }

    /// Every input the current screen accepts.
    fn candidates(&self) -> Vec<String> {
        let mut out: Vec<String> = match self.playthrough.screen() {
            Screen::Start => vec!["swear".into()],
            Screen::Briefing => vec!["start".into(), "doctrine".into()],
            Screen::Doctrine => vec!["back".into()],
            Screen::Game if self.playthrough.state().pending.is_some() => {
                vec!["next".into(), "doctrine".into()]
            }
            Screen::Game => {
                let mut keys: Vec<String> = self
                    .playthrough
                    .options()
                    .map(|opts| opts.into_iter().map(|o| o.key.to_string()).collect())
                    .unwrap_or_default();
                keys.push("doctrine".into());
                keys
            }
            Screen::End => vec!["report".into(), "restart".into(), "again".into()],
        };
        out.extend(["help", "mute", "unmute", "quit"].map(String::from));
        out
    }

    fn render(&mut self) {
        match self.playthrough.screen() {
            Screen::Start => {
                self.audio.stop();
                println!("  {}", "THE OATH".bold());
                println!("  You are about to join the national resilience cell.");
                println!("  Type 'swear' to accept.\n");
            }
            Screen::Briefing => {
                self.audio.stop();
                println!("  {}", "BRIEFING".bold());
                println!(
                    "  An adversary will run {} influence operations against the public.",
                    self.playthrough.content().scenarios.len()
                );
                println!("  Keep society together: the meter runs from -5 to +5.");
                println!("  Type 'start' to begin or 'doctrine' to read the doctrine.\n");
            }
            Screen::Doctrine => {
                self.audio.stop();
                println!("  {}", "DOCTRINE".bold());
                println!("  Debunk what is false, amplify what is true, prebunk what is coming.");
                println!("  Coalitions and prebunking are scarce: spend them wisely.");
                println!("  Type 'back' to return.\n");
            }
            Screen::Game => {
                self.audio.evaluate(self.playthrough.meter());
                self.render_round();
            }
            Screen::End => {
                self.audio.stop();
                self.render_end();
            }
        }
    }

    fn render_round(&self) {
        let state = self.playthrough.state();
        let Some(scenario) = self.playthrough.current_scenario() else {
            return;
        };
        println!(
            "  {} | Meter {} | {}",
            format!("Round {} of {}", state.round + 1, state.deck.len()).bold(),
            gauge(&state.meter),
            self.audio.active().to_string().dimmed()
        );
        println!("  {} {}", "INJECT:".red().bold(), scenario.prompt);
        if let Ok(options) = self.playthrough.options() {
            for (i, opt) in options.iter().enumerate() {
                let label = match opt.charges {
                    Some(n) => format!("{} ({n} left)", opt.key),
                    None => opt.key.to_string(),
                };
                if opt.enabled {
                    println!("    {}) {label}", i + 1);
                } else {
                    println!("    {}", format!("{}) {label}", i + 1).dimmed());
                }
            }
        }
        println!();
    }

    fn show_outcome(&self, outcome: &RoundOutcome) {
        let category = outcome.resolution.category;
        let label = match category {
            OutcomeCategory::Success => category.to_string().green().bold(),
            OutcomeCategory::Neutral => category.to_string().yellow().bold(),
            OutcomeCategory::Failure => category.to_string().red().bold(),
        };
        println!("  {label}  {}", outcome.resolution.variant.text);
        println!(
            "  Meter {:+} -> {:+} ({:+})",
            outcome.meter_before,
            outcome.meter_after,
            outcome.applied_shift()
        );
        if let Some(resource) = &outcome.resolution.reward {
            println!("  {}", self.playthrough.reward_message(resource).cyan());
        }
        let next = if self.playthrough.state().is_last_round() {
            "see the outcome"
        } else {
            "continue"
        };
        println!("  Type 'next' to {next}.\n");
    }

    fn render_end(&self) {
        let Some(ending) = self.playthrough.ending() else {
            return;
        };
        let strings = &self.playthrough.content().strings;
        let title = match ending {
            Ending::Victory => ending.title(strings).green().bold(),
            Ending::Defeat => ending.title(strings).red().bold(),
            Ending::Fragile => ending.title(strings).yellow().bold(),
        };
        println!("  {title}");
        println!("  {}", ending.message(strings));
        println!("  Final meter: {}", gauge(&self.playthrough.state().meter));
        println!("  Type 'report', 'restart', 'again' or 'quit'.\n");
    }

    fn help(&self) {
        println!("  Commands on this screen:");
        for c in self.candidates() {
            println!("    {c}");
        }
        if self.playthrough.screen() == Screen::Game {
            println!("  Responses can also be picked by number.");
        }
        println!();
    }
}

fn gauge(meter: &nf_engine::Meter) -> String {
    let filled = (meter.gauge_fraction() * 10.0).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled.min(10)));
    let bar = if meter.value() <= -2 {
        bar.red()
    } else if meter.value() >= 2 {
        bar.green()
    } else {
        bar.yellow()
    };
    format!("{meter} [{bar}]")
}
