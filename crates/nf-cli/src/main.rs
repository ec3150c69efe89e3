//! Command-line frontend for Narrative Front.

mod commands;
mod content;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::simulate::Strategy;

#[derive(Parser)]
#[command(
    name = "nf",
    about = "Narrative Front: a disinformation-response tabletop exercise",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a content directory pre-filled with the demo scenarios
    Init {
        /// Name of the directory to create
        name: String,
    },

    /// Validate a content directory and report every issue
    Check {
        /// Content directory (default: built-in demo content)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Play interactively on stdin
    Play {
        /// Content directory (default: built-in demo content)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// RNG seed for a reproducible playthrough
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Start with ambient audio muted
        #[arg(long)]
        mute: bool,

        /// Override the starting charges of every limited response
        #[arg(long)]
        charges: Option<u32>,
    },

    /// Auto-play many runs and tabulate how they end
    Simulate {
        /// Content directory (default: built-in demo content)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Number of playthroughs
        #[arg(short, long, default_value = "100")]
        runs: u32,

        /// Seed of the first run; later runs use consecutive seeds
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// How the simulated player picks responses
        #[arg(long, value_enum, default_value_t = Strategy::Random)]
        strategy: Strategy,
    },

    /// Replay the intro crowd timeline as text
    Intro {
        /// Seconds of timeline to show
        #[arg(long, default_value = "20")]
        seconds: u64,

        /// RNG seed for the crowd reactions
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { dir } => commands::check::run(dir.as_deref()),
        Commands::Play {
            dir,
            seed,
            mute,
            charges,
        } => commands::play::run(dir.as_deref(), seed, mute, charges),
        Commands::Simulate {
            dir,
            runs,
            seed,
            strategy,
        } => commands::simulate::run(dir.as_deref(), runs, seed, strategy),
        Commands::Intro { seconds, seed } => commands::intro::run(seconds, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
