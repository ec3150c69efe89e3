//! Playthrough state: the value that snapshots capture.

use std::fmt;

use nf_core::{Content, RandomSource, ResponseKey};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::deck::ScenarioDeck;
use crate::economy::ResourceEconomy;
use crate::journal::Journal;
use crate::meter::Meter;
use crate::resolver::Resolution;

/// Which screen of the playthrough is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// The oath screen shown at launch.
    Start,
    /// Mission briefing before the first round.
    Briefing,
    /// The doctrine digression, reachable from briefing and game.
    Doctrine,
    /// The round loop.
    Game,
    /// The ending screen.
    End,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Briefing => write!(f, "briefing"),
            Self::Doctrine => write!(f, "doctrine"),
            Self::Game => write!(f, "game"),
            Self::End => write!(f, "end"),
        }
    }
}

/// A resolved round waiting for the player to acknowledge it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Authored round number of the scenario.
    pub round: u32,
    /// The response the player chose.
    pub response: ResponseKey,
    /// What the resolver produced.
    pub resolution: Resolution,
    /// Meter value before the shift.
    pub meter_before: i32,
    /// Meter value after the clamped shift.
    pub meter_after: i32,
}

impl RoundOutcome {
    /// The shift that actually landed after clamping.
    pub fn applied_shift(&self) -> i32 {
        self.meter_after - self.meter_before
    }
}

/// Everything that changes during a playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The active screen.
    pub screen: Screen,
    /// Zero-based position in the deck.
    pub round: usize,
    /// The cohesion meter.
    pub meter: Meter,
    /// Remaining charges.
    pub charges: ResourceEconomy,
    /// This playthrough's scenario order. Empty until a game starts.
    pub deck: ScenarioDeck,
    /// The last resolution, until the player proceeds.
    pub pending: Option<RoundOutcome>,
    /// Rounds played so far.
    pub journal: Journal,
}

impl GameState {
    /// State shown on `screen` before any game has been dealt.
    pub fn idle(screen: Screen, content: &Content, config: &EngineConfig) -> Self {
        Self {
            screen,
            round: 0,
            meter: Meter::default(),
            charges: ResourceEconomy::from_table(&content.charges, config.initial_charges),
            deck: ScenarioDeck::default(),
            pending: None,
            journal: Journal::new(),
        }
    }

    /// A new game at round 0 with a freshly shuffled deck.
    pub fn fresh_game(
        content: &Content,
        config: &EngineConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        Self {
            deck: ScenarioDeck::build(&content.scenarios, rng),
            ..Self::idle(Screen::Game, content, config)
        }
    }

    /// Whether the current round is the deck's last.
    pub fn is_last_round(&self) -> bool {
        self.round + 1 >= self.deck.len()
    }
}
