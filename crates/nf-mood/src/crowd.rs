//! The intro screen's crowd.
//!
//! A stream of emoji reactions floats up while the crowd's temper slides
//! from cheering to hostile along a fixed ladder of deadlines. Everything is
//! driven by one [`EventQueue`]: mood changes, spawns, and expiries are all
//! cues on it, so tearing the screen down is a single `cancel_all`.

use std::fmt;
use std::time::Duration;

use nf_core::RandomSource;
use serde::{Deserialize, Serialize};

use crate::schedule::EventQueue;

/// Reactions from a crowd that likes what it sees.
pub const HAPPY_EMOJI: &[&str] = &["👍", "❤️", "😊", "😍", "🔥", "✨", "💯", "🎉"];
/// Reactions from a frightened crowd.
pub const SAD_EMOJI: &[&str] = &["😢", "😰", "😨", "😱", "💔", "😞"];
/// Reactions from an angry crowd.
pub const ANGRY_EMOJI: &[&str] = &["😡", "😠", "🤬", "💢", "😤"];

/// How the intro crowd feels, from cheering to hostile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrowdMood {
    /// Only positive reactions.
    #[default]
    Happy,
    /// Mostly positive.
    SlightlyMixed,
    /// Even split.
    Mixed,
    /// Mostly negative.
    MostlyNegative,
    /// Nearly all negative.
    VeryNegative,
    /// Only negative, weighted toward anger.
    Negative,
}

impl CrowdMood {
    /// Probability that a reaction is drawn from the happy set.
    pub fn happy_share(self) -> f64 {
        match self {
            Self::Happy => 1.0,
            Self::SlightlyMixed => 0.8,
            Self::Mixed => 0.5,
            Self::MostlyNegative => 0.25,
            Self::VeryNegative => 0.1,
            Self::Negative => 0.0,
        }
    }

    /// Draw one reaction emoji for this mood.
    pub fn sample(self, rng: &mut dyn RandomSource) -> &'static str {
        match self {
            Self::Happy => pick(&[HAPPY_EMOJI], rng),
            Self::Negative => pick(&[SAD_EMOJI, ANGRY_EMOJI, ANGRY_EMOJI], rng),
            mixed => {
                if rng.chance(mixed.happy_share()) {
                    pick(&[HAPPY_EMOJI], rng)
                } else {
                    pick(&[SAD_EMOJI, ANGRY_EMOJI], rng)
                }
            }
        }
    }
}

impl fmt::Display for CrowdMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Happy => write!(f, "happy"),
            Self::SlightlyMixed => write!(f, "slightly-mixed"),
            Self::Mixed => write!(f, "mixed"),
            Self::MostlyNegative => write!(f, "mostly-negative"),
            Self::VeryNegative => write!(f, "very-negative"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Uniform pick over the concatenation of `pools`.
fn pick(pools: &[&[&'static str]], rng: &mut dyn RandomSource) -> &'static str {
    let total: usize = pools.iter().map(|p| p.len()).sum();
    let mut index = rng.next_index(total);
    for pool in pools {
        if index < pool.len() {
            return pool[index];
        }
        index -= pool.len();
    }
    ""
}

/// Timing of the intro crowd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbienceConfig {
    /// Time between reaction spawns. Zero disables spawning.
    pub spawn_interval: Duration,
    /// Mood changes as offsets from the start of the intro.
    pub ladder: Vec<(Duration, CrowdMood)>,
    /// Shortest time a reaction stays on screen.
    pub min_lifetime: Duration,
    /// Extra lifetime drawn uniformly on top of the minimum.
    pub lifetime_spread: Duration,
    /// Longest start delay of a reaction's animation.
    pub max_delay: Duration,
}

impl Default for AmbienceConfig {
    fn default() -> Self {
        let secs = Duration::from_secs;
        Self {
            spawn_interval: Duration::from_millis(300),
            ladder: vec![
                (secs(3), CrowdMood::SlightlyMixed),
                (secs(7), CrowdMood::Mixed),
                (secs(11), CrowdMood::MostlyNegative),
                (secs(15), CrowdMood::VeryNegative),
                (secs(19), CrowdMood::Negative),
            ],
            min_lifetime: secs(4),
            lifetime_spread: secs(2),
            max_delay: Duration::from_millis(500),
        }
    }
}

/// One floating reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Unique within one ambience run.
    pub id: u64,
    /// The emoji shown.
    pub emoji: &'static str,
    /// Horizontal position in percent of the width.
    pub x: f64,
    /// Sideways drift in pixels, `-50..50`.
    pub drift: f64,
    /// Font size in pixels, `30..60`.
    pub size: f64,
    /// When the reaction was spawned.
    pub spawned_at: Duration,
    /// Animation start delay.
    pub delay: Duration,
    /// Animation length.
    pub lifetime: Duration,
}

impl Reaction {
    /// When the reaction leaves the screen.
    pub fn expires_at(&self) -> Duration {
        self.spawned_at + self.delay + self.lifetime
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cue {
    Mood(CrowdMood),
    Spawn,
    Expire(u64),
}

/// Drives the crowd off a single event queue.
#[derive(Debug)]
pub struct CrowdAmbience {
    config: AmbienceConfig,
    queue: EventQueue<Cue>,
    mood: CrowdMood,
    reactions: Vec<Reaction>,
    next_id: u64,
}

impl CrowdAmbience {
    /// An idle ambience. Call [`CrowdAmbience::start`] to arm it.
    pub fn new(config: AmbienceConfig) -> Self {
        Self {
            config,
            queue: EventQueue::new(),
            mood: CrowdMood::Happy,
            reactions: Vec::new(),
            next_id: 0,
        }
    }

    /// Arm the mood ladder and the spawn loop relative to `now`.
    ///
    /// Anything already pending is torn down first, so calling this twice
    /// never doubles the spawn rate. The mood is left as it is.
    pub fn start(&mut self, now: Duration) {
        self.teardown();
        for (offset, mood) in &self.config.ladder {
            self.queue.schedule(now + *offset, Cue::Mood(*mood));
        }
        if !self.config.spawn_interval.is_zero() {
            self.queue
                .schedule(now + self.config.spawn_interval, Cue::Spawn);
        }
        tracing::debug!(cues = self.queue.len(), "crowd ambience armed");
    }

    /// Back to a happy, empty crowd with the ladder re-armed from `now`.
    pub fn restart(&mut self, now: Duration) {
        self.mood = CrowdMood::Happy;
        self.start(now);
    }

    /// Cancel every pending cue and clear the screen.
    pub fn teardown(&mut self) {
        self.queue.cancel_all();
        self.reactions.clear();
    }

    /// Whether any cue is still pending.
    pub fn is_running(&self) -> bool {
        !self.queue.is_empty()
    }

    /// The crowd's current temper.
    pub fn mood(&self) -> CrowdMood {
        self.mood
    }

    /// Reactions currently on screen, oldest first.
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Run every cue due at or before `now`.
    ///
    /// Spawns reschedule themselves, so a large jump in `now` replays the
    /// whole interval cue by cue.
    pub fn advance(&mut self, now: Duration, rng: &mut dyn RandomSource) -> CrowdMood {
        loop {
            let due = self.queue.drain_due(now);
            if due.is_empty() {
                break;
            }
            for (at, cue) in due {
                match cue {
                    Cue::Mood(mood) => {
                        tracing::debug!(from = %self.mood, to = %mood, "crowd mood shifted");
                        self.mood = mood;
                    }
                    Cue::Spawn => {
                        let reaction = self.spawn(at, rng);
                        self.queue
                            .schedule(reaction.expires_at(), Cue::Expire(reaction.id));
                        self.queue
                            .schedule(at + self.config.spawn_interval, Cue::Spawn);
                        self.reactions.push(reaction);
                    }
                    Cue::Expire(id) => self.reactions.retain(|r| r.id != id),
                }
            }
        }
        self.mood
    }

    fn spawn(&mut self, at: Duration, rng: &mut dyn RandomSource) -> Reaction {
        let id = self.next_id;
        self.next_id += 1;
        let drift = (rng.next_f64() - 0.5) * 100.0;
        let emoji = self.mood.sample(rng);
        let x = rng.next_f64() * 100.0;
        let delay = self.config.max_delay.mul_f64(rng.next_f64());
        let lifetime = self.config.min_lifetime + self.config.lifetime_spread.mul_f64(rng.next_f64());
        let size = 30.0 + rng.next_f64() * 30.0;
        Reaction {
            id,
            emoji,
            x,
            drift,
            size,
            spawned_at: at,
            delay,
            lifetime,
        }
    }
}
