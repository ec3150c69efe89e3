use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AudioResult;

/// Meter value at or below which the mood is fracturing.
pub const FRACTURING_AT: i32 = -2;
/// Meter value at or above which the mood is unity.
pub const UNITY_AT: i32 = 2;

/// The ambient mood derived from the cohesion meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    /// Society is coming apart.
    Fracturing,
    /// Neither side has the upper hand.
    #[default]
    Neutral,
    /// Society is holding together.
    Unity,
}

impl MoodState {
    /// Map a meter value to a mood.
    pub fn evaluate(meter: i32) -> Self {
        if meter <= FRACTURING_AT {
            Self::Fracturing
        } else if meter >= UNITY_AT {
            Self::Unity
        } else {
            Self::Neutral
        }
    }

    /// All moods, darkest first.
    pub fn all() -> &'static [Self] {
        &[Self::Fracturing, Self::Neutral, Self::Unity]
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fracturing => write!(f, "fracturing"),
            Self::Neutral => write!(f, "neutral"),
            Self::Unity => write!(f, "unity"),
        }
    }
}

/// A playback backend with one looping stream per mood.
pub trait AudioSink {
    /// Start (or resume) the stream for `mood`.
    fn start(&mut self, mood: MoodState) -> AudioResult<()>;
    /// Stop the stream for `mood`.
    fn stop(&mut self, mood: MoodState) -> AudioResult<()>;
}

/// Keeps a single ambient stream matched to the meter.
///
/// `active` is the mood the meter calls for; `playing` is what the sink is
/// actually sounding. They differ while muted or after a failed start or stop.
/// A sink error is logged and swallowed, and the selector retries on the next
/// evaluation. A stream whose stop failed stays recorded as playing and no
/// other stream is started over it.
#[derive(Debug)]
pub struct MoodAudioSelector<S> {
    sink: S,
    active: MoodState,
    playing: Option<MoodState>,
    muted: bool,
}

impl<S: AudioSink> MoodAudioSelector<S> {
    /// A selector in the neutral mood with nothing playing.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            active: MoodState::Neutral,
            playing: None,
            muted: false,
        }
    }

    /// A selector that starts muted.
    pub fn muted(sink: S) -> Self {
        Self {
            muted: true,
            ..Self::new(sink)
        }
    }

    /// The mood the meter currently calls for.
    pub fn active(&self) -> MoodState {
        self.active
    }

    /// The stream that is sounding, if any.
    pub fn playing(&self) -> Option<MoodState> {
        self.playing
    }

    /// Whether playback is suspended.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The backend.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Bring playback in line with `meter` and return the active mood.
    pub fn evaluate(&mut self, meter: i32) -> MoodState {
        let target = MoodState::evaluate(meter);
        if target != self.active {
            tracing::debug!(from = %self.active, to = %target, meter, "mood changed");
            self.active = target;
        }
        if !self.muted && self.playing != Some(target) && self.halt() {
            self.begin(target);
        }
        self.active
    }

    /// Suspend playback. The active mood is kept.
    pub fn mute(&mut self) {
        self.muted = true;
        self.halt();
    }

    /// Resume playback for the current meter.
    pub fn unmute(&mut self, meter: i32) -> MoodState {
        self.muted = false;
        self.evaluate(meter)
    }

    /// Clear the mute flag without starting a stream. The next
    /// [`evaluate`](Self::evaluate) resumes playback.
    pub fn lift_mute(&mut self) {
        self.muted = false;
    }

    /// Stop whatever is playing, e.g. when the game view goes away.
    pub fn stop(&mut self) {
        self.halt();
    }

    /// Stop the playing stream. Returns whether the sink is now silent.
    fn halt(&mut self) -> bool {
        let Some(mood) = self.playing else {
            return true;
        };
        match self.sink.stop(mood) {
            Ok(()) => {
                self.playing = None;
                true
            }
            Err(e) => {
                tracing::warn!(mood = %mood, error = %e, "audio stop failed");
                false
            }
        }
    }

    fn begin(&mut self, mood: MoodState) {
        match self.sink.start(mood) {
            Ok(()) => self.playing = Some(mood),
            Err(e) => tracing::warn!(mood = %mood, error = %e, "audio start failed"),
        }
    }
}
