//! Presentation-side mood for Narrative Front.
//!
//! Two independent pieces live here. The [`MoodAudioSelector`] keeps exactly
//! one ambient stream in step with the cohesion meter. The [`CrowdAmbience`]
//! drives the intro screen's crowd reactions off an [`EventQueue`] of timed
//! actions, so the whole timeline can be cancelled at once on teardown.

/// Mood states and the ambient audio selector.
pub mod audio;
/// The intro crowd: mood ladder, reactions, and their driver.
pub mod crowd;
/// Error types for audio playback.
pub mod error;
/// A cancelable queue of timed actions.
pub mod schedule;

/// Re-exports of [`audio::AudioSink`], [`audio::MoodAudioSelector`], and [`audio::MoodState`].
pub use audio::{AudioSink, MoodAudioSelector, MoodState};
/// Re-exports of the crowd ambience types.
pub use crowd::{AmbienceConfig, CrowdAmbience, CrowdMood, Reaction};
/// Re-exports of [`error::AudioError`] and [`error::AudioResult`].
pub use error::{AudioError, AudioResult};
/// Re-export of [`schedule::EventQueue`].
pub use schedule::EventQueue;
