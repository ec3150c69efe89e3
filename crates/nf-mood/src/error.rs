use crate::audio::MoodState;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors reported by an [`AudioSink`](crate::audio::AudioSink).
///
/// The selector logs these and carries on; they never reach the game loop.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// A stream could not be started.
    #[error("failed to start the {mood} stream: {reason}")]
    PlaybackFailed {
        /// The stream that was requested.
        mood: MoodState,
        /// Backend-specific detail.
        reason: String,
    },

    /// A stream could not be stopped cleanly.
    #[error("failed to stop the {mood} stream: {reason}")]
    StopFailed {
        /// The stream being stopped.
        mood: MoodState,
        /// Backend-specific detail.
        reason: String,
    },
}
