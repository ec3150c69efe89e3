//! Error types for the progression engine.

use nf_core::{CoreError, ResponseKey};

use crate::state::Screen;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while advancing a playthrough.
///
/// None of these leave the meter or charge counts partially updated.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The response key is not offered by the current scenario.
    #[error("invalid choice '{key}' for round {round}")]
    InvalidChoice {
        /// Authored round number of the scenario.
        round: u32,
        /// The rejected key.
        key: ResponseKey,
    },

    /// A limited response was chosen with no charges left.
    #[error("no charges left for '{0}'")]
    InsufficientCharges(ResponseKey),

    /// A charge operation named a response that is not limited.
    #[error("'{0}' is not a limited response")]
    NotLimited(ResponseKey),

    /// Content that passed loading turned out to be incomplete.
    #[error("content integrity error: {0}")]
    ContentIntegrity(String),

    /// A deck position past the end was requested.
    #[error("round index {index} is out of range for a deck of {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The deck length.
        len: usize,
    },

    /// The requested transition is not allowed from the current screen.
    #[error("cannot {action} from the {screen} screen")]
    InvalidTransition {
        /// The screen the playthrough was on.
        screen: Screen,
        /// What was attempted.
        action: &'static str,
    },

    /// Content rejected during validation.
    #[error(transparent)]
    Core(#[from] CoreError),
}
