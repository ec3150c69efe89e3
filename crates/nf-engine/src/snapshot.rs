//! Save and restore of progression state around a digression.

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Screen};

/// A deep, independent copy of a [`GameState`].
///
/// Later changes to the live state never reach the snapshot, and restoring
/// hands back a fresh copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    state: GameState,
}

impl SessionSnapshot {
    /// Capture the given state.
    pub fn capture(state: &GameState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Produce a copy of the captured state.
    pub fn restore(&self) -> GameState {
        self.state.clone()
    }

    /// The screen the player left from.
    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Read-only view of the captured state.
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
