//! Game-progression engine for Narrative Front.
//!
//! A [`Playthrough`] owns one shuffled [`ScenarioDeck`], one [`Meter`], and one
//! [`ResourceEconomy`]. Each round the player picks a response; the
//! [`OutcomeResolver`] turns random draws into an outcome category, a concrete
//! outcome variant, and an optional bonus charge. When the deck runs out the
//! final meter value classifies the playthrough into an [`Ending`].
//!
//! Leaving the play loop for the doctrine digression captures a
//! [`SessionSnapshot`] that is restored on return.

pub mod config;
pub mod deck;
pub mod economy;
pub mod error;
pub mod journal;
pub mod meter;
pub mod playthrough;
pub mod resolver;
pub mod snapshot;
pub mod state;

pub use config::EngineConfig;
pub use deck::ScenarioDeck;
pub use economy::ResourceEconomy;
pub use error::{EngineError, EngineResult};
pub use journal::{Journal, RoundRecord};
pub use meter::{Ending, Meter};
pub use playthrough::{Playthrough, ResponseOption, RestartTarget};
pub use resolver::{OutcomeResolver, Resolution};
pub use snapshot::SessionSnapshot;
pub use state::{GameState, RoundOutcome, Screen};
