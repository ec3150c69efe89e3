//! Content model for Narrative Front.
//!
//! This crate defines the data the progression engine consumes: scenarios and
//! their response thresholds, the outcome bank, the localized string table,
//! and the charge table that marks which responses are limited. It also owns
//! the [`RandomSource`] seam every probabilistic operation draws from.
//!
//! Nothing here reads files. Content arrives already deserialized from the
//! surrounding application and is checked with [`Content::validate`].

/// The validated content bundle for one game.
pub mod content;
/// Error types used throughout the crate.
pub mod error;
/// Response keys and outcome categories.
pub mod key;
/// Outcome variants and the outcome bank.
pub mod outcome;
/// Uniform random draws in `[0, 1)`.
pub mod random;
/// Scenarios and their per-response thresholds.
pub mod scenario;
/// Localized label lookup.
pub mod strings;
/// Eager content validation.
pub mod validate;

/// Re-export content bundle types.
pub use content::{ChargeTable, Content};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export key types.
pub use key::{OutcomeCategory, ResponseKey};
/// Re-export outcome types.
pub use outcome::{OutcomeBank, OutcomeVariant};
/// Re-export random sources.
pub use random::{RandomSource, SeededRandom, SequenceRandom};
/// Re-export scenario types.
pub use scenario::{ResponseSpec, Scenario};
/// Re-export the string table.
pub use strings::StringTable;
/// Re-export validation types.
pub use validate::ValidationIssue;
