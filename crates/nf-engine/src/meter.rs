//! The cohesion meter and ending classification.
//!
//! The meter runs from -5 (fragmentation) to +5 (unity) and starts at 0.
//! Shifts that would leave the range are clamped, never wrapped.

use std::fmt;

use nf_core::StringTable;
use nf_core::strings::labels;
use serde::{Deserialize, Serialize};

/// Lowest meter value.
pub const METER_MIN: i32 = -5;
/// Highest meter value.
pub const METER_MAX: i32 = 5;
/// Final values at or above this are a victory.
pub const VICTORY_AT: i32 = 3;
/// Final values at or below this are a defeat.
pub const DEFEAT_AT: i32 = -3;

/// Bounded accumulator of narrative momentum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    value: i32,
}

impl Meter {
    /// Create a meter, clamped to the valid range.
    pub fn new(value: i32) -> Self {
        Self {
            value: value.clamp(METER_MIN, METER_MAX),
        }
    }

    /// Current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Apply a shift and return the clamped result.
    pub fn apply(&mut self, shift: i32) -> i32 {
        self.value = self.value.saturating_add(shift).clamp(METER_MIN, METER_MAX);
        self.value
    }

    /// Classify the current value.
    pub fn classify(&self) -> Ending {
        Ending::classify(self.value)
    }

    /// Position on a 0.0..=1.0 gauge, -5 at the left edge.
    pub fn gauge_fraction(&self) -> f64 {
        f64::from(self.value - METER_MIN) / f64::from(METER_MAX - METER_MIN)
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value > 0 {
            write!(f, "+{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// How a playthrough ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// Cohesion held.
    Victory,
    /// Narratives fractured.
    Defeat,
    /// Neither side prevailed.
    Fragile,
}

impl Ending {
    /// Classify a meter value.
    pub fn classify(value: i32) -> Self {
        if value >= VICTORY_AT {
            Self::Victory
        } else if value <= DEFEAT_AT {
            Self::Defeat
        } else {
            Self::Fragile
        }
    }

    /// All endings, best first.
    pub fn all() -> &'static [Self] {
        &[Self::Victory, Self::Fragile, Self::Defeat]
    }

    /// Localized title, with a built-in fallback.
    pub fn title<'a>(&self, strings: &'a StringTable) -> &'a str {
        match self {
            Self::Victory => strings.get_or(labels::VICTORY_TITLE, "RESILIENT VICTORY"),
            Self::Defeat => strings.get_or(labels::DEFEAT_TITLE, "COGNITIVE DEFEAT"),
            Self::Fragile => strings.get_or(labels::FRAGILE_TITLE, "FRAGILE STABILITY"),
        }
    }

    /// Localized closing message, with a built-in fallback.
    pub fn message<'a>(&self, strings: &'a StringTable) -> &'a str {
        match self {
            Self::Victory => strings.get_or(
                labels::VICTORY_MESSAGE,
                "The population remained resilient. Allies stood united and attempts to \
                 destabilize perception failed.",
            ),
            Self::Defeat => strings.get_or(
                labels::DEFEAT_MESSAGE,
                "Misinformation fractured alliances. Public support collapsed and adversary \
                 narratives gained dominance.",
            ),
            Self::Fragile => strings.get_or(
                labels::FRAGILE_MESSAGE,
                "Turbulence was real, but resilience held just enough to prevent collapse. \
                 Vigilance must be constant.",
            ),
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "VICTORY"),
            Self::Defeat => write!(f, "DEFEAT"),
            Self::Fragile => write!(f, "FRAGILE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(Meter::default().value(), 0);
    }

    #[test]
    fn clamped_on_creation() {
        assert_eq!(Meter::new(-9).value(), -5);
        assert_eq!(Meter::new(9).value(), 5);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(Ending::classify(3), Ending::Victory);
        assert_eq!(Ending::classify(-3), Ending::Defeat);
        assert_eq!(Ending::classify(2), Ending::Fragile);
        assert_eq!(Ending::classify(-2), Ending::Fragile);
        assert_eq!(Ending::classify(5), Ending::Victory);
        assert_eq!(Ending::classify(-5), Ending::Defeat);
    }

    #[test]
    fn three_big_successes_cap_at_five() {
        let mut m = Meter::default();
        for _ in 0..3 {
            m.apply(2);
        }
        assert_eq!(m.value(), 5);
        assert_eq!(m.classify(), Ending::Victory);
    }

    #[test]
    fn four_big_failures_floor_at_minus_five() {
        let mut m = Meter::default();
        for _ in 0..4 {
            m.apply(-2);
        }
        assert_eq!(m.value(), -5);
        assert_eq!(m.classify(), Ending::Defeat);
    }

    #[test]
    fn gauge_and_display() {
        assert_eq!(Meter::new(-5).gauge_fraction(), 0.0);
        assert_eq!(Meter::new(0).gauge_fraction(), 0.5);
        assert_eq!(Meter::new(5).gauge_fraction(), 1.0);
        assert_eq!(Meter::new(2).to_string(), "+2");
        assert_eq!(Meter::new(-1).to_string(), "-1");
        assert_eq!(Meter::new(0).to_string(), "0");
    }

    #[test]
    fn titles_prefer_string_table() {
        let strings = StringTable::new().with(labels::DEFEAT_TITLE, "NIEDERLAGE");
        assert_eq!(Ending::Defeat.title(&strings), "NIEDERLAGE");
        assert_eq!(Ending::Victory.title(&strings), "RESILIENT VICTORY");
    }

    proptest! {
        #[test]
        fn meter_never_leaves_range(shifts in proptest::collection::vec(any::<i32>(), 0..64)) {
            let mut m = Meter::default();
            for shift in shifts {
                let v = m.apply(shift);
                prop_assert!((METER_MIN..=METER_MAX).contains(&v));
            }
        }
    }
}
