//! The shuffled scenario sequence for one playthrough.

use nf_core::{RandomSource, Scenario};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A permutation of the loaded scenarios, fixed for one playthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDeck {
    scenarios: Vec<Scenario>,
}

impl ScenarioDeck {
    /// Shuffle `all` into a new deck with a Fisher–Yates pass driven by `rng`.
    ///
    /// Takes `len - 1` draws; every scenario appears exactly once.
    pub fn build(all: &[Scenario], rng: &mut dyn RandomSource) -> Self {
        let mut scenarios = all.to_vec();
        for i in (1..scenarios.len()).rev() {
            let j = rng.next_index(i + 1);
            scenarios.swap(i, j);
        }
        Self { scenarios }
    }

    /// The scenario at a zero-based position.
    pub fn at(&self, index: usize) -> EngineResult<&Scenario> {
        self.scenarios
            .get(index)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: self.scenarios.len(),
            })
    }

    /// Number of scenarios in the deck.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the deck is empty. Only true before a game starts.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Iterate over the scenarios in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::SequenceRandom;
    use proptest::prelude::*;

    fn scenarios(n: u32) -> Vec<Scenario> {
        (1..=n).map(|r| Scenario::new(r, format!("inject {r}"))).collect()
    }

    fn rounds(deck: &ScenarioDeck) -> Vec<u32> {
        deck.iter().map(|s| s.round).collect()
    }

    #[test]
    fn zero_draws_rotate_predictably() {
        // j = 0 at every step moves each tail element to the front in turn.
        let mut rng = SequenceRandom::new(vec![0.0]);
        let deck = ScenarioDeck::build(&scenarios(4), &mut rng);
        assert_eq!(rounds(&deck), vec![2, 3, 4, 1]);
        assert_eq!(rng.drawn(), 3);
    }

    #[test]
    fn high_draws_keep_order() {
        let mut rng = SequenceRandom::new(vec![0.999]);
        let deck = ScenarioDeck::build(&scenarios(5), &mut rng);
        assert_eq!(rounds(&deck), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn at_out_of_range() {
        let mut rng = SequenceRandom::new(vec![0.5]);
        let deck = ScenarioDeck::build(&scenarios(2), &mut rng);
        assert_eq!(deck.len(), 2);
        assert!(deck.at(1).is_ok());
        assert!(matches!(
            deck.at(2),
            Err(EngineError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn empty_input_builds_empty_deck() {
        let mut rng = SequenceRandom::new(vec![]);
        let deck = ScenarioDeck::build(&[], &mut rng);
        assert!(deck.is_empty());
        assert_eq!(rng.drawn(), 0);
    }

    proptest! {
        #[test]
        fn build_is_a_permutation(
            n in 0u32..24,
            draws in proptest::collection::vec(0.0f64..1.0, 1..32),
        ) {
            let input = scenarios(n);
            let mut rng = SequenceRandom::new(draws);
            let deck = ScenarioDeck::build(&input, &mut rng);

            prop_assert_eq!(deck.len(), input.len());
            let mut got = rounds(&deck);
            got.sort_unstable();
            let want: Vec<u32> = (1..=n).collect();
            prop_assert_eq!(got, want);
        }
    }
}
