//! Tri-state summary of a boolean property

use std::fmt::{self, Display, Formatter};

/// Join of the boolean values seen so far.
///
/// `include` only moves up the lattice `Invalid → AllTrue | AllFalse → Both`,
/// so the final state does not depend on the order values are included in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanAggregation {
    /// No value included yet.
    #[default]
    Invalid,
    AllTrue,
    AllFalse,
    Both,
}

impl BooleanAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(&mut self, value: bool) {
        *self = match (*self, value) {
            (Self::Invalid, true) | (Self::AllTrue, true) => Self::AllTrue,
            (Self::Invalid, false) | (Self::AllFalse, false) => Self::AllFalse,
            _ => Self::Both,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::Invalid;
    }

    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }

    pub fn all_true(self) -> bool {
        self == Self::AllTrue
    }

    pub fn all_false(self) -> bool {
        self == Self::AllFalse
    }

    /// True when both values were seen.
    pub fn both(self) -> bool {
        self == Self::Both
    }
}

impl FromIterator<bool> for BooleanAggregation {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut aggregation = Self::new();
        for value in iter {
            aggregation.include(value);
        }
        aggregation
    }
}

impl Display for BooleanAggregation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Invalid => "none",
            Self::AllTrue => "all true",
            Self::AllFalse => "all false",
            Self::Both => "mixed",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_invalid() {
        let aggregation = BooleanAggregation::new();
        assert!(!aggregation.is_valid());
        assert!(!aggregation.all_true());
        assert!(!aggregation.all_false());
    }

    #[test]
    fn transitions() {
        let mut aggregation = BooleanAggregation::new();
        aggregation.include(true);
        assert!(aggregation.all_true());
        aggregation.include(true);
        assert!(aggregation.all_true());
        aggregation.include(false);
        assert!(aggregation.both());
        aggregation.include(true);
        assert!(aggregation.both());

        aggregation.clear();
        aggregation.include(false);
        assert!(aggregation.all_false());
    }

    #[test]
    fn mixed_order_yields_both() {
        let forward: BooleanAggregation = [true, false].into_iter().collect();
        let backward: BooleanAggregation = [false, true].into_iter().collect();
        assert_eq!(forward, BooleanAggregation::Both);
        assert_eq!(backward, BooleanAggregation::Both);
    }

    proptest! {
        #[test]
        fn order_does_not_matter(values in prop::collection::vec(any::<bool>(), 0..32)) {
            let forward: BooleanAggregation = values.iter().copied().collect();
            let backward: BooleanAggregation = values.iter().rev().copied().collect();
            let mut sorted = values.clone();
            sorted.sort();
            let ordered: BooleanAggregation = sorted.into_iter().collect();

            prop_assert_eq!(forward, backward);
            prop_assert_eq!(forward, ordered);
        }

        #[test]
        fn matches_presence_of_values(values in prop::collection::vec(any::<bool>(), 0..32)) {
            let aggregation: BooleanAggregation = values.iter().copied().collect();
            let has_true = values.contains(&true);
            let has_false = values.contains(&false);
            let expected = match (has_true, has_false) {
                (false, false) => BooleanAggregation::Invalid,
                (true, false) => BooleanAggregation::AllTrue,
                (false, true) => BooleanAggregation::AllFalse,
                (true, true) => BooleanAggregation::Both,
            };
            prop_assert_eq!(aggregation, expected);
        }
    }
}
