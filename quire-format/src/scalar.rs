//! Totally ordered point values
//!
//! Aggregations collect the distinct lengths they observe into ordered sets.
//! `f32` is neither `Eq` nor `Ord`, so lengths are wrapped in [`Scalar`],
//! which orders by `f32::total_cmp` and folds `-0.0` into `0.0`.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A length in points with total equality and ordering.
#[derive(Default, Copy, Clone)]
pub struct Scalar(f32);

impl Scalar {
    pub fn new(value: f32) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Scalar> for f32 {
    fn from(scalar: Scalar) -> Self {
        scalar.0
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Format a point value the way it is written to attributes and strings.
///
/// Integral values drop the fractional part (`6` rather than `6.0`).
pub fn points(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1.0e9 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(Scalar::new(-0.0), Scalar::new(0.0));
    }

    #[test]
    fn sets_deduplicate_values() {
        let set: BTreeSet<Scalar> = [6.0, 3.0, 6.0].into_iter().map(Scalar::new).collect();
        let values: Vec<f32> = set.into_iter().map(Scalar::get).collect();
        assert_eq!(values, vec![3.0, 6.0]);
    }

    #[test]
    fn points_drops_integral_fraction() {
        assert_eq!(points(6.0), "6");
        assert_eq!(points(1.5), "1.5");
        assert_eq!(points(-2.0), "-2");
    }
}
