//! Threshold predicates over a profile, evaluated from static tables.

use crate::dimensions::{Dimension, DimensionScores};

/// A single threshold test on one dimension. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    AtLeast(Dimension, u8),
    AtMost(Dimension, u8),
    Between(Dimension, u8, u8),
}

impl Condition {
    pub fn holds(&self, scores: &DimensionScores) -> bool {
        match *self {
            Condition::AtLeast(d, min) => scores[d] >= min,
            Condition::AtMost(d, max) => scores[d] <= max,
            Condition::Between(d, min, max) => (min..=max).contains(&scores[d]),
        }
    }
}

/// A conjunction of conditions with the value it yields when all hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<T> {
    pub conditions: &'static [Condition],
    pub payload: T,
}

impl<T> Rule<T> {
    /// An empty condition list always matches.
    pub fn matches(&self, scores: &DimensionScores) -> bool {
        self.conditions.iter().all(|c| c.holds(scores))
    }
}

/// Payloads of every matching rule, in table order.
pub fn matching<'a, T>(
    rules: &'a [Rule<T>],
    scores: &'a DimensionScores,
) -> impl Iterator<Item = &'a T> + 'a {
    rules
        .iter()
        .filter(move |r| r.matches(scores))
        .map(|r| &r.payload)
}
