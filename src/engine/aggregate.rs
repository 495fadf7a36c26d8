//! Reduction of recorded answers into per-dimension scores.

use serde::Serialize;

use crate::dimensions::{Dimension, DimensionDeltas, DimensionScores, NEUTRAL_SCORE};

/// Running sum and count of contributions for one dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Accumulator {
    pub total: u32,
    pub count: u32,
}

impl Accumulator {
    fn add(&mut self, value: u8) {
        self.total += u32::from(value);
        self.count += 1;
    }

    fn remove(&mut self, value: u8) {
        self.total -= u32::from(value);
        self.count -= 1;
    }

    /// Unrounded mean, or `None` before the first contribution.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| f64::from(self.total) / f64::from(self.count))
    }

    /// Mean rounded half up, or the neutral score when empty.
    pub fn score(&self) -> u8 {
        if self.count == 0 {
            return NEUTRAL_SCORE;
        }
        // Integer form of floor(total / count + 0.5).
        let rounded = (2 * self.total + self.count) / (2 * self.count);
        // Each contribution is at most 100, so the mean is too.
        rounded.min(100) as u8
    }
}

/// One accumulator per dimension, in [`Dimension::ALL`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DimensionAccumulators([Accumulator; Dimension::COUNT]);

impl DimensionAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild accumulators from scratch over a set of answers.
    pub fn from_answers<'a, I>(answers: I) -> Self
    where
        I: IntoIterator<Item = &'a DimensionDeltas>,
    {
        let mut accumulators = Self::new();
        for deltas in answers {
            accumulators.add(deltas);
        }
        accumulators
    }

    pub fn add(&mut self, deltas: &DimensionDeltas) {
        for (dimension, value) in deltas.iter() {
            self.0[dimension.index()].add(value);
        }
    }

    /// Exact inverse of [`add`](Self::add) for the same deltas.
    ///
    /// Only call with deltas previously added.
    pub fn remove(&mut self, deltas: &DimensionDeltas) {
        for (dimension, value) in deltas.iter() {
            self.0[dimension.index()].remove(value);
        }
    }

    pub fn get(&self, dimension: Dimension) -> Accumulator {
        self.0[dimension.index()]
    }

    /// Unrounded means with the neutral score for untouched dimensions.
    pub fn running_means(&self) -> [f64; Dimension::COUNT] {
        self.0
            .map(|acc| acc.mean().unwrap_or(f64::from(NEUTRAL_SCORE)))
    }

    pub fn scores(&self) -> DimensionScores {
        DimensionScores::new(self.0.map(|acc| acc.score()))
    }
}

/// Per-dimension rounded mean over all answers; 50 where nothing contributed.
pub fn aggregate<'a, I>(answers: I) -> DimensionScores
where
    I: IntoIterator<Item = &'a DimensionDeltas>,
{
    DimensionAccumulators::from_answers(answers).scores()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aggregate_empty_is_neutral() {
        let answers: [DimensionDeltas; 0] = [];
        assert_eq!(aggregate(&answers), DimensionScores::neutral());
    }

    #[test]
    fn test_aggregate_means_and_rounds() {
        let answers = [
            DimensionDeltas::new()
                .with(Dimension::Dominance, 85)
                .with(Dimension::Communication, 70),
            DimensionDeltas::new().with(Dimension::Dominance, 30),
            DimensionDeltas::new().with(Dimension::Dominance, 50),
        ];
        let scores = aggregate(&answers);
        // (85 + 30 + 50) / 3 = 55.0
        assert_eq!(scores.get(Dimension::Dominance), 55);
        assert_eq!(scores.get(Dimension::Communication), 70);
        assert_eq!(scores.get(Dimension::Fantasy), 50);
    }

    #[test]
    fn test_rounding_is_half_up() {
        let answers = [
            DimensionDeltas::new().with(Dimension::Sensory, 60),
            DimensionDeltas::new().with(Dimension::Sensory, 61),
        ];
        // 60.5 rounds up.
        assert_eq!(aggregate(&answers).get(Dimension::Sensory), 61);

        let answers = [
            DimensionDeltas::new().with(Dimension::Sensory, 10),
            DimensionDeltas::new().with(Dimension::Sensory, 10),
            DimensionDeltas::new().with(Dimension::Sensory, 11),
        ];
        // 10.33 rounds down.
        assert_eq!(aggregate(&answers).get(Dimension::Sensory), 10);
    }

    #[test]
    fn test_aggregate_is_pure() {
        let answers = [
            DimensionDeltas::new().with(Dimension::Intimacy, 90),
            DimensionDeltas::new().with(Dimension::Emotion, 15),
        ];
        assert_eq!(aggregate(&answers), aggregate(&answers));
    }

    #[test]
    fn test_remove_inverts_add() {
        let first = DimensionDeltas::new().with(Dimension::Fantasy, 95);
        let second = DimensionDeltas::new()
            .with(Dimension::Fantasy, 20)
            .with(Dimension::Adventure, 70);

        let mut acc = DimensionAccumulators::from_answers([&first]);
        let before = acc;
        acc.add(&second);
        assert_ne!(acc, before);
        acc.remove(&second);
        assert_eq!(acc, before);
    }

    #[test]
    fn test_running_means_are_unrounded() {
        let answers = [
            DimensionDeltas::new().with(Dimension::Atmosphere, 60),
            DimensionDeltas::new().with(Dimension::Atmosphere, 61),
        ];
        let means = DimensionAccumulators::from_answers(&answers).running_means();
        assert_eq!(means[Dimension::Atmosphere.index()], 60.5);
        assert_eq!(means[Dimension::Dominance.index()], 50.0);
    }
}
