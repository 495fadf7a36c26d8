//! The eight bipolar axes every profile is measured on.
//!
//! All vector math in the engine is positional over [`Dimension::ALL`], so the
//! declaration order of the enum is load-bearing.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Score assumed for a dimension nobody has contributed to yet.
pub const NEUTRAL_SCORE: u8 = 50;

/// Upper bound for every score and contribution.
pub const MAX_SCORE: u8 = 100;

/// One of the eight fixed axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Dominance,
    Emotion,
    Adventure,
    Sensory,
    Atmosphere,
    Communication,
    Intimacy,
    Fantasy,
}

impl Dimension {
    pub const COUNT: usize = 8;

    pub const ALL: [Dimension; Self::COUNT] = [
        Dimension::Dominance,
        Dimension::Emotion,
        Dimension::Adventure,
        Dimension::Sensory,
        Dimension::Atmosphere,
        Dimension::Communication,
        Dimension::Intimacy,
        Dimension::Fantasy,
    ];

    /// Position of this dimension in every 8-tuple.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable machine key, as used in question data and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Dominance => "dominance",
            Dimension::Emotion => "emotion",
            Dimension::Adventure => "adventure",
            Dimension::Sensory => "sensory",
            Dimension::Atmosphere => "atmosphere",
            Dimension::Communication => "communication",
            Dimension::Intimacy => "intimacy",
            Dimension::Fantasy => "fantasy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Dominance => "Dominance",
            Dimension::Emotion => "Emotion",
            Dimension::Adventure => "Adventure",
            Dimension::Sensory => "Sensory",
            Dimension::Atmosphere => "Atmosphere",
            Dimension::Communication => "Communication",
            Dimension::Intimacy => "Intimacy",
            Dimension::Fantasy => "Fantasy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Dimension::Dominance => "Tendency to lead or follow in relationships",
            Dimension::Emotion => "Importance of emotional connection",
            Dimension::Adventure => "Openness to new experiences",
            Dimension::Sensory => "Preference for sensory stimulation",
            Dimension::Atmosphere => "Importance of setting and environment",
            Dimension::Communication => "Preferred communication style",
            Dimension::Intimacy => "Preferred depth of closeness",
            Dimension::Fantasy => "Preference for imagination and role play",
        }
    }

    /// Label for the 0 end of the axis.
    pub fn low_label(self) -> &'static str {
        match self {
            Dimension::Dominance => "Receptive",
            Dimension::Emotion => "Independent",
            Dimension::Adventure => "Stability-seeking",
            Dimension::Sensory => "Emotional",
            Dimension::Atmosphere => "Spontaneous",
            Dimension::Communication => "Non-verbal",
            Dimension::Intimacy => "Casual",
            Dimension::Fantasy => "Realistic",
        }
    }

    /// Label for the 100 end of the axis.
    pub fn high_label(self) -> &'static str {
        match self {
            Dimension::Dominance => "Dominant",
            Dimension::Emotion => "Connection-driven",
            Dimension::Adventure => "Thrill-seeking",
            Dimension::Sensory => "Sensual",
            Dimension::Atmosphere => "Mood-driven",
            Dimension::Communication => "Verbal",
            Dimension::Intimacy => "Deep",
            Dimension::Fantasy => "Imaginative",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown dimension '{s}'"))
    }
}

/// A complete profile: one 0-100 score per dimension.
///
/// Serialized as a `{ "dominance": 62, ... }` map. Dimensions missing from the
/// input map default to [`NEUTRAL_SCORE`]; unknown keys are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<Dimension, u8>",
    try_from = "BTreeMap<String, u8>"
)]
pub struct DimensionScores([u8; Dimension::COUNT]);

impl DimensionScores {
    /// Build a profile from positional values, capping each at 100.
    pub fn new(values: [u8; Dimension::COUNT]) -> Self {
        Self(values.map(|v| v.min(MAX_SCORE)))
    }

    /// Const constructor for static tables. Values must already be in 0..=100.
    pub const fn from_values(values: [u8; Dimension::COUNT]) -> Self {
        Self(values)
    }

    /// Every dimension at [`NEUTRAL_SCORE`].
    pub fn neutral() -> Self {
        Self([NEUTRAL_SCORE; Dimension::COUNT])
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        self.0[dimension.index()]
    }

    pub fn with(mut self, dimension: Dimension, value: u8) -> Self {
        self.0[dimension.index()] = value.min(MAX_SCORE);
        self
    }

    pub fn values(&self) -> [u8; Dimension::COUNT] {
        self.0
    }

    pub fn to_f64(&self) -> [f64; Dimension::COUNT] {
        self.0.map(f64::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

impl Default for DimensionScores {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Index<Dimension> for DimensionScores {
    type Output = u8;

    fn index(&self, dimension: Dimension) -> &u8 {
        &self.0[dimension.index()]
    }
}

impl From<DimensionScores> for BTreeMap<Dimension, u8> {
    fn from(scores: DimensionScores) -> Self {
        scores.iter().collect()
    }
}

impl TryFrom<BTreeMap<String, u8>> for DimensionScores {
    type Error = String;

    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        let mut scores = Self::neutral();
        for (key, value) in map {
            let Some(dimension) = Dimension::from_key(&key) else {
                tracing::debug!(key, "Ignoring score for unknown dimension");
                continue;
            };
            if value > MAX_SCORE {
                return Err(format!("score {value} for {dimension} is above {MAX_SCORE}"));
            }
            scores.0[dimension.index()] = value;
        }
        Ok(scores)
    }
}

/// Parses `"80,50,90,65,45,55,50,70"` in [`Dimension::ALL`] order.
impl FromStr for DimensionScores {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != Dimension::COUNT {
            return Err(format!(
                "expected {} comma-separated scores, got {}",
                Dimension::COUNT,
                parts.len()
            ));
        }
        let mut values = [NEUTRAL_SCORE; Dimension::COUNT];
        for (slot, part) in values.iter_mut().zip(parts) {
            let value: u8 = part
                .parse()
                .map_err(|e| format!("invalid score '{part}': {e}"))?;
            if value > MAX_SCORE {
                return Err(format!("score {value} is above {MAX_SCORE}"));
            }
            *slot = value;
        }
        Ok(Self(values))
    }
}

/// A partial per-dimension contribution recorded for one answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<Dimension, u8>",
    try_from = "BTreeMap<String, u8>"
)]
pub struct DimensionDeltas([Option<u8>; Dimension::COUNT]);

impl DimensionDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter. Values above 100 are capped.
    pub fn with(mut self, dimension: Dimension, value: u8) -> Self {
        self.0[dimension.index()] = Some(value.min(MAX_SCORE));
        self
    }

    /// Build deltas from a string-keyed map supplied by a caller.
    ///
    /// Keys outside the eight known dimensions are skipped. A value outside
    /// 0..=100 on a known key is rejected.
    pub fn from_raw<K, I>(entries: I) -> Result<Self, QuizError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, i64)>,
    {
        let mut deltas = Self::new();
        for (key, value) in entries {
            let key = key.as_ref();
            let Some(dimension) = Dimension::from_key(key) else {
                tracing::debug!(key, "Ignoring contribution for unknown dimension");
                continue;
            };
            let value = u8::try_from(value)
                .ok()
                .filter(|v| *v <= MAX_SCORE)
                .ok_or_else(|| QuizError::DeltaOutOfRange {
                    dimension: dimension.key().to_string(),
                    value,
                })?;
            deltas.0[dimension.index()] = Some(value);
        }
        Ok(deltas)
    }

    pub fn get(&self, dimension: Dimension) -> Option<u8> {
        self.0[dimension.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Contributions that are present, in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|v| (d, v)))
    }
}

impl From<DimensionDeltas> for BTreeMap<Dimension, u8> {
    fn from(deltas: DimensionDeltas) -> Self {
        deltas.iter().collect()
    }
}

impl TryFrom<BTreeMap<String, u8>> for DimensionDeltas {
    type Error = QuizError;

    fn try_from(map: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        Self::from_raw(map.into_iter().map(|(key, value)| (key, i64::from(value))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dimension_order_matches_index() {
        for (i, d) in Dimension::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn test_dimension_key_round_trip() {
        for d in Dimension::ALL {
            assert_eq!(Dimension::from_key(d.key()), Some(d));
            assert_eq!(d.key().parse::<Dimension>(), Ok(d));
        }
        assert_eq!(Dimension::from_key("charisma"), None);
    }

    #[test]
    fn test_scores_missing_keys_default_to_neutral() {
        let scores: DimensionScores =
            serde_json::from_str(r#"{"dominance": 80, "fantasy": 10}"#).unwrap();
        assert_eq!(scores.get(Dimension::Dominance), 80);
        assert_eq!(scores.get(Dimension::Fantasy), 10);
        assert_eq!(scores.get(Dimension::Emotion), NEUTRAL_SCORE);
    }

    #[test]
    fn test_scores_skip_unknown_keys() {
        let scores: DimensionScores =
            serde_json::from_str(r#"{"dominance": 80, "charisma": 10}"#).unwrap();
        assert_eq!(scores, DimensionScores::neutral().with(Dimension::Dominance, 80));
    }

    #[test]
    fn test_deltas_deserialize_skips_unknown_keys() {
        let deltas: DimensionDeltas =
            serde_json::from_str(r#"{"sensory": 65, "sparkle": 40}"#).unwrap();
        assert_eq!(deltas, DimensionDeltas::new().with(Dimension::Sensory, 65));

        let result: Result<DimensionDeltas, _> = serde_json::from_str(r#"{"sensory": 140}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_scores_reject_out_of_range() {
        let result: Result<DimensionScores, _> = serde_json::from_str(r#"{"dominance": 101}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_scores_serialize_as_keyed_map() {
        let json = serde_json::to_value(DimensionScores::neutral().with(Dimension::Intimacy, 90))
            .unwrap();
        assert_eq!(json["intimacy"], 90);
        assert_eq!(json["dominance"], 50);
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_scores_parse_csv() {
        let scores: DimensionScores = "80, 50, 90, 65, 45, 55, 50, 70".parse().unwrap();
        assert_eq!(scores.values(), [80, 50, 90, 65, 45, 55, 50, 70]);
        assert!("1,2,3".parse::<DimensionScores>().is_err());
        assert!("1,2,3,4,5,6,7,101".parse::<DimensionScores>().is_err());
    }

    #[test]
    fn test_deltas_from_raw_ignores_unknown_keys() {
        let deltas =
            DimensionDeltas::from_raw([("dominance", 70), ("charisma", 99), ("fantasy", 0)])
                .unwrap();
        assert_eq!(
            deltas.iter().collect::<Vec<_>>(),
            vec![(Dimension::Dominance, 70), (Dimension::Fantasy, 0)]
        );
    }

    #[test]
    fn test_deltas_from_raw_rejects_out_of_range() {
        let err = DimensionDeltas::from_raw([("sensory", 140)]).unwrap_err();
        assert_eq!(
            err,
            QuizError::DeltaOutOfRange {
                dimension: "sensory".to_string(),
                value: 140
            }
        );
        assert!(DimensionDeltas::from_raw([("sensory", -1)]).is_err());
    }

    #[test]
    fn test_deltas_empty() {
        assert!(DimensionDeltas::new().is_empty());
        assert!(!DimensionDeltas::new().with(Dimension::Emotion, 0).is_empty());
    }
}
