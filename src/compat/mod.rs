//! Pairwise compatibility between two finished profiles.
//!
//! Each dimension is scored by one of three rules (similar, complementary or
//! flexible), then weighted into an overall score. The report also carries
//! lead-balance and style narratives and a short list of suggested activities.

pub mod activities;
pub mod dynamics;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use activities::{RecommendedActivity, recommend};
pub use dynamics::{DynamicKind, PowerBalance, StyleComparison, compare_styles, power_balance};

use crate::analysis::{SpectrumProfile, analyze_spectrum};
use crate::dimensions::{Dimension, DimensionScores};

/// Compatibility at or above this is a match (or complement).
pub const MATCH_MIN: f64 = 70.0;
/// Compatibility at or above this counts as a strength.
pub const STRENGTH_MIN: f64 = 65.0;
/// Compatibility below this counts as a growth area.
pub const GROWTH_MAX: f64 = 55.0;

const AREA_LIMIT: usize = 3;

/// How two scores on one dimension combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatRule {
    /// Closer scores are better.
    Similar,
    /// A spread is better; both at the same extreme clash.
    Complementary,
    /// Anything within a moderate spread works.
    Flexible,
}

impl CompatRule {
    pub fn for_dimension(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Dominance => CompatRule::Complementary,
            Dimension::Adventure | Dimension::Fantasy => CompatRule::Flexible,
            Dimension::Emotion
            | Dimension::Sensory
            | Dimension::Atmosphere
            | Dimension::Communication
            | Dimension::Intimacy => CompatRule::Similar,
        }
    }

    /// Compatibility of two scores under this rule, 0-100.
    pub fn compatibility(&self, a: u8, b: u8) -> f64 {
        let diff = f64::from(a.abs_diff(b));
        match self {
            CompatRule::Similar => (100.0 - 1.5 * diff).max(10.0),
            CompatRule::Complementary => {
                let spread = (1.2 * diff).min(100.0);
                let clash = (a >= 65 && b >= 65) || (a <= 35 && b <= 35);
                if clash {
                    (spread - 20.0).max(10.0)
                } else {
                    spread.max(20.0)
                }
            }
            CompatRule::Flexible => {
                if diff <= 20.0 {
                    90.0
                } else if diff <= 40.0 {
                    70.0
                } else {
                    (100.0 - diff).max(20.0)
                }
            }
        }
    }
}

/// Importance of a dimension in the overall score.
pub fn weight(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Dominance => 1.3,
        Dimension::Emotion => 1.2,
        Dimension::Adventure => 0.9,
        Dimension::Sensory => 1.0,
        Dimension::Atmosphere => 0.8,
        Dimension::Communication => 1.1,
        Dimension::Intimacy => 1.2,
        Dimension::Fantasy => 0.9,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Match,
    Complement,
    Growth,
}

impl Classification {
    pub fn of(rule: CompatRule, compatibility: f64) -> Self {
        if compatibility < MATCH_MIN {
            Classification::Growth
        } else if rule == CompatRule::Complementary {
            Classification::Complement
        } else {
            Classification::Match
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionComparison {
    pub dimension: Dimension,
    pub score1: u8,
    pub score2: u8,
    pub diff: u8,
    pub rule: CompatRule,
    pub compatibility: f64,
    pub classification: Classification,
    pub insight: &'static str,
}

/// One side of a pair: a display name, the final scores and their spectrum reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PartnerRecord")]
pub struct PartnerProfile {
    pub name: String,
    pub scores: DimensionScores,
    pub spectrum: SpectrumProfile,
}

/// Serialized form; the spectrum is always recomputed from the scores.
#[derive(Deserialize)]
struct PartnerRecord {
    name: String,
    scores: DimensionScores,
}

impl From<PartnerRecord> for PartnerProfile {
    fn from(record: PartnerRecord) -> Self {
        PartnerProfile::new(record.name, record.scores)
    }
}

impl PartnerProfile {
    pub fn new(name: impl Into<String>, scores: DimensionScores) -> Self {
        Self {
            name: name.into(),
            spectrum: analyze_spectrum(&scores),
            scores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoupleCompatibility {
    pub partner1: String,
    pub partner2: String,
    /// In dimension order.
    pub dimensions: Vec<DimensionComparison>,
    pub overall_score: u8,
    /// Up to three dimensions with compatibility >= 65, best first.
    pub strength_areas: Vec<Dimension>,
    /// Up to three of the weakest dimensions with compatibility < 55.
    pub growth_areas: Vec<Dimension>,
    pub power_balance: PowerBalance,
    pub style_comparison: StyleComparison,
    pub activities: Vec<RecommendedActivity>,
}

pub fn calculate_compatibility(first: &PartnerProfile, second: &PartnerProfile) -> CoupleCompatibility {
    let dimensions: Vec<DimensionComparison> = Dimension::ALL
        .into_iter()
        .map(|dimension| compare_dimension(dimension, first.scores[dimension], second.scores[dimension]))
        .collect();

    let overall_score = overall_score(&dimensions);

    let mut ranked: Vec<&DimensionComparison> = dimensions.iter().collect();
    ranked.sort_by(|a, b| {
        b.compatibility
            .partial_cmp(&a.compatibility)
            .unwrap_or(Ordering::Equal)
    });
    let strength_areas = ranked
        .iter()
        .filter(|c| c.compatibility >= STRENGTH_MIN)
        .take(AREA_LIMIT)
        .map(|c| c.dimension)
        .collect();
    let weak: Vec<Dimension> = ranked
        .iter()
        .filter(|c| c.compatibility < GROWTH_MAX)
        .map(|c| c.dimension)
        .collect();
    let growth_areas = weak[weak.len().saturating_sub(AREA_LIMIT)..].to_vec();

    debug!(
        partner1 = %first.name,
        partner2 = %second.name,
        overall_score,
        "Compatibility computed"
    );

    CoupleCompatibility {
        partner1: first.name.clone(),
        partner2: second.name.clone(),
        overall_score,
        strength_areas,
        growth_areas,
        power_balance: power_balance(first, second),
        style_comparison: compare_styles(first, second),
        activities: recommend(&first.scores, &second.scores),
        dimensions,
    }
}

fn compare_dimension(dimension: Dimension, score1: u8, score2: u8) -> DimensionComparison {
    let rule = CompatRule::for_dimension(dimension);
    let compatibility = rule.compatibility(score1, score2);
    let classification = Classification::of(rule, compatibility);
    DimensionComparison {
        dimension,
        score1,
        score2,
        diff: score1.abs_diff(score2),
        rule,
        compatibility,
        classification,
        insight: insight(dimension, classification),
    }
}

fn overall_score(dimensions: &[DimensionComparison]) -> u8 {
    let (sum, total) = dimensions.iter().fold((0.0, 0.0), |(sum, total), c| {
        let w = weight(c.dimension);
        (sum + c.compatibility * w, total + w)
    });
    if total == 0.0 {
        return 0;
    }
    (sum / total).round().clamp(0.0, 100.0) as u8
}

/// Narrative for a dimension under a classification.
pub fn insight(dimension: Dimension, classification: Classification) -> &'static str {
    use Classification::*;
    use Dimension::*;

    match (dimension, classification) {
        (Dominance, Complement) => "A natural dynamic forms where one leads and the other follows",
        (Dominance, Match) => "Similar lead levels can create clashes or a perfect balance",
        (Dominance, Growth) => "Talking openly about who leads can deepen mutual understanding",
        (Emotion, Match) => "Your emotional wavelengths align, creating deep resonance",
        (Emotion, Complement) => "Different emotional expressions offer fresh perspectives to each other",
        (Emotion, Growth) => "Understanding your different emotional depths brings you closer",
        (Adventure, Match) => "Similar openness to new experiences allows you to grow together",
        (Adventure, Complement) => "One partner can lead and introduce new experiences to the other",
        (Adventure, Growth) => "Respect each other's pace and explore at your own speed",
        (Sensory, Match) => "Similar sensory responses make your touches naturally harmonious",
        (Sensory, Complement) => "Sensory differences offer each other new stimulation",
        (Sensory, Growth) => "Exploring each other's sensory preferences opens new realms",
        (Atmosphere, Match) => "Matching atmosphere preferences let you create the perfect space together",
        (Atmosphere, Complement) => "One partner's feel for atmosphere can bring new experiences to the other",
        (Atmosphere, Growth) => "Aligning environment expectations leads to more satisfying times together",
        (Communication, Match) => "Similar communication styles make sharing desires feel natural",
        (Communication, Complement) => "One partner's openness draws out the other's hidden wishes",
        (Communication, Growth) => "Understanding each other's communication styles enables deeper connection",
        (Intimacy, Match) => "Similar intimacy depth creates a natural relationship tempo",
        (Intimacy, Complement) => "Intimacy differences can create a healthy push and pull",
        (Intimacy, Growth) => "Aligning your desired intimacy levels through dialogue deepens your bond",
        (Fantasy, Match) => "Matched imagination levels let you bring fantasies to life together",
        (Fantasy, Complement) => "One partner's rich imagination adds new scenarios to your relationship",
        (Fantasy, Growth) => "Gradually opening up to fantasies unveils new joys awaiting you",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_partner(name: &str, values: [u8; 8]) -> PartnerProfile {
        PartnerProfile::new(name, DimensionScores::new(values))
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(CompatRule::for_dimension(Dimension::Dominance), CompatRule::Complementary);
        assert_eq!(CompatRule::for_dimension(Dimension::Fantasy), CompatRule::Flexible);
        assert_eq!(CompatRule::for_dimension(Dimension::Adventure), CompatRule::Flexible);
        assert_eq!(CompatRule::for_dimension(Dimension::Intimacy), CompatRule::Similar);
    }

    #[test]
    fn test_similar_rule() {
        assert_eq!(CompatRule::Similar.compatibility(80, 80), 100.0);
        assert_eq!(CompatRule::Similar.compatibility(60, 40), 70.0);
        assert_eq!(CompatRule::Similar.compatibility(100, 0), 10.0);
    }

    #[test]
    fn test_complementary_rule() {
        // Same-direction extremes clash.
        assert_eq!(CompatRule::Complementary.compatibility(80, 80), 10.0);
        assert_eq!(CompatRule::Complementary.compatibility(30, 20), 10.0);
        assert_eq!(CompatRule::Complementary.compatibility(100, 65), 22.0);
        // Otherwise floored at 20.
        assert_eq!(CompatRule::Complementary.compatibility(50, 45), 20.0);
        assert_eq!(CompatRule::Complementary.compatibility(80, 20), 72.0);
        assert_eq!(CompatRule::Complementary.compatibility(100, 0), 100.0);
    }

    #[test]
    fn test_flexible_rule() {
        assert_eq!(CompatRule::Flexible.compatibility(50, 70), 90.0);
        assert_eq!(CompatRule::Flexible.compatibility(50, 71), 70.0);
        assert_eq!(CompatRule::Flexible.compatibility(50, 90), 70.0);
        assert_eq!(CompatRule::Flexible.compatibility(0, 41), 59.0);
        assert_eq!(CompatRule::Flexible.compatibility(0, 95), 20.0);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Classification::of(CompatRule::Complementary, 72.0), Classification::Complement);
        assert_eq!(Classification::of(CompatRule::Similar, 70.0), Classification::Match);
        assert_eq!(Classification::of(CompatRule::Flexible, 69.9), Classification::Growth);
    }

    #[test]
    fn test_weights_span() {
        let total: f64 = Dimension::ALL.into_iter().map(weight).sum();
        assert!((total - 8.4).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_pair_report() {
        let report = calculate_compatibility(
            &make_partner("Alex", [50; 8]),
            &make_partner("Sam", [50; 8]),
        );
        // (20*1.3 + 100*(1.2+1.0+0.8+1.1+1.2) + 90*(0.9+0.9)) / 8.4 = 718 / 8.4
        assert_eq!(report.overall_score, 85);
        assert_eq!(
            report.strength_areas,
            vec![Dimension::Emotion, Dimension::Sensory, Dimension::Atmosphere]
        );
        assert_eq!(report.growth_areas, vec![Dimension::Dominance]);
        assert_eq!(report.dimensions[0].classification, Classification::Growth);
        assert_eq!(report.dimensions[1].classification, Classification::Match);
        assert_eq!(report.power_balance.kind, DynamicKind::Balanced);
        assert_eq!(report.activities.len(), activities::TOP_ACTIVITIES);
    }

    #[test]
    fn test_growth_areas_keep_the_weakest() {
        let report = calculate_compatibility(
            &make_partner("Alex", [90, 100, 0, 100, 100, 100, 100, 50]),
            &make_partner("Sam", [90, 0, 100, 0, 0, 0, 50, 50]),
        );
        // dominance 10 (clash), emotion/sensory/atmosphere/communication 10,
        // adventure 20, intimacy 25, fantasy 90.
        assert_eq!(report.strength_areas, vec![Dimension::Fantasy]);
        assert_eq!(
            report.growth_areas,
            vec![Dimension::Sensory, Dimension::Atmosphere, Dimension::Communication]
        );
    }

    #[test]
    fn test_complementary_lead_reads_as_complement() {
        let report = calculate_compatibility(
            &make_partner("Alex", [85, 60, 50, 50, 50, 50, 50, 50]),
            &make_partner("Sam", [25, 60, 50, 50, 50, 50, 50, 50]),
        );
        let lead = &report.dimensions[0];
        assert_eq!(lead.compatibility, 72.0);
        assert_eq!(lead.classification, Classification::Complement);
        assert_eq!(lead.insight, insight(Dimension::Dominance, Classification::Complement));
        assert_eq!(report.power_balance.leader.as_deref(), Some("Alex"));
    }

    #[test]
    fn test_overall_score_stays_in_range() {
        let profiles = [[0u8; 8], [100; 8], [50; 8], [0, 100, 0, 100, 0, 100, 0, 100]];
        for a in profiles {
            for b in profiles {
                let report = calculate_compatibility(&make_partner("A", a), &make_partner("B", b));
                assert!(report.overall_score <= 100);
                assert_eq!(report.dimensions.len(), Dimension::COUNT);
            }
        }
    }

    #[test]
    fn test_partner_profile_deserializes_and_recomputes_spectrum() {
        let json = r#"{
            "name": "Alex",
            "scores": {"dominance": 80, "emotion": 40, "adventure": 60, "sensory": 55,
                       "atmosphere": 50, "communication": 65, "intimacy": 45, "fantasy": 70},
            "spectrum": {"ignored": true}
        }"#;
        let partner: PartnerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(partner.name, "Alex");
        assert_eq!(partner.scores[Dimension::Dominance], 80);
        assert_eq!(partner.spectrum, analyze_spectrum(&partner.scores));

        let round_trip: PartnerProfile =
            serde_json::from_str(&serde_json::to_string(&partner).unwrap()).unwrap();
        assert_eq!(round_trip, partner);
    }

    #[test]
    fn test_partner_profile_skips_unknown_score_keys() {
        let partner: PartnerProfile =
            serde_json::from_str(r#"{"name": "A", "scores": {"dominance": 80, "charisma": 10}}"#)
                .unwrap();
        let expected = PartnerProfile::new("A", DimensionScores::neutral().with(Dimension::Dominance, 80));
        assert_eq!(partner, expected);
    }
}
