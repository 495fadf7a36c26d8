//! Activity suggestions ranked by how well they fit both partners.

use serde::Serialize;

use crate::dimensions::Dimension::{self, *};
use crate::dimensions::DimensionScores;

/// How many suggestions a report carries.
pub const TOP_ACTIVITIES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedActivity {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Relevance, 0-100.
    pub score: u8,
}

/// Both partners' scores, read as pair means and gaps.
struct Pair<'a> {
    first: &'a DimensionScores,
    second: &'a DimensionScores,
}

impl Pair<'_> {
    fn mean(&self, dimension: Dimension) -> f64 {
        (f64::from(self.first[dimension]) + f64::from(self.second[dimension])) / 2.0
    }

    fn gap(&self, dimension: Dimension) -> f64 {
        f64::from(self.first[dimension].abs_diff(self.second[dimension]))
    }
}

struct Template {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    relevance: fn(&Pair<'_>) -> f64,
}

static TEMPLATES: [Template; 16] = [
    Template {
        id: "role-play",
        name: "Role Play",
        description: "Transform into different characters and explore new dynamics",
        relevance: |p| {
            if p.mean(Fantasy) >= 60.0 { 60.0 + p.mean(Fantasy) * 0.4 } else { 30.0 }
        },
    },
    Template {
        id: "scenario-play",
        name: "Scenario Play",
        description: "Design and act out a special scenario together",
        relevance: |p| {
            if p.mean(Fantasy) >= 55.0 && p.mean(Adventure) >= 50.0 {
                60.0 + (p.mean(Fantasy) + p.mean(Adventure)) * 0.2
            } else {
                25.0
            }
        },
    },
    Template {
        id: "lead-exchange",
        name: "Lead Exchange",
        description: "Trade the lead back and forth and experience the depth of trust",
        relevance: |p| {
            if p.gap(Dominance) >= 25.0 { 60.0 + p.gap(Dominance) * 0.4 } else { 20.0 }
        },
    },
    Template {
        id: "gentle-guidance",
        name: "Gentle Guidance",
        description: "Experience safe leading that is gentle but firm",
        relevance: |p| {
            if p.gap(Dominance) >= 20.0 && p.mean(Emotion) >= 50.0 {
                60.0 + p.gap(Dominance) * 0.3
            } else {
                20.0
            }
        },
    },
    Template {
        id: "sensory-play",
        name: "Sensory Play",
        description: "Open new realms of sensation with varied textures and temperatures",
        relevance: |p| {
            if p.mean(Sensory) >= 55.0 { 60.0 + p.mean(Sensory) * 0.4 } else { 25.0 }
        },
    },
    Template {
        id: "massage",
        name: "Sensual Massage",
        description: "Slowly awaken each other's senses through unhurried touch",
        relevance: |p| {
            if p.mean(Sensory) >= 50.0 && p.mean(Intimacy) >= 45.0 {
                55.0 + (p.mean(Sensory) + p.mean(Intimacy)) * 0.2
            } else {
                30.0
            }
        },
    },
    Template {
        id: "new-location",
        name: "New Location",
        description: "Leave the familiar room behind and feel the thrill of a new setting",
        relevance: |p| {
            if p.mean(Adventure) >= 60.0 { 60.0 + p.mean(Adventure) * 0.3 } else { 20.0 }
        },
    },
    Template {
        id: "novelty-kit",
        name: "Novelty Kit",
        description: "Explore new tools together and widen your range of experiences",
        relevance: |p| {
            if p.mean(Adventure) >= 55.0 && p.mean(Sensory) >= 50.0 {
                55.0 + (p.mean(Adventure) + p.mean(Sensory)) * 0.2
            } else {
                20.0
            }
        },
    },
    Template {
        id: "candlelight",
        name: "Candlelight Night",
        description: "Create the perfect atmosphere with candles and music",
        relevance: |p| {
            if p.mean(Atmosphere) >= 60.0 { 60.0 + p.mean(Atmosphere) * 0.3 } else { 25.0 }
        },
    },
    Template {
        id: "music-mood",
        name: "Music & Mood",
        description: "Heighten the mood with a playlist you chose together",
        relevance: |p| {
            if p.mean(Atmosphere) >= 55.0 { 55.0 + p.mean(Atmosphere) * 0.3 } else { 25.0 }
        },
    },
    Template {
        id: "eye-contact",
        name: "Eye Contact Play",
        description: "Experience a primal connection through sustained eye contact",
        relevance: |p| {
            if p.mean(Emotion) >= 60.0 && p.mean(Intimacy) >= 55.0 {
                60.0 + (p.mean(Emotion) + p.mean(Intimacy)) * 0.2
            } else {
                25.0
            }
        },
    },
    Template {
        id: "slow-intimacy",
        name: "Slow Intimacy",
        description: "Slow everything down and savor each moment deeply",
        relevance: |p| {
            if p.mean(Emotion) >= 55.0 && p.mean(Intimacy) >= 55.0 {
                55.0 + (p.mean(Emotion) + p.mean(Intimacy)) * 0.2
            } else {
                25.0
            }
        },
    },
    Template {
        id: "verbal-play",
        name: "Verbal Play",
        description: "Use words to build anticipation and enjoy the pleasure of communication",
        relevance: |p| {
            if p.mean(Communication) >= 60.0 { 60.0 + p.mean(Communication) * 0.3 } else { 20.0 }
        },
    },
    Template {
        id: "verbal-affirmation",
        name: "Verbal Affirmation",
        description: "Put love and desire into words to deepen your emotional connection",
        relevance: |p| {
            if p.mean(Communication) >= 55.0 && p.mean(Emotion) >= 50.0 {
                55.0 + (p.mean(Communication) + p.mean(Emotion)) * 0.2
            } else {
                25.0
            }
        },
    },
    Template {
        id: "aftercare",
        name: "Aftercare Ritual",
        description: "Feel deep bonding and safety through a shared winding-down ritual",
        relevance: |p| {
            if p.mean(Intimacy) >= 60.0 && p.mean(Emotion) >= 55.0 {
                60.0 + (p.mean(Intimacy) + p.mean(Emotion)) * 0.2
            } else {
                30.0
            }
        },
    },
    Template {
        id: "deep-conversation",
        name: "Pillow Talk",
        description: "Share your most personal wishes honestly with each other",
        relevance: |p| {
            if p.mean(Intimacy) >= 60.0 && p.mean(Communication) >= 55.0 {
                60.0 + (p.mean(Intimacy) + p.mean(Communication)) * 0.2
            } else {
                25.0
            }
        },
    },
];

/// Score every template, best first (ties keep template order), and keep the top six.
pub fn recommend(first: &DimensionScores, second: &DimensionScores) -> Vec<RecommendedActivity> {
    let pair = Pair { first, second };
    let mut scored: Vec<RecommendedActivity> = TEMPLATES
        .iter()
        .map(|t| RecommendedActivity {
            id: t.id,
            name: t.name,
            description: t.description,
            score: (t.relevance)(&pair).round().min(100.0) as u8,
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(TOP_ACTIVITIES);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ranked(first: [u8; 8], second: [u8; 8]) -> Vec<(&'static str, u8)> {
        recommend(&DimensionScores::new(first), &DimensionScores::new(second))
            .into_iter()
            .map(|a| (a.id, a.score))
            .collect()
    }

    #[test]
    fn test_template_ids_are_unique() {
        let mut ids: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn test_neutral_pair_prefers_massage() {
        assert_eq!(
            ranked([50; 8], [50; 8]),
            vec![
                ("massage", 75),
                ("role-play", 30),
                ("aftercare", 30),
                ("scenario-play", 25),
                ("sensory-play", 25),
                ("candlelight", 25),
            ]
        );
    }

    #[test]
    fn test_lead_gap_lifts_lead_activities() {
        let top = ranked(
            [85, 70, 50, 50, 50, 50, 50, 50],
            [25, 70, 50, 50, 50, 50, 50, 50],
        );
        assert_eq!(top[0], ("lead-exchange", 84));
        assert_eq!(top[1], ("gentle-guidance", 78));
    }

    #[test]
    fn test_scores_are_capped_and_sorted() {
        let top = ranked([0, 100, 100, 100, 100, 100, 100, 100], [100; 8]);
        assert_eq!(top.len(), TOP_ACTIVITIES);
        assert!(top.iter().all(|(_, score)| *score <= 100));
        for pair in top.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        let ids: Vec<&str> = top.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec!["role-play", "scenario-play", "lead-exchange", "sensory-play", "eye-contact", "aftercare"]
        );
    }
}
