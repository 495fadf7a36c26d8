//! Trait tags: independent, non-exclusive labels derived from thresholds.

use serde::Serialize;

use super::rules::{Condition::*, Rule, matching};
use crate::dimensions::Dimension::*;
use crate::dimensions::DimensionScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TraitTag {
    pub id: &'static str,
    pub label: &'static str,
}

const fn tag(id: &'static str, label: &'static str) -> TraitTag {
    TraitTag { id, label }
}

/// Single-dimension extremes first, then named combinations.
static TRAIT_RULES: [Rule<TraitTag>; 24] = [
    Rule { conditions: &[AtLeast(Dominance, 75)], payload: tag("dominant", "Dominant") },
    Rule { conditions: &[AtMost(Dominance, 25)], payload: tag("receptive", "Receptive") },
    Rule { conditions: &[AtLeast(Emotion, 75)], payload: tag("emotional", "Emotional") },
    Rule { conditions: &[AtMost(Emotion, 25)], payload: tag("independent", "Independent") },
    Rule { conditions: &[AtLeast(Adventure, 75)], payload: tag("adventurer", "Adventurer") },
    Rule { conditions: &[AtMost(Adventure, 25)], payload: tag("stability-seeker", "Stability Seeker") },
    Rule { conditions: &[AtLeast(Sensory, 75)], payload: tag("sensualist", "Sensualist") },
    Rule { conditions: &[AtMost(Sensory, 25)], payload: tag("emotion-centered", "Emotion-Centered") },
    Rule { conditions: &[AtLeast(Atmosphere, 75)], payload: tag("mood-maker", "Mood Maker") },
    Rule { conditions: &[AtMost(Atmosphere, 25)], payload: tag("spontaneous", "Spontaneous") },
    Rule { conditions: &[AtLeast(Communication, 75)], payload: tag("smooth-talker", "Smooth Talker") },
    Rule { conditions: &[AtMost(Communication, 25)], payload: tag("non-verbal", "Non-verbal") },
    Rule { conditions: &[AtLeast(Intimacy, 75)], payload: tag("deep-bond-seeker", "Deep Bond Seeker") },
    Rule { conditions: &[AtMost(Intimacy, 25)], payload: tag("light-bond-seeker", "Light Bond Seeker") },
    Rule { conditions: &[AtLeast(Fantasy, 75)], payload: tag("dreamer", "Dreamer") },
    Rule { conditions: &[AtMost(Fantasy, 25)], payload: tag("realist", "Realist") },
    Rule {
        conditions: &[AtLeast(Dominance, 70), AtLeast(Emotion, 70)],
        payload: tag("charisma-warmth", "Charisma + Warmth"),
    },
    Rule {
        conditions: &[AtLeast(Sensory, 70), AtLeast(Atmosphere, 70)],
        payload: tag("aesthetic-sense", "Aesthetic Sense"),
    },
    Rule {
        conditions: &[AtLeast(Fantasy, 70), AtLeast(Adventure, 70)],
        payload: tag("exploratory-imagination", "Exploratory Imagination"),
    },
    Rule {
        conditions: &[AtLeast(Intimacy, 70), AtLeast(Communication, 70)],
        payload: tag("soulmate-seeker", "Soulmate Seeker"),
    },
    Rule {
        conditions: &[AtMost(Dominance, 30), AtLeast(Emotion, 70)],
        payload: tag("devoted-guardian", "Devoted Guardian"),
    },
    Rule {
        conditions: &[AtLeast(Adventure, 70), AtMost(Intimacy, 30)],
        payload: tag("free-wanderer", "Free Wanderer"),
    },
    Rule {
        conditions: &[AtLeast(Fantasy, 70), AtMost(Communication, 30)],
        payload: tag("inner-world", "Inner World"),
    },
    Rule {
        conditions: &[AtLeast(Sensory, 70), AtLeast(Adventure, 70)],
        payload: tag("sensory-devotee", "Sensory Devotee"),
    },
];

/// Every tag whose rule matches, in table order.
pub fn trait_tags(scores: &DimensionScores) -> Vec<TraitTag> {
    matching(&TRAIT_RULES, scores).copied().collect()
}
