//! The fixed catalog of twelve archetype profiles.

use serde::Serialize;

use crate::dimensions::DimensionScores;

/// A reference point in the 8-dimension space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Archetype {
    pub id: &'static str,
    pub numeral: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub profile: DimensionScores,
    pub compatible: &'static [&'static str],
}

// Profile order: dominance, emotion, adventure, sensory, atmosphere,
// communication, intimacy, fantasy.
static ARCHETYPES: [Archetype; 12] = [
    Archetype {
        id: "passionate-explorer",
        numeral: "I",
        name: "Passionate Explorer",
        description: "An explorer who takes their partner's hand and dives into uncharted connection",
        profile: DimensionScores::from_values([80, 50, 90, 65, 45, 55, 50, 70]),
        compatible: &["tender-guardian", "romantic-dreamer", "deep-connector"],
    },
    Archetype {
        id: "romantic-dreamer",
        numeral: "II",
        name: "Romantic Dreamer",
        description: "A romantic for whom emotion is the ultimate connection, heart to heart by candlelight",
        profile: DimensionScores::from_values([35, 90, 45, 55, 85, 60, 75, 85]),
        compatible: &["passionate-explorer", "gentle-commander", "dreamy-artist"],
    },
    Archetype {
        id: "sensory-aesthete",
        numeral: "III",
        name: "Sensory Aesthete",
        description: "A sensualist who turns every small touch into an art form",
        profile: DimensionScores::from_values([45, 60, 40, 90, 90, 40, 55, 60]),
        compatible: &["charismatic-director", "dreamy-artist", "harmonious-partner"],
    },
    Archetype {
        id: "gentle-commander",
        numeral: "IV",
        name: "Gentle Commander",
        description: "A gentle leader who guides while helping their partner open up with warmth",
        profile: DimensionScores::from_values([85, 80, 55, 55, 60, 70, 70, 45]),
        compatible: &["romantic-dreamer", "tender-guardian", "deep-connector"],
    },
    Archetype {
        id: "deep-connector",
        numeral: "V",
        name: "Deep Connector",
        description: "Someone who needs to share what is on their mind before any real connection begins",
        profile: DimensionScores::from_values([50, 75, 35, 40, 55, 90, 90, 35]),
        compatible: &["gentle-commander", "tender-guardian", "harmonious-partner"],
    },
    Archetype {
        id: "free-spirit",
        numeral: "VI",
        name: "Free Spirit",
        description: "A wanderer who captivates everyone yet belongs to no one",
        profile: DimensionScores::from_values([55, 35, 85, 60, 30, 45, 25, 65]),
        compatible: &["passionate-explorer", "spontaneous-hedonist", "secret-fantasist"],
    },
    Archetype {
        id: "secret-fantasist",
        numeral: "VII",
        name: "Secret Fantasist",
        description: "Composed on the outside, a rich dreamer of untold scenarios on the inside",
        profile: DimensionScores::from_values([40, 45, 55, 50, 65, 20, 45, 95]),
        compatible: &["free-spirit", "dreamy-artist", "passionate-explorer"],
    },
    Archetype {
        id: "harmonious-partner",
        numeral: "VIII",
        name: "Harmonious Partner",
        description: "A versatile partner who can meet whatever the other person needs",
        profile: DimensionScores::from_values([50, 60, 45, 50, 60, 60, 65, 40]),
        compatible: &["deep-connector", "sensory-aesthete", "tender-guardian"],
    },
    Archetype {
        id: "spontaneous-hedonist",
        numeral: "IX",
        name: "Spontaneous Explorer",
        description: "No plans needed: pure instinct that lights up the moment",
        profile: DimensionScores::from_values([60, 30, 80, 85, 20, 35, 30, 50]),
        compatible: &["free-spirit", "passionate-explorer", "sensory-aesthete"],
    },
    Archetype {
        id: "tender-guardian",
        numeral: "X",
        name: "Tender Guardian",
        description: "A guardian who wraps their partner in safety so they can let go completely",
        profile: DimensionScores::from_values([25, 85, 30, 45, 70, 65, 90, 30]),
        compatible: &["gentle-commander", "passionate-explorer", "deep-connector"],
    },
    Archetype {
        id: "charismatic-director",
        numeral: "XI",
        name: "Charismatic Director",
        description: "The director of every dynamic, setting the mood, the pace and the intensity",
        profile: DimensionScores::from_values([90, 50, 60, 55, 80, 85, 55, 55]),
        compatible: &["sensory-aesthete", "tender-guardian", "romantic-dreamer"],
    },
    Archetype {
        id: "dreamy-artist",
        numeral: "XII",
        name: "Dreamy Artist",
        description: "An artist who crafts emotion at the boundary of reality and fantasy",
        profile: DimensionScores::from_values([35, 65, 50, 80, 85, 40, 50, 90]),
        compatible: &["romantic-dreamer", "secret-fantasist", "sensory-aesthete"],
    },
];

/// All archetypes in catalog order.
pub fn archetypes() -> &'static [Archetype] {
    &ARCHETYPES
}

pub fn find_archetype(id: &str) -> Option<&'static Archetype> {
    ARCHETYPES.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::MAX_SCORE;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_twelve_unique_ids() {
        let ids: HashSet<_> = archetypes().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_compatible_ids_resolve() {
        for archetype in archetypes() {
            assert_eq!(archetype.compatible.len(), 3);
            for id in archetype.compatible {
                assert!(find_archetype(id).is_some(), "{} -> {id}", archetype.id);
                assert_ne!(*id, archetype.id);
            }
        }
    }

    #[test]
    fn test_profiles_within_range() {
        for archetype in archetypes() {
            assert!(archetype.profile.values().iter().all(|v| *v <= MAX_SCORE));
        }
    }

    #[test]
    fn test_find_archetype() {
        assert_eq!(find_archetype("free-spirit").map(|a| a.numeral), Some("VI"));
        assert!(find_archetype("nobody").is_none());
    }
}
