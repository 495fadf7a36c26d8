//! Question topics a respondent can choose from.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimension;
use crate::error::QuizError;

/// Fewest topics a session may be started with.
pub const MIN_SELECTED: usize = 2;

/// Most topics a session may be started with.
pub const MAX_SELECTED: usize = 7;

/// A fine-grained question topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    PowerDynamics,
    EmotionalDepth,
    SensoryWorld,
    AtmosphereMood,
    AdventureThrill,
    VerbalExpression,
    IntimacyBond,
    FantasyImagination,
    TrustVulnerability,
    PassionIntensity,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::PowerDynamics,
        Category::EmotionalDepth,
        Category::SensoryWorld,
        Category::AtmosphereMood,
        Category::AdventureThrill,
        Category::VerbalExpression,
        Category::IntimacyBond,
        Category::FantasyImagination,
        Category::TrustVulnerability,
        Category::PassionIntensity,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::PowerDynamics => "power-dynamics",
            Category::EmotionalDepth => "emotional-depth",
            Category::SensoryWorld => "sensory-world",
            Category::AtmosphereMood => "atmosphere-mood",
            Category::AdventureThrill => "adventure-thrill",
            Category::VerbalExpression => "verbal-expression",
            Category::IntimacyBond => "intimacy-bond",
            Category::FantasyImagination => "fantasy-imagination",
            Category::TrustVulnerability => "trust-vulnerability",
            Category::PassionIntensity => "passion-intensity",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::PowerDynamics => "Power & Lead",
            Category::EmotionalDepth => "Emotional Depth",
            Category::SensoryWorld => "Sensory World",
            Category::AtmosphereMood => "Atmosphere & Mood",
            Category::AdventureThrill => "Adventure & Thrill",
            Category::VerbalExpression => "Words & Expression",
            Category::IntimacyBond => "Intimacy & Bond",
            Category::FantasyImagination => "Fantasy & Dreams",
            Category::TrustVulnerability => "Trust & Openness",
            Category::PassionIntensity => "Passion & Heat",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::PowerDynamics => {
                "Who leads and who follows: your preferences around roles and initiative"
            }
            Category::EmotionalDepth => {
                "Emotional resonance, feeling connected, and the weight you give to sentiment"
            }
            Category::SensoryWorld => "Experiences built on touch, sight, sound and the other senses",
            Category::AtmosphereMood => {
                "Your sensitivity to setting, lighting, music and the overall vibe"
            }
            Category::AdventureThrill => "Your openness to new experiences, spontaneity and the unknown",
            Category::VerbalExpression => {
                "How you prefer to communicate and connect through conversation"
            }
            Category::IntimacyBond => "How you value closeness and the bonds you share",
            Category::FantasyImagination => {
                "Your openness to imagination, role play and inner fantasy worlds"
            }
            Category::TrustVulnerability => {
                "How you build trust by showing vulnerability and accepting each other"
            }
            Category::PassionIntensity => {
                "Your preferences for passion, energy and intensity in a relationship"
            }
        }
    }

    /// Dimensions this topic mainly probes.
    pub fn focus_dimensions(self) -> &'static [Dimension] {
        match self {
            Category::PowerDynamics => &[Dimension::Dominance],
            Category::EmotionalDepth => &[Dimension::Emotion],
            Category::SensoryWorld => &[Dimension::Sensory],
            Category::AtmosphereMood => &[Dimension::Atmosphere],
            Category::AdventureThrill => &[Dimension::Adventure],
            Category::VerbalExpression => &[Dimension::Communication],
            Category::IntimacyBond => &[Dimension::Intimacy],
            Category::FantasyImagination => &[Dimension::Fantasy],
            Category::TrustVulnerability => &[Dimension::Intimacy, Dimension::Emotion],
            Category::PassionIntensity => &[Dimension::Sensory, Dimension::Adventure],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}

/// Check a session's topic selection: 2 to 7 distinct topics.
pub fn validate_selection(selected: &[Category]) -> Result<(), QuizError> {
    if !(MIN_SELECTED..=MAX_SELECTED).contains(&selected.len()) {
        return Err(QuizError::InvalidCategorySelection(format!(
            "expected {MIN_SELECTED} to {MAX_SELECTED} categories, got {}",
            selected.len()
        )));
    }

    let mut seen = HashSet::new();
    for category in selected {
        if !seen.insert(*category) {
            return Err(QuizError::InvalidCategorySelection(format!(
                "category {category} selected more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_parse_back() {
        for category in Category::ALL {
            assert_eq!(category.id().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert_eq!(
            "romance".parse::<Category>(),
            Err(QuizError::UnknownCategory("romance".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_kebab_ids() {
        let json = serde_json::to_string(&Category::TrustVulnerability).unwrap();
        assert_eq!(json, "\"trust-vulnerability\"");
    }

    #[test]
    fn test_validate_selection_bounds() {
        assert!(validate_selection(&[Category::PowerDynamics]).is_err());
        assert!(validate_selection(&[Category::PowerDynamics, Category::SensoryWorld]).is_ok());
        assert!(validate_selection(&Category::ALL[..7]).is_ok());
        assert!(validate_selection(&Category::ALL[..8]).is_err());
    }

    #[test]
    fn test_validate_selection_rejects_duplicates() {
        let err = validate_selection(&[Category::IntimacyBond, Category::IntimacyBond]).unwrap_err();
        assert!(matches!(err, QuizError::InvalidCategorySelection(_)));
    }
}
