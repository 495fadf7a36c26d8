//! Canned per-dimension narratives, picked by score band.

use serde::Serialize;

use crate::dimensions::{Dimension, DimensionScores};

/// Scores at or below this read as the low band.
pub const LOW_BAND_MAX: u8 = 35;
/// Scores at or above this read as the high band.
pub const HIGH_BAND_MIN: u8 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub fn of(score: u8) -> Self {
        if score <= LOW_BAND_MAX {
            Band::Low
        } else if score >= HIGH_BAND_MIN {
            Band::High
        } else {
            Band::Mid
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionInsight {
    pub dimension: Dimension,
    pub score: u8,
    pub band: Band,
    pub text: &'static str,
}

/// One insight per dimension, in dimension order.
pub fn dimension_insights(scores: &DimensionScores) -> Vec<DimensionInsight> {
    scores
        .iter()
        .map(|(dimension, score)| {
            let band = Band::of(score);
            DimensionInsight {
                dimension,
                score,
                band,
                text: narrative(dimension, band),
            }
        })
        .collect()
}

pub fn narrative(dimension: Dimension, band: Band) -> &'static str {
    use Band::*;
    use Dimension::*;

    match (dimension, band) {
        (Dominance, Low) => {
            "You are most at ease when someone else sets the direction. Letting a partner lead is not passivity for you; it is one of the clearest ways you show trust."
        }
        (Dominance, Mid) => {
            "You move freely across the balance of initiative. Sometimes you lead, sometimes you follow, and that easy exchange of roles is part of your appeal."
        }
        (Dominance, High) => {
            "Taking the lead energizes you. Setting the pace and deciding when to pause and when to begin is the core of how you engage with a partner."
        }
        (Emotion, Low) => {
            "You can connect without needing a deep emotional current underneath. Being fully present in the moment is satisfying on its own terms."
        }
        (Emotion, Mid) => {
            "You balance emotional bonding with simple present-moment attraction. Connection is richer with feeling, but it does not always have to carry it."
        }
        (Emotion, High) => {
            "For you, closeness grows out of feeling. When your heart is not open nothing else is either, and a small gesture from someone you love outweighs any technique."
        }
        (Adventure, Low) => {
            "You value the depth of what already works. Refining a familiar rhythm satisfies you more than chasing something new every time."
        }
        (Adventure, Mid) => {
            "You enjoy trying new things without going overboard. You are open to a suggestion while knowing clearly where your limits are."
        }
        (Adventure, High) => {
            "Repetition does little for you. New places and untried experiences keep recharging your energy, and routine is the thing you guard against."
        }
        (Sensory, Low) => {
            "You feel with your heart more than your skin. A look or a quiet moment can move you more than any elaborate sensory detail."
        }
        (Sensory, Mid) => {
            "You balance physical sensation and emotional connection. The best moments for you are the ones where both are present."
        }
        (Sensory, High) => {
            "You are finely tuned to sensation. Touch, temperature and a partner's presence all register strongly and turn into a deeper sense of connection."
        }
        (Atmosphere, Low) => {
            "Setting hardly matters to you. Wherever the spark happens becomes the right place, and spontaneous moments often feel the most alive."
        }
        (Atmosphere, Mid) => {
            "A good atmosphere is welcome but never required. You enjoy planned romance as much as an unplanned moment."
        }
        (Atmosphere, High) => {
            "Lighting, music and space matter to you. The right environment is what lets you open up, and without it a moment can feel flat."
        }
        (Communication, Low) => {
            "You speak through presence rather than words. Eye contact, a warm hand and a comfortable silence say more to you than a conversation."
        }
        (Communication, Mid) => {
            "You know when a few words help and when quiet works better, and you switch between the two naturally."
        }
        (Communication, High) => {
            "Words are your strongest way to connect. Saying what you want and asking what your partner wants is connection itself for you."
        }
        (Intimacy, Low) => {
            "You prefer light, unhurried connections. You shine without needing a deep bond, and freedom brings out your most honest self."
        }
        (Intimacy, Mid) => {
            "Some closeness is welcome without needing to share everything. A relationship that stays comfortable but keeps a little tension suits you."
        }
        (Intimacy, High) => {
            "The moments after matter most to you: staying close while everything slows down. Without that depth, even an exciting moment feels incomplete."
        }
        (Fantasy, Low) => {
            "You focus on what is real and present. A partner's warmth is enough without any elaborate scenario around it."
        }
        (Fantasy, Mid) => {
            "You sometimes imagine rich scenarios, though acting on them is another matter. A little imagination adds colour without losing the ground beneath you."
        }
        (Fantasy, High) => {
            "Your imagination is always running. When those inner scenes find their way into real life, a partner gets to share something memorable."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(Band::of(0), Band::Low);
        assert_eq!(Band::of(35), Band::Low);
        assert_eq!(Band::of(36), Band::Mid);
        assert_eq!(Band::of(64), Band::Mid);
        assert_eq!(Band::of(65), Band::High);
        assert_eq!(Band::of(100), Band::High);
    }

    #[test]
    fn test_neutral_profile_reads_mid_everywhere() {
        let insights = dimension_insights(&DimensionScores::neutral());
        assert_eq!(insights.len(), Dimension::COUNT);
        for insight in &insights {
            assert_eq!(insight.band, Band::Mid);
            assert_eq!(insight.text, narrative(insight.dimension, Band::Mid));
        }
    }

    #[test]
    fn test_every_narrative_is_distinct() {
        let mut texts: Vec<&str> = Dimension::ALL
            .into_iter()
            .flat_map(|d| [Band::Low, Band::Mid, Band::High].map(|b| narrative(d, b)))
            .collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), 24);
    }
}
