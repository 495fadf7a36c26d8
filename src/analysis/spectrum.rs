//! Lead/follow spectrum, intensity and role classification.
//!
//! Roles come from a priority-ordered rule table: the highest-priority rule
//! whose conditions hold wins, and a priority-0 catch-all always matches.
//! Priorities are distinct, so there are no ties.

use std::fmt;

use serde::Serialize;

use super::rules::{Condition::*, Rule, matching};
use crate::dimensions::Dimension::*;
use crate::dimensions::{Dimension, DimensionScores};

/// Tendencies reported at most.
pub const MAX_TENDENCIES: usize = 4;

/// Intensity at or above which a fallback headline reads as intense.
const INTENSE_HEADLINE_MIN: u8 = 60;

/// Five bands over the lead/follow scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumBand {
    Lead,
    SoftLead,
    Switch,
    SoftFollow,
    Follow,
}

impl SpectrumBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            68.. => SpectrumBand::Lead,
            56..=67 => SpectrumBand::SoftLead,
            44..=55 => SpectrumBand::Switch,
            32..=43 => SpectrumBand::SoftFollow,
            _ => SpectrumBand::Follow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpectrumBand::Lead => "Lead",
            SpectrumBand::SoftLead => "Soft Lead",
            SpectrumBand::Switch => "Switch",
            SpectrumBand::SoftFollow => "Soft Follow",
            SpectrumBand::Follow => "Follow",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SpectrumBand::Lead => "You draw energy from taking the lead and setting the direction.",
            SpectrumBand::SoftLead => {
                "You lead gently while staying responsive to your partner's reactions."
            }
            SpectrumBand::Switch => "You lead or follow depending on the moment and the partner.",
            SpectrumBand::SoftFollow => {
                "You enjoy a partner's lead while still voicing your own wishes."
            }
            SpectrumBand::Follow => {
                "You find deep satisfaction in handing over the lead and going with the flow."
            }
        }
    }
}

impl fmt::Display for SpectrumBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBand {
    Intense,
    Moderate,
    Mild,
    Soft,
}

impl IntensityBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => IntensityBand::Intense,
            55..=74 => IntensityBand::Moderate,
            35..=54 => IntensityBand::Mild,
            _ => IntensityBand::Soft,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntensityBand::Intense => "Intense",
            IntensityBand::Moderate => "Moderate",
            IntensityBand::Mild => "Mild",
            IntensityBand::Soft => "Soft",
        }
    }
}

/// A discrete relationship role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Role {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub headline: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tendency {
    pub id: &'static str,
    pub label: &'static str,
}

struct RoleRule {
    priority: u8,
    rule: Rule<Role>,
}

static ROLE_RULES: [RoleRule; 10] = [
    RoleRule {
        priority: 10,
        rule: Rule {
            conditions: &[AtLeast(Dominance, 65), AtLeast(Emotion, 55)],
            payload: Role {
                id: "gentle-leader",
                name: "Gentle Leader",
                description: "You lead with a firm hand and a constant check-in. Your partner never doubts where things are going, or that they are safe with you.",
                headline: Some("When you take the lead, your partner feels relief rather than tension. That is your kind of leadership."),
            },
        },
    },
    RoleRule {
        priority: 9,
        rule: Rule {
            conditions: &[AtLeast(Dominance, 70), AtMost(Emotion, 49), AtLeast(Communication, 55)],
            payload: Role {
                id: "structured-leader",
                name: "Structured Leader",
                description: "You like clear plans and clear roles. Guiding a partner inside a shared structure is where you shine, and that clarity lets them relax.",
                headline: Some("Your partner can't quite explain why following your plan feels so easy."),
            },
        },
    },
    RoleRule {
        priority: 8,
        rule: Rule {
            conditions: &[AtLeast(Dominance, 60), AtLeast(Sensory, 65)],
            payload: Role {
                id: "sensual-leader",
                name: "Sensual Leader",
                description: "You lead through closeness rather than instruction, drawing a partner in one small gesture at a time.",
                headline: Some("You lead through sensation, and it may be the most graceful way to lead."),
            },
        },
    },
    RoleRule {
        priority: 7,
        rule: Rule {
            conditions: &[AtMost(Dominance, 40), AtLeast(Emotion, 60)],
            payload: Role {
                id: "romantic-follower",
                name: "Romantic Follower",
                description: "You open up fully only with someone you trust. Emotional safety is what lets you relax and let the other person lead.",
                headline: Some("Letting go with someone you love is not giving in. It is a brave kind of trust."),
            },
        },
    },
    RoleRule {
        priority: 6,
        rule: Rule {
            conditions: &[AtMost(Dominance, 35), AtLeast(Intimacy, 60), AtLeast(Emotion, 50)],
            payload: Role {
                id: "devoted-partner",
                name: "Devoted Partner",
                description: "A partner's happiness is your reward. Noticing what they need and looking after it gives you real fulfilment.",
                headline: Some("In giving fully, you show one of the strongest forms of love."),
            },
        },
    },
    RoleRule {
        priority: 5,
        rule: Rule {
            conditions: &[Between(Dominance, 35, 65), AtLeast(Adventure, 55)],
            payload: Role {
                id: "playful-switch",
                name: "Playful Switch",
                description: "You enjoy leading one moment and following the next, and you can flip the script with a single word.",
                headline: Some("Leading, then following, then leading again: time with you is a game nobody can predict."),
            },
        },
    },
    RoleRule {
        priority: 4,
        rule: Rule {
            conditions: &[
                Between(Dominance, 35, 60),
                AtLeast(Adventure, 55),
                AtLeast(Communication, 50),
            ],
            payload: Role {
                id: "teasing-challenger",
                name: "Teasing Challenger",
                description: "Being told what to do makes you push back, playfully. You enjoy testing a partner until they meet your energy.",
                headline: Some("Playing hard to get is the game, and being caught is the prize."),
            },
        },
    },
    RoleRule {
        priority: 3,
        rule: Rule {
            conditions: &[AtLeast(Fantasy, 65), AtLeast(Adventure, 55)],
            payload: Role {
                id: "fantasy-explorer",
                name: "Fantasy Explorer",
                description: "You bring imagined scenarios to life. The further you step into a story together, the closer you feel.",
                headline: Some("Your imagination never runs dry, and you are ready to bring it to life."),
            },
        },
    },
    RoleRule {
        priority: 2,
        rule: Rule {
            conditions: &[AtLeast(Sensory, 65), AtLeast(Adventure, 50)],
            payload: Role {
                id: "sensory-devotee",
                name: "Sensory Devotee",
                description: "Warm and cool, soft and textured: every sensation is something to explore, and you find depth at the edges of it.",
                headline: Some("Between warm and cool, soft and sharp, you find your best moments in the contrast."),
            },
        },
    },
    RoleRule {
        priority: 0,
        rule: Rule {
            conditions: &[],
            payload: Role {
                id: "classic-romantic",
                name: "Classic Romantic",
                description: "You value genuine connection over technique. A steady look can mean more to you than any elaborate plan.",
                headline: Some("No elaborate plan needed: a single look from you says everything."),
            },
        },
    },
];

static TENDENCY_RULES: [Rule<Tendency>; 8] = [
    Rule {
        conditions: &[AtLeast(Fantasy, 65)],
        payload: Tendency { id: "role-play", label: "Role Play" },
    },
    Rule {
        conditions: &[AtLeast(Sensory, 65), AtLeast(Atmosphere, 60)],
        payload: Tendency { id: "sensation-play", label: "Sensation Play" },
    },
    Rule {
        conditions: &[AtLeast(Dominance, 65), AtLeast(Communication, 70)],
        payload: Tendency { id: "power-exchange", label: "Power Exchange" },
    },
    Rule {
        conditions: &[AtLeast(Intimacy, 70), AtLeast(Emotion, 65)],
        payload: Tendency { id: "aftercare-focus", label: "Aftercare Focus" },
    },
    Rule {
        conditions: &[AtLeast(Adventure, 70)],
        payload: Tendency { id: "boundary-curious", label: "Boundary Curious" },
    },
    Rule {
        conditions: &[AtLeast(Atmosphere, 70), AtLeast(Fantasy, 60)],
        payload: Tendency { id: "scene-setting", label: "Scene Setting" },
    },
    Rule {
        conditions: &[AtLeast(Communication, 70), AtLeast(Intimacy, 65)],
        payload: Tendency { id: "negotiation-oriented", label: "Negotiation Oriented" },
    },
    Rule {
        conditions: &[AtLeast(Sensory, 70), AtMost(Dominance, 35)],
        payload: Tendency { id: "sensory-surrender", label: "Sensory Surrender" },
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpectrumProfile {
    /// Lead/follow position, 0 = fully following, 100 = fully leading.
    pub spectrum: u8,
    pub spectrum_band: SpectrumBand,
    pub spectrum_label: &'static str,
    pub spectrum_description: &'static str,
    pub intensity: u8,
    pub intensity_band: IntensityBand,
    pub intensity_label: &'static str,
    pub role: &'static Role,
    pub tendencies: Vec<Tendency>,
    pub headline: String,
}

pub fn analyze_spectrum(scores: &DimensionScores) -> SpectrumProfile {
    let spectrum = scores[Dominance];
    let spectrum_band = SpectrumBand::from_score(spectrum);
    let intensity = intensity(scores);
    let intensity_band = IntensityBand::from_score(intensity);
    let role = match_role(scores);

    SpectrumProfile {
        spectrum,
        spectrum_band,
        spectrum_label: spectrum_band.label(),
        spectrum_description: spectrum_band.description(),
        intensity,
        intensity_band,
        intensity_label: intensity_band.label(),
        role,
        tendencies: tendencies(scores),
        headline: headline(role, spectrum_band, intensity),
    }
}

/// `round(1.1 * (0.30 sensory + 0.30 adventure + 0.25 fantasy + 0.15 |lead - 50|))`, clamped to 0..=100.
pub fn intensity(scores: &DimensionScores) -> u8 {
    let s = |d: Dimension| f64::from(scores[d]);
    let blend = 0.30 * s(Sensory)
        + 0.30 * s(Adventure)
        + 0.25 * s(Fantasy)
        + 0.15 * (s(Dominance) - 50.0).abs();
    (blend * 1.1).round().clamp(0.0, 100.0) as u8
}

/// Highest-priority role whose conditions hold.
pub fn match_role(scores: &DimensionScores) -> &'static Role {
    let catch_all = &ROLE_RULES[ROLE_RULES.len() - 1];
    let matched = ROLE_RULES
        .iter()
        .filter(|r| r.rule.matches(scores))
        .max_by_key(|r| r.priority)
        .unwrap_or(catch_all);
    &matched.rule.payload
}

/// Matching tendencies in table order, at most [`MAX_TENDENCIES`].
pub fn tendencies(scores: &DimensionScores) -> Vec<Tendency> {
    matching(&TENDENCY_RULES, scores)
        .take(MAX_TENDENCIES)
        .copied()
        .collect()
}

fn headline(role: &Role, band: SpectrumBand, intensity: u8) -> String {
    match role.headline {
        Some(headline) => headline.to_string(),
        None => format!(
            "A {} with {} allure",
            band.label(),
            if intensity >= INTENSE_HEADLINE_MIN {
                "intense"
            } else {
                "delicate"
            }
        ),
    }
}
