//! Lead balance and style narratives for a pair.

use serde::Serialize;

use super::PartnerProfile;
use crate::dimensions::Dimension;

/// Lead gap at or above which one partner clearly leads.
pub const CLEAR_LEAD_GAP: u8 = 30;
/// Lead gap at or above which the pair leans one way.
pub const TILTED_LEAD_GAP: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicKind {
    Complementary,
    Flexible,
    Balanced,
}

impl DynamicKind {
    pub fn of_gap(gap: u8) -> Self {
        if gap >= CLEAR_LEAD_GAP {
            DynamicKind::Complementary
        } else if gap >= TILTED_LEAD_GAP {
            DynamicKind::Flexible
        } else {
            DynamicKind::Balanced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DynamicKind::Complementary => "Complementary Dynamic",
            DynamicKind::Flexible => "Flexible Dynamic",
            DynamicKind::Balanced => "Balanced Dynamic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerBalance {
    pub kind: DynamicKind,
    pub label: &'static str,
    pub description: String,
    /// Second partner's lead score minus the first's; positive when the second leads.
    pub balance: i16,
    /// Name of the partner with more initiative, unless the pair is balanced.
    pub leader: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleComparison {
    pub lead_balance: &'static str,
    pub intensity_diff: u8,
    pub role_match: String,
    pub overall_style: &'static str,
}

pub fn power_balance(first: &PartnerProfile, second: &PartnerProfile) -> PowerBalance {
    let lead1 = first.scores[Dimension::Dominance];
    let lead2 = second.scores[Dimension::Dominance];
    let balance = i16::from(lead2) - i16::from(lead1);
    let kind = DynamicKind::of_gap(lead1.abs_diff(lead2));

    let label1 = first.spectrum.spectrum_label;
    let label2 = second.spectrum.spectrum_label;
    let leader = if lead1 > lead2 { &first.name } else { &second.name };

    let (description, leader) = match kind {
        DynamicKind::Complementary => (
            format!(
                "A natural dynamic where {leader} leads and the other follows. \
                 The combination of {label1} and {label2} fulfils each other's tendencies."
            ),
            Some(leader.clone()),
        ),
        DynamicKind::Flexible => (
            format!(
                "A slight tilt in initiative allows natural role switching. \
                 The {label1} and {label2} combination enables varied styles."
            ),
            Some(leader.clone()),
        ),
        DynamicKind::Balanced => (
            "Similar lead levels make a switching dynamic ideal. Enjoy a fluid \
             relationship where leadership naturally alternates between you."
                .to_string(),
            None,
        ),
    };

    PowerBalance {
        kind,
        label: kind.label(),
        description,
        balance,
        leader,
    }
}

pub fn compare_styles(first: &PartnerProfile, second: &PartnerProfile) -> StyleComparison {
    let (s1, s2) = (&first.spectrum, &second.spectrum);

    let lead_balance = match DynamicKind::of_gap(s1.spectrum.abs_diff(s2.spectrum)) {
        DynamicKind::Complementary => {
            "An ideal pairing where one clearly leads and the other follows"
        }
        DynamicKind::Flexible => "A slight difference enabling flexible role exchange",
        DynamicKind::Balanced => "A pairing that challenges and grows from similar positions",
    };

    let role_match = if s1.role.id == s2.role.id {
        format!(
            "Both share {} tendencies: high empathy but may need role negotiation",
            s1.role.name
        )
    } else {
        format!(
            "The unique combination of {} and {} creates diverse experiences",
            s1.role.name, s2.role.name
        )
    };

    let mean_intensity = (f64::from(s1.intensity) + f64::from(s2.intensity)) / 2.0;
    let overall_style = if mean_intensity >= 70.0 {
        "An intense, adventurous couple: exploring boundaries together"
    } else if mean_intensity >= 45.0 {
        "A balanced couple: freely moving between gentle and intense"
    } else {
        "A gentle, emotional couple: creating closeness through emotional depth"
    };

    StyleComparison {
        lead_balance,
        intensity_diff: s1.intensity.abs_diff(s2.intensity),
        role_match,
        overall_style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::DimensionScores;
    use pretty_assertions::assert_eq;

    fn make_partner(name: &str, values: [u8; 8]) -> PartnerProfile {
        PartnerProfile::new(name, DimensionScores::new(values))
    }

    #[test]
    fn test_gap_bands() {
        assert_eq!(DynamicKind::of_gap(0), DynamicKind::Balanced);
        assert_eq!(DynamicKind::of_gap(14), DynamicKind::Balanced);
        assert_eq!(DynamicKind::of_gap(15), DynamicKind::Flexible);
        assert_eq!(DynamicKind::of_gap(29), DynamicKind::Flexible);
        assert_eq!(DynamicKind::of_gap(30), DynamicKind::Complementary);
    }

    #[test]
    fn test_clear_leader_is_named() {
        let alex = make_partner("Alex", [25, 60, 50, 50, 50, 50, 50, 50]);
        let sam = make_partner("Sam", [85, 60, 50, 50, 50, 50, 50, 50]);
        let balance = power_balance(&alex, &sam);
        assert_eq!(balance.kind, DynamicKind::Complementary);
        assert_eq!(balance.balance, 60);
        assert_eq!(balance.leader.as_deref(), Some("Sam"));
        assert!(balance.description.contains("where Sam leads"));
        assert!(balance.description.contains("Follow and Lead"));

        let reversed = power_balance(&sam, &alex);
        assert_eq!(reversed.balance, -60);
        assert_eq!(reversed.leader.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_balanced_pair_has_no_leader() {
        let alex = make_partner("Alex", [52; 8]);
        let sam = make_partner("Sam", [45; 8]);
        let balance = power_balance(&alex, &sam);
        assert_eq!(balance.kind, DynamicKind::Balanced);
        assert_eq!(balance.balance, -7);
        assert_eq!(balance.leader, None);
    }

    #[test]
    fn test_flexible_pair_names_the_stronger_lead() {
        let alex = make_partner("Alex", [60; 8]);
        let sam = make_partner("Sam", [40; 8]);
        let balance = power_balance(&alex, &sam);
        assert_eq!(balance.kind, DynamicKind::Flexible);
        assert_eq!(balance.leader.as_deref(), Some("Alex"));
    }

    #[test]
    fn test_same_role_asks_for_negotiation() {
        let alex = make_partner("Alex", [50; 8]);
        let sam = make_partner("Sam", [50; 8]);
        let styles = compare_styles(&alex, &sam);
        assert_eq!(styles.intensity_diff, 0);
        assert!(styles.role_match.starts_with("Both share"));
        assert_eq!(
            styles.lead_balance,
            "A pairing that challenges and grows from similar positions"
        );
    }

    #[test]
    fn test_overall_style_follows_mean_intensity() {
        // Intensities 12 and 91.
        let calm = make_partner("Alex", [50, 50, 10, 10, 50, 50, 50, 20]);
        let bold = make_partner("Sam", [50, 50, 100, 100, 50, 50, 50, 90]);
        let styles = compare_styles(&calm, &calm.clone());
        assert!(styles.overall_style.starts_with("A gentle"));
        let styles = compare_styles(&bold, &bold.clone());
        assert!(styles.overall_style.starts_with("An intense"));
        let styles = compare_styles(&calm, &bold);
        assert_eq!(styles.intensity_diff, 79);
        assert!(styles.overall_style.starts_with("A balanced"));
    }
}
