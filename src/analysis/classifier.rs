//! Archetype matching for a finished profile.

use std::cmp::{Ordering, Reverse};

use serde::Serialize;

use super::insights::{DimensionInsight, dimension_insights};
use super::similarity::{amplify, hybrid_similarity};
use super::traits::{TraitTag, trait_tags};
use crate::catalog::{Archetype, archetypes};
use crate::config::EngineConfig;
use crate::dimensions::{Dimension, DimensionScores};

/// Raw scores at or above this make a dimension dominant.
pub const DOMINANT_MIN: u8 = 70;
/// Raw scores at or below this make a dimension recessive.
pub const RECESSIVE_MAX: u8 = 30;

const TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeMatch {
    pub archetype: &'static Archetype,
    pub similarity: f64,
}

/// One of the top three matches with its share of their combined similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub archetype: &'static Archetype,
    pub similarity: f64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub scores: DimensionScores,
    pub primary: ArchetypeMatch,
    pub secondary: ArchetypeMatch,
    pub top3: Vec<RankedMatch>,
    /// Every archetype, best match first.
    pub all_similarities: Vec<ArchetypeMatch>,
    pub trait_tags: Vec<TraitTag>,
    pub dimension_insights: Vec<DimensionInsight>,
    /// Highest first.
    pub dominant_dimensions: Vec<Dimension>,
    /// Highest first.
    pub recessive_dimensions: Vec<Dimension>,
}

/// Analyze with the default tunables.
pub fn analyze(scores: &DimensionScores) -> AnalysisResult {
    analyze_with_config(scores, &EngineConfig::default())
}

pub fn analyze_with_config(scores: &DimensionScores, config: &EngineConfig) -> AnalysisResult {
    let all_similarities = rank_archetypes(scores, config);
    let top3 = top_matches(&all_similarities);

    let mut by_score: Vec<(Dimension, u8)> = scores.iter().collect();
    by_score.sort_by_key(|&(_, score)| Reverse(score));
    let dominant_dimensions = by_score
        .iter()
        .filter(|(_, score)| *score >= DOMINANT_MIN)
        .map(|(d, _)| *d)
        .collect();
    let recessive_dimensions = by_score
        .iter()
        .filter(|(_, score)| *score <= RECESSIVE_MAX)
        .map(|(d, _)| *d)
        .collect();

    AnalysisResult {
        scores: *scores,
        primary: all_similarities[0].clone(),
        secondary: all_similarities[1].clone(),
        top3,
        trait_tags: trait_tags(scores),
        dimension_insights: dimension_insights(scores),
        dominant_dimensions,
        recessive_dimensions,
        all_similarities,
    }
}

/// Hybrid similarity against every archetype, best first. Ties keep catalog order.
pub fn rank_archetypes(scores: &DimensionScores, config: &EngineConfig) -> Vec<ArchetypeMatch> {
    let user = amplify(&scores.to_f64(), &config.amplification);
    let mut ranked: Vec<ArchetypeMatch> = archetypes()
        .iter()
        .map(|archetype| ArchetypeMatch {
            archetype,
            similarity: hybrid_similarity(&user, &archetype.profile.to_f64(), &config.similarity),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

fn top_matches(ranked: &[ArchetypeMatch]) -> Vec<RankedMatch> {
    let top = &ranked[..TOP_N.min(ranked.len())];
    let total: f64 = top.iter().map(|m| m.similarity).sum();

    if total <= 0.0 {
        // Nothing to normalize against: split evenly, remainder to the leader.
        let share = 100 / top.len().max(1) as u32;
        let remainder = 100 - share * top.len() as u32;
        return top
            .iter()
            .enumerate()
            .map(|(i, m)| RankedMatch {
                archetype: m.archetype,
                similarity: m.similarity,
                percentage: share + if i == 0 { remainder } else { 0 },
            })
            .collect();
    }

    top.iter()
        .map(|m| RankedMatch {
            archetype: m.archetype,
            similarity: m.similarity,
            percentage: (m.similarity / total * 100.0).round() as u32,
        })
        .collect()
}
