//! Adaptive next-question selection.
//!
//! Every unanswered question in the bank is scored by summing independent
//! terms (topic match, tier fit, dimension coverage, shape variety, clustering
//! and balance penalties, late-game archetype separation, breadth). The leader
//! is picked outright when it clearly beats the runner-up; otherwise the top
//! candidates enter a weighted draw.
//!
//! [`AdaptiveState`] is a value: recording or reverting an answer returns a new
//! state and leaves the old one untouched.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::similarity::cosine;
use crate::catalog::{
    Archetype, Category, Question, QuestionBank, ShapeKind, Tier, archetypes, validate_selection,
};
use crate::config::SelectionConfig;
use crate::dimensions::{Dimension, DimensionDeltas, DimensionScores};
use crate::engine::aggregate::DimensionAccumulators;
use crate::engine::random::RandomSource;
use crate::error::QuizError;

/// Hard cap on the number of questions in one session.
pub const MAX_TARGET_TOTAL: usize = 55;

const MAX_COVERAGE_SUPPLEMENT: usize = 4;

const SELECTED_CATEGORY_BONUS: f64 = 25.0;
const OTHER_CATEGORY_BONUS: f64 = 3.0;
const TIER_STEP: f64 = 15.0;
const COVERAGE_WEIGHT: f64 = 20.0;
/// Answers after which a dimension counts as fully measured.
const CONFIDENT_ANSWER_COUNT: f64 = 4.0;
const VARIETY_BONUS: f64 = 8.0;
const VARIETY_WINDOW: usize = 2;
const CLUSTER_PENALTY: f64 = 12.0;
const CLUSTER_WINDOW: usize = 3;
const BALANCE_PENALTY: f64 = 15.0;
const BALANCE_SLACK: f64 = 2.0;
const DIFFERENTIATION_WEIGHT: f64 = 10.0;
const BREADTH_BONUS: f64 = 5.0;
const BREADTH_MIN_DIMENSIONS: usize = 3;

/// How long a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl Difficulty {
    /// Questions budgeted per selected topic.
    pub fn per_category(self) -> usize {
        match self {
            Difficulty::Beginner => 3,
            Difficulty::Intermediate => 5,
            Difficulty::Expert => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(QuizError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Number of questions a session asks before completing.
///
/// `per_category * n + min(ceil(n / 2), 4)`, capped at [`MAX_TARGET_TOTAL`].
pub fn target_total(difficulty: Difficulty, category_count: usize) -> usize {
    let base = difficulty.per_category() * category_count;
    let supplement = category_count.div_ceil(2).min(MAX_COVERAGE_SUPPLEMENT);
    (base + supplement).min(MAX_TARGET_TOTAL)
}

/// A recorded answer with the contribution it made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub deltas: DimensionDeltas,
}

/// Progress as shown to a respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Why a session stopped asking questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// The target question count was reached.
    TargetReached,
    /// No unanswered question remained before the target.
    PoolExhausted,
}

/// Result of asking the selector for the next question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextQuestion<'a> {
    Ask(&'a Question),
    Complete(CompletionReason),
}

/// Per-term contributions to a candidate's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub category: f64,
    pub tier: f64,
    pub coverage: f64,
    pub variety: f64,
    pub clustering: f64,
    pub balance: f64,
    pub differentiation: f64,
    pub breadth: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.category
            + self.tier
            + self.coverage
            + self.variety
            + self.clustering
            + self.balance
            + self.differentiation
            + self.breadth
    }
}

/// A candidate question with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredQuestion<'a> {
    pub question: &'a Question,
    pub breakdown: ScoreBreakdown,
    pub score: f64,
}

/// Everything about the answered history a candidate score depends on.
struct SelectionContext<'s> {
    selected: &'s [Category],
    accumulators: &'s DimensionAccumulators,
    ideal_tier: Tier,
    recent_shapes: Vec<ShapeKind>,
    recent_categories: Vec<Category>,
    category_counts: HashMap<Category, usize>,
    average_per_category: f64,
    contenders: Option<(&'static Archetype, &'static Archetype)>,
}

/// Per-session selector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveState {
    answered: Vec<AnsweredQuestion>,
    accumulators: DimensionAccumulators,
    selected: Vec<Category>,
    target_total: usize,
}

impl AdaptiveState {
    /// Start a session over `selected` topics (2 to 7, distinct).
    pub fn new(selected: Vec<Category>, difficulty: Difficulty) -> Result<Self, QuizError> {
        validate_selection(&selected)?;
        Ok(Self {
            answered: Vec::new(),
            accumulators: DimensionAccumulators::new(),
            target_total: target_total(difficulty, selected.len()),
            selected,
        })
    }

    pub fn selected_categories(&self) -> &[Category] {
        &self.selected
    }

    pub fn target_total(&self) -> usize {
        self.target_total
    }

    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answered
    }

    /// Answered question ids in answer order.
    pub fn answered_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.answered.iter().map(|a| a.question_id.as_str())
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answered.iter().any(|a| a.question_id == question_id)
    }

    pub fn accumulators(&self) -> &DimensionAccumulators {
        &self.accumulators
    }

    /// Unrounded means, 50 for untouched dimensions.
    pub fn running_means(&self) -> [f64; Dimension::COUNT] {
        self.accumulators.running_means()
    }

    /// Current profile: rounded means, 50 for untouched dimensions.
    pub fn scores(&self) -> DimensionScores {
        self.accumulators.scores()
    }

    /// Fraction of the target answered so far.
    pub fn progress_fraction(&self) -> f64 {
        if self.target_total == 0 {
            return 1.0;
        }
        self.answered.len() as f64 / self.target_total as f64
    }

    pub fn progress(&self) -> Progress {
        let percentage = if self.target_total > 0 {
            (self.progress_fraction() * 100.0).round() as u32
        } else {
            0
        };
        Progress {
            current: self.answered.len(),
            total: self.target_total,
            percentage,
        }
    }

    pub fn target_reached(&self) -> bool {
        self.answered.len() >= self.target_total
    }

    /// Target reached, or nothing left to ask.
    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        self.target_reached() || bank.questions().iter().all(|q| self.is_answered(&q.id))
    }

    /// Record an answer, returning the next state.
    ///
    /// Fails for an id outside `bank`, a repeated id, or a finished session.
    pub fn record_answer(
        &self,
        bank: &QuestionBank,
        question_id: &str,
        deltas: DimensionDeltas,
    ) -> Result<Self, QuizError> {
        if bank.get(question_id).is_none() {
            return Err(QuizError::UnknownQuestion(question_id.to_string()));
        }
        if self.is_answered(question_id) {
            return Err(QuizError::AlreadyAnswered(question_id.to_string()));
        }
        if self.target_reached() {
            return Err(QuizError::SessionComplete);
        }

        let mut next = self.clone();
        next.accumulators.add(&deltas);
        next.answered.push(AnsweredQuestion {
            question_id: question_id.to_string(),
            deltas,
        });
        Ok(next)
    }

    /// State before the most recent answer, or `None` when nothing is answered.
    pub fn revert_last(&self) -> Option<Self> {
        let mut previous = self.clone();
        let last = previous.answered.pop()?;
        previous.accumulators.remove(&last.deltas);
        Some(previous)
    }

    /// The two archetypes closest (by cosine) to the running means.
    pub fn closest_archetypes(&self) -> Option<(&'static Archetype, &'static Archetype)> {
        let means = self.running_means();
        let mut ranked: Vec<(&'static Archetype, f64)> = archetypes()
            .iter()
            .map(|a| (a, cosine(&means, &a.profile.to_f64())))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        match ranked.as_slice() {
            [first, second, ..] => Some((first.0, second.0)),
            _ => None,
        }
    }

    /// Score every unanswered question, best first.
    ///
    /// Ties keep bank order.
    pub fn score_candidates<'b>(
        &self,
        bank: &'b QuestionBank,
        config: &SelectionConfig,
    ) -> Vec<ScoredQuestion<'b>> {
        let context = self.selection_context(bank, config);
        let mut scored: Vec<ScoredQuestion<'b>> = bank
            .questions()
            .iter()
            .filter(|q| !self.is_answered(&q.id))
            .map(|question| {
                let breakdown = score_question(question, &context);
                ScoredQuestion {
                    question,
                    breakdown,
                    score: breakdown.total(),
                }
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }

    /// Next question with the default selection settings.
    pub fn next_question<'b, R>(&self, bank: &'b QuestionBank, rng: &mut R) -> NextQuestion<'b>
    where
        R: RandomSource + ?Sized,
    {
        self.next_question_with(bank, &SelectionConfig::default(), rng)
    }

    /// Pick the next question, or report why the session is complete.
    pub fn next_question_with<'b, R>(
        &self,
        bank: &'b QuestionBank,
        config: &SelectionConfig,
        rng: &mut R,
    ) -> NextQuestion<'b>
    where
        R: RandomSource + ?Sized,
    {
        if self.target_reached() {
            return NextQuestion::Complete(CompletionReason::TargetReached);
        }

        let candidates = self.score_candidates(bank, config);
        if candidates.is_empty() {
            warn!(
                answered = self.answered.len(),
                target = self.target_total,
                "Question pool exhausted before reaching the target"
            );
            return NextQuestion::Complete(CompletionReason::PoolExhausted);
        }

        NextQuestion::Ask(pick_candidate(&candidates, config, rng).question)
    }

    fn selection_context(&self, bank: &QuestionBank, config: &SelectionConfig) -> SelectionContext<'_> {
        let answered_questions: Vec<&Question> = self
            .answered
            .iter()
            .filter_map(|a| bank.get(&a.question_id))
            .collect();

        let recent_shapes = answered_questions
            .iter()
            .rev()
            .take(VARIETY_WINDOW)
            .map(|q| q.shape.kind())
            .collect();
        let recent_categories = answered_questions
            .iter()
            .rev()
            .take(CLUSTER_WINDOW)
            .map(|q| q.category)
            .collect();

        let mut category_counts = HashMap::new();
        for question in &answered_questions {
            *category_counts.entry(question.category).or_insert(0) += 1;
        }

        let progress = self.progress_fraction();
        let contenders = if progress > config.late_game_progress {
            self.closest_archetypes()
        } else {
            None
        };

        SelectionContext {
            selected: &self.selected,
            accumulators: &self.accumulators,
            ideal_tier: Tier::ideal_for_progress(progress),
            recent_shapes,
            recent_categories,
            category_counts,
            average_per_category: self.answered.len() as f64 / self.selected.len().max(1) as f64,
            contenders,
        }
    }
}

fn score_question(question: &Question, context: &SelectionContext<'_>) -> ScoreBreakdown {
    let category = if context.selected.contains(&question.category) {
        SELECTED_CATEGORY_BONUS
    } else {
        OTHER_CATEGORY_BONUS
    };

    let tier_gap = f64::from(question.tier.level().abs_diff(context.ideal_tier.level()));
    let tier = (2.0 - tier_gap) * TIER_STEP;

    let coverage: f64 = question
        .primary_dimensions
        .iter()
        .map(|d| {
            let confidence =
                (f64::from(context.accumulators.get(*d).count) / CONFIDENT_ANSWER_COUNT).min(1.0);
            (1.0 - confidence) * COVERAGE_WEIGHT
        })
        .sum();

    let variety = if context.recent_shapes.contains(&question.shape.kind()) {
        0.0
    } else {
        VARIETY_BONUS
    };

    let same_recent = context
        .recent_categories
        .iter()
        .filter(|c| **c == question.category)
        .count();
    let clustering = -(same_recent as f64) * CLUSTER_PENALTY;

    let this_count = context
        .category_counts
        .get(&question.category)
        .copied()
        .unwrap_or(0);
    let balance = if this_count as f64 > context.average_per_category + BALANCE_SLACK {
        -BALANCE_PENALTY
    } else {
        0.0
    };

    let differentiation: f64 = context.contenders.map_or(0.0, |(first, second)| {
        question
            .primary_dimensions
            .iter()
            .map(|d| {
                let gap = f64::from(first.profile.get(*d).abs_diff(second.profile.get(*d)));
                gap / 100.0 * DIFFERENTIATION_WEIGHT
            })
            .sum()
    });

    let breadth = if question.primary_dimensions.len() >= BREADTH_MIN_DIMENSIONS {
        BREADTH_BONUS
    } else {
        0.0
    };

    ScoreBreakdown {
        category,
        tier,
        coverage,
        variety,
        clustering,
        balance,
        differentiation,
        breadth,
    }
}

/// Clear leader outright, otherwise a weighted draw over the top of the list.
fn pick_candidate<'c, 'b, R>(
    candidates: &'c [ScoredQuestion<'b>],
    config: &SelectionConfig,
    rng: &mut R,
) -> &'c ScoredQuestion<'b>
where
    R: RandomSource + ?Sized,
{
    let pool = &candidates[..config.draw_pool.max(1).min(candidates.len())];

    if pool.len() >= 2 && pool[0].score - pool[1].score > config.clear_lead_margin {
        debug!(
            question = %pool[0].question.id,
            score = pool[0].score,
            runner_up = pool[1].score,
            "Picked clear leader"
        );
        return &pool[0];
    }

    let weight = |c: &ScoredQuestion<'_>| c.score.max(1.0);
    let total: f64 = pool.iter().map(weight).sum();
    let mut remaining = rng.next_unit() * total;
    for candidate in pool {
        remaining -= weight(candidate);
        if remaining <= 0.0 {
            debug!(
                question = %candidate.question.id,
                score = candidate.score,
                pool = pool.len(),
                "Picked by weighted draw"
            );
            return candidate;
        }
    }
    &pool[0]
}
