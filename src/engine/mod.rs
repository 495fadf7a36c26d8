//! Per-session selection state and answer aggregation.

pub mod adaptive;
pub mod aggregate;
pub mod random;

pub use adaptive::{
    AdaptiveState, AnsweredQuestion, CompletionReason, Difficulty, NextQuestion, Progress,
    ScoreBreakdown, ScoredQuestion, target_total,
};
pub use aggregate::{Accumulator, DimensionAccumulators, aggregate};
pub use random::{RandomSource, ScriptedRandom};
