//! Kindred: an adaptive relationship-style quiz engine.
//!
//! The crate is split along the flow of a quiz attempt:
//!
//! - [`catalog`] holds the immutable reference data (question bank, categories,
//!   archetypes).
//! - [`engine`] picks the next question and keeps the running per-dimension
//!   accumulators.
//! - [`analysis`] turns a finished profile into an archetype ranking, trait tags,
//!   narrative insights and a lead/follow spectrum profile.
//! - [`compat`] compares two finished profiles.
//! - [`session`] ties the pieces together for a single respondent.
//!
//! Everything here is synchronous and I/O free. The `kindred` binary owns the
//! terminal, the files and the logging subscriber.

pub mod analysis;
pub mod catalog;
pub mod compat;
pub mod config;
pub mod dimensions;
pub mod engine;
pub mod error;
pub mod session;

pub use analysis::{AnalysisResult, SpectrumProfile, analyze, analyze_spectrum};
pub use compat::{CoupleCompatibility, PartnerProfile, calculate_compatibility};
pub use config::EngineConfig;
pub use dimensions::{Dimension, DimensionDeltas, DimensionScores};
pub use engine::{AdaptiveState, Difficulty, NextQuestion};
pub use error::{CatalogError, ConfigError, QuizError};
pub use session::{QuizOutcome, QuizSession};
