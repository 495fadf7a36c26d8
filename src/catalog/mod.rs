//! Immutable reference data: topics, questions and archetypes.

pub mod archetypes;
pub mod categories;
pub mod questions;

pub use archetypes::{Archetype, archetypes, find_archetype};
pub use categories::{Category, validate_selection};
pub use questions::{AnswerShape, Choice, Question, QuestionBank, ShapeKind, SliderDimension, Tier};
