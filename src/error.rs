//! Error types for Kindred.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Errors raised while loading or validating reference data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("Question {id} is invalid: {reason}")]
    InvalidQuestion { id: String, reason: String },

    #[error("Question bank is empty")]
    Empty,
}

/// Precondition violations on a quiz session.
///
/// A rejected call never changes the state it was made against.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Question {0} has already been answered")]
    AlreadyAnswered(String),

    #[error("Session is already complete")]
    SessionComplete,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid category selection: {0}")]
    InvalidCategorySelection(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Question {question} has no choice {choice}")]
    UnknownChoice { question: String, choice: String },

    #[error("Question {question} expects a {expected} answer")]
    WrongAnswerShape {
        question: String,
        expected: &'static str,
    },

    #[error("Slider value {0} is outside 0..=100")]
    SliderOutOfRange(u32),

    #[error("Contribution {value} for {dimension} is outside 0..=100")]
    DeltaOutOfRange { dimension: String, value: i64 },
}
