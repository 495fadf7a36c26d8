//! The question bank and answer resolution.
//!
//! The built-in bank ships as JSON in `data/questions.json` and is parsed and
//! validated once, on first use. Callers can also load their own bank with
//! [`QuestionBank::from_json`]; it goes through the same validation.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::catalog::categories::Category;
use crate::dimensions::{Dimension, DimensionDeltas, MAX_SCORE};
use crate::error::{CatalogError, QuizError};

const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");

static BUILTIN_BANK: LazyLock<QuestionBank> = LazyLock::new(|| {
    QuestionBank::from_json(BUILTIN_QUESTIONS).expect("bundled question bank is valid")
});

/// Where a question sits in the progression of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Broad questions asked early.
    Core = 1,
    /// Follow-ups once a rough picture exists.
    Deepening = 2,
    /// Questions that separate close archetypes near the end.
    Differentiating = 3,
}

impl Tier {
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Tier the selector prefers at a given completion fraction.
    pub fn ideal_for_progress(progress: f64) -> Self {
        if progress < 0.35 {
            Tier::Core
        } else if progress < 0.7 {
            Tier::Deepening
        } else {
            Tier::Differentiating
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Tier::Core),
            2 => Ok(Tier::Deepening),
            3 => Ok(Tier::Differentiating),
            other => Err(format!("tier must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.level()
    }
}

/// One selectable option of a choice-set question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub scores: DimensionDeltas,
}

/// A dimension driven by a slider. Inverted entries score `100 - value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderDimension {
    pub key: Dimension,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inverted: bool,
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerShape {
    MultipleChoice {
        choices: Vec<Choice>,
    },
    CardSelect {
        choices: Vec<Choice>,
    },
    Slider {
        low_label: String,
        high_label: String,
        dimensions: Vec<SliderDimension>,
    },
}

/// Discriminant of [`AnswerShape`], used for variety scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    MultipleChoice,
    CardSelect,
    Slider,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::MultipleChoice => "multiple_choice",
            ShapeKind::CardSelect => "card_select",
            ShapeKind::Slider => "slider",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AnswerShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            AnswerShape::MultipleChoice { .. } => ShapeKind::MultipleChoice,
            AnswerShape::CardSelect { .. } => ShapeKind::CardSelect,
            AnswerShape::Slider { .. } => ShapeKind::Slider,
        }
    }
}

/// A single question in the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: Category,
    pub tier: Tier,
    pub primary_dimensions: Vec<Dimension>,
    pub text: String,
    #[serde(flatten)]
    pub shape: AnswerShape,
}

impl Question {
    /// Options of a choice-set question, `None` for sliders.
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.shape {
            AnswerShape::MultipleChoice { choices } | AnswerShape::CardSelect { choices } => {
                Some(choices)
            }
            AnswerShape::Slider { .. } => None,
        }
    }

    /// Contribution of picking `choice_id`.
    pub fn resolve_choice(&self, choice_id: &str) -> Result<DimensionDeltas, QuizError> {
        let choices = self.choices().ok_or_else(|| QuizError::WrongAnswerShape {
            question: self.id.clone(),
            expected: ShapeKind::Slider.as_str(),
        })?;
        choices
            .iter()
            .find(|c| c.id == choice_id)
            .map(|c| c.scores)
            .ok_or_else(|| QuizError::UnknownChoice {
                question: self.id.clone(),
                choice: choice_id.to_string(),
            })
    }

    /// Contribution of setting the slider to `value`.
    pub fn resolve_slider(&self, value: u32) -> Result<DimensionDeltas, QuizError> {
        let AnswerShape::Slider { dimensions, .. } = &self.shape else {
            return Err(QuizError::WrongAnswerShape {
                question: self.id.clone(),
                expected: self.shape.kind().as_str(),
            });
        };
        let value = u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_SCORE)
            .ok_or(QuizError::SliderOutOfRange(value))?;

        Ok(dimensions.iter().fold(DimensionDeltas::new(), |deltas, dim| {
            let contribution = if dim.inverted { MAX_SCORE - value } else { value };
            deltas.with(dim.key, contribution)
        }))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidQuestion {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if self.primary_dimensions.is_empty() {
            return Err(invalid("no primary dimensions"));
        }

        match &self.shape {
            AnswerShape::MultipleChoice { choices } | AnswerShape::CardSelect { choices } => {
                if choices.is_empty() {
                    return Err(invalid("no choices"));
                }
                let mut seen = HashSet::new();
                for choice in choices {
                    if !seen.insert(choice.id.as_str()) {
                        return Err(invalid(&format!("duplicate choice id {}", choice.id)));
                    }
                    if choice.scores.is_empty() {
                        return Err(invalid(&format!("choice {} has no scores", choice.id)));
                    }
                }
            }
            AnswerShape::Slider { dimensions, .. } => {
                if dimensions.is_empty() {
                    return Err(invalid("slider drives no dimensions"));
                }
            }
        }
        Ok(())
    }
}

/// Immutable, ordered collection of questions with id lookup.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    /// The bank compiled into the crate.
    pub fn builtin() -> &'static QuestionBank {
        &BUILTIN_BANK
    }

    /// Parse and validate a bank from a JSON array of questions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::from_questions(questions)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(questions.len());
        for (i, question) in questions.iter().enumerate() {
            question.validate()?;
            if index.insert(question.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(Self { questions, index })
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&i| &self.questions[i])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Question> + '_ {
        self.questions.iter().filter(move |q| q.category == category)
    }
}
