//! A single respondent's pass through the quiz.
//!
//! [`QuizSession`] wraps an [`AdaptiveState`] together with the question bank,
//! the engine tunables and a random source, and tracks which question is on
//! screen. Every answer either yields the next question or, once the target
//! is reached or the pool runs dry, the finished [`QuizOutcome`].

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::{AnalysisResult, SpectrumProfile, analyze_spectrum, analyze_with_config};
use crate::catalog::{Category, Question, QuestionBank};
use crate::compat::PartnerProfile;
use crate::config::EngineConfig;
use crate::dimensions::{DimensionDeltas, DimensionScores};
use crate::engine::{
    AdaptiveState, AnsweredQuestion, CompletionReason, Difficulty, NextQuestion, Progress,
    RandomSource,
};
use crate::error::QuizError;

/// Everything computed once a session stops asking questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub session_id: Uuid,
    pub scores: DimensionScores,
    pub analysis: AnalysisResult,
    pub spectrum: SpectrumProfile,
    pub answered: Vec<AnsweredQuestion>,
    /// `None` when the respondent stopped before the session completed.
    pub completion: Option<CompletionReason>,
    /// Set whenever fewer than the target number of questions were answered.
    pub ended_early: bool,
}

impl QuizOutcome {
    /// Profile for the compatibility report.
    pub fn partner_profile(&self, name: impl Into<String>) -> PartnerProfile {
        PartnerProfile::new(name, self.scores)
    }
}

/// What follows an accepted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<'a> {
    Ask(&'a Question),
    Finished(Box<QuizOutcome>),
}

pub struct QuizSession<'a> {
    id: Uuid,
    bank: &'a QuestionBank,
    config: EngineConfig,
    rng: Box<dyn RandomSource + Send>,
    state: AdaptiveState,
    current: Option<&'a Question>,
}

impl<'a> QuizSession<'a> {
    /// Validate the topic selection and pick the first question.
    pub fn start<R>(
        categories: Vec<Category>,
        difficulty: Difficulty,
        bank: &'a QuestionBank,
        config: EngineConfig,
        rng: R,
    ) -> Result<Self, QuizError>
    where
        R: RandomSource + Send + 'static,
    {
        let state = AdaptiveState::new(categories, difficulty)?;
        let mut session = Self {
            id: Uuid::new_v4(),
            bank,
            config,
            rng: Box::new(rng),
            state,
            current: None,
        };

        info!(
            session_id = %session.id,
            target = session.state.target_total(),
            categories = ?session.state.selected_categories(),
            %difficulty,
            "Quiz session started"
        );

        session.current = match session.pick_next() {
            NextQuestion::Ask(question) => Some(question),
            NextQuestion::Complete(_) => None,
        };
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &AdaptiveState {
        &self.state
    }

    /// The question awaiting an answer, `None` once the session is over.
    pub fn current_question(&self) -> Option<&'a Question> {
        self.current
    }

    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    /// Answer the current question with an explicit contribution.
    pub fn answer(&mut self, deltas: DimensionDeltas) -> Result<Step<'a>, QuizError> {
        let question = self.current.ok_or(QuizError::SessionComplete)?;
        self.state = self.state.record_answer(self.bank, &question.id, deltas)?;
        Ok(self.advance())
    }

    /// Answer the current choice-set question.
    pub fn answer_choice(&mut self, choice_id: &str) -> Result<Step<'a>, QuizError> {
        let question = self.current.ok_or(QuizError::SessionComplete)?;
        let deltas = question.resolve_choice(choice_id)?;
        self.answer(deltas)
    }

    /// Answer the current slider question with a value in 0..=100.
    pub fn answer_slider(&mut self, value: u32) -> Result<Step<'a>, QuizError> {
        let question = self.current.ok_or(QuizError::SessionComplete)?;
        let deltas = question.resolve_slider(value)?;
        self.answer(deltas)
    }

    /// Undo the most recent answer and put its question back on screen.
    ///
    /// Returns `None` when nothing has been answered yet.
    pub fn back(&mut self) -> Option<&'a Question> {
        let last = self.state.answers().last()?;
        let question = self.bank.get(&last.question_id)?;
        self.state = self.state.revert_last()?;
        self.current = Some(question);
        Some(question)
    }

    /// Stop now, whether or not the session completed.
    pub fn finish(self) -> QuizOutcome {
        let completion = if self.state.target_reached() {
            Some(CompletionReason::TargetReached)
        } else if self.state.is_complete(self.bank) {
            Some(CompletionReason::PoolExhausted)
        } else {
            None
        };
        self.outcome(completion)
    }

    fn pick_next(&mut self) -> NextQuestion<'a> {
        self.state
            .next_question_with(self.bank, &self.config.selection, &mut *self.rng)
    }

    fn advance(&mut self) -> Step<'a> {
        match self.pick_next() {
            NextQuestion::Ask(question) => {
                self.current = Some(question);
                Step::Ask(question)
            }
            NextQuestion::Complete(reason) => {
                self.current = None;
                Step::Finished(Box::new(self.outcome(Some(reason))))
            }
        }
    }

    fn outcome(&self, completion: Option<CompletionReason>) -> QuizOutcome {
        let scores = self.state.scores();
        let analysis = analyze_with_config(&scores, &self.config);
        let ended_early = completion != Some(CompletionReason::TargetReached);

        info!(
            session_id = %self.id,
            answered = self.state.answered_count(),
            primary = analysis.primary.archetype.id,
            ended_early,
            "Quiz session finished"
        );

        QuizOutcome {
            session_id: self.id,
            spectrum: analyze_spectrum(&scores),
            scores,
            analysis,
            answered: self.state.answers().to_vec(),
            completion,
            ended_early,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptedRandom;
    use pretty_assertions::assert_eq;

    fn make_session() -> QuizSession<'static> {
        QuizSession::start(
            vec![Category::PowerDynamics, Category::EmotionalDepth],
            Difficulty::Beginner,
            QuestionBank::builtin(),
            EngineConfig::default(),
            ScriptedRandom::new(vec![0.2, 0.7, 0.45]),
        )
        .unwrap()
    }

    /// First choice, or the slider at `slider`.
    fn answer_current(
        session: &mut QuizSession<'static>,
        slider: u32,
    ) -> Result<Step<'static>, QuizError> {
        let question = session.current_question().ok_or(QuizError::SessionComplete)?;
        match question.choices() {
            Some(choices) => session.answer_choice(&choices[0].id),
            None => session.answer_slider(slider),
        }
    }

    #[test]
    fn test_start_rejects_bad_selection() {
        let result = QuizSession::start(
            vec![Category::PowerDynamics],
            Difficulty::Beginner,
            QuestionBank::builtin(),
            EngineConfig::default(),
            ScriptedRandom::constant(0.0),
        );
        assert!(matches!(result, Err(QuizError::InvalidCategorySelection(_))));
    }

    #[test]
    fn test_session_runs_to_target() {
        let mut session = make_session();
        assert!(session.current_question().is_some());
        assert_eq!(session.progress().total, 7);

        let mut asked = 0;
        let outcome = loop {
            asked += 1;
            match answer_current(&mut session, 70).unwrap() {
                Step::Ask(question) => assert!(!session.state().is_answered(&question.id)),
                Step::Finished(outcome) => break outcome,
            }
        };

        assert_eq!(asked, 7);
        assert_eq!(outcome.answered.len(), 7);
        assert_eq!(outcome.completion, Some(CompletionReason::TargetReached));
        assert!(!outcome.ended_early);
        assert_eq!(outcome.session_id, session.id());
        assert_eq!(outcome.scores, session.state().scores());
        assert_eq!(outcome.spectrum, analyze_spectrum(&outcome.scores));
        assert!(session.current_question().is_none());
        assert_eq!(answer_current(&mut session, 70), Err(QuizError::SessionComplete));
    }

    #[test]
    fn test_back_restores_question_and_state() {
        let mut session = make_session();
        let first = session.current_question().unwrap();
        assert_eq!(session.back(), None);

        let before = session.state().clone();
        answer_current(&mut session, 20).unwrap();
        assert_eq!(session.progress().current, 1);

        assert_eq!(session.back().map(|q| q.id.as_str()), Some(first.id.as_str()));
        assert_eq!(session.current_question().map(|q| q.id.as_str()), Some(first.id.as_str()));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_rejected_answer_leaves_session_untouched() {
        let mut session = make_session();
        let question = session.current_question().unwrap();
        let before = session.state().clone();

        let wrong = match question.choices() {
            Some(_) => session.answer_slider(50),
            None => session.answer_choice("nope"),
        };
        assert!(matches!(wrong, Err(QuizError::WrongAnswerShape { .. })));

        let bad = match question.choices() {
            Some(_) => session.answer_choice("nope"),
            None => session.answer_slider(101),
        };
        assert!(matches!(
            bad,
            Err(QuizError::UnknownChoice { .. } | QuizError::SliderOutOfRange(101))
        ));

        assert_eq!(session.state(), &before);
        assert_eq!(session.current_question(), Some(question));
    }

    #[test]
    fn test_finish_early_is_flagged() {
        let mut session = make_session();
        answer_current(&mut session, 90).unwrap();
        answer_current(&mut session, 90).unwrap();
        let outcome = session.finish();
        assert!(outcome.ended_early);
        assert_eq!(outcome.completion, None);
        assert_eq!(outcome.answered.len(), 2);
    }

    #[test]
    fn test_pool_exhaustion_finishes_session() {
        let json = r#"[
            {"id": "q1", "category": "power-dynamics", "tier": 1,
             "primary_dimensions": ["dominance"], "text": "Lead or follow?",
             "kind": "slider", "low_label": "Follow", "high_label": "Lead",
             "dimensions": [{"key": "dominance"}]}
        ]"#;
        let bank = QuestionBank::from_json(json).unwrap();
        let mut session = QuizSession::start(
            vec![Category::PowerDynamics, Category::SensoryWorld],
            Difficulty::Beginner,
            &bank,
            EngineConfig::default(),
            ScriptedRandom::constant(0.5),
        )
        .unwrap();

        let Step::Finished(outcome) = session.answer_slider(80).unwrap() else {
            panic!("expected the session to finish");
        };
        assert_eq!(outcome.completion, Some(CompletionReason::PoolExhausted));
        assert!(outcome.ended_early);
        assert_eq!(outcome.scores[crate::dimensions::Dimension::Dominance], 80);
    }

    #[test]
    fn test_raw_deltas_are_accepted() {
        let mut session = make_session();
        let deltas = DimensionDeltas::from_raw([("dominance", 90), ("sparkle", 12)]).unwrap();
        session.answer(deltas).unwrap();
        assert_eq!(session.state().scores()[crate::dimensions::Dimension::Dominance], 90);
    }
}
