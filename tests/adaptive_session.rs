//! End-to-end sessions over the built-in question bank.

use std::collections::HashSet;

use kindred::catalog::{Category, QuestionBank};
use kindred::engine::{CompletionReason, ScriptedRandom, target_total};
use kindred::session::Step;
use kindred::{Difficulty, EngineConfig, QuizError, QuizOutcome, QuizSession};
use pretty_assertions::assert_eq;

fn make_session(categories: Vec<Category>, difficulty: Difficulty) -> QuizSession<'static> {
    QuizSession::start(
        categories,
        difficulty,
        QuestionBank::builtin(),
        EngineConfig::default(),
        ScriptedRandom::new(vec![0.31, 0.82, 0.07, 0.56]),
    )
    .unwrap()
}

/// Always the last choice; sliders at `slider`.
fn run_to_end(session: &mut QuizSession<'static>, slider: u32) -> (QuizOutcome, Vec<String>) {
    let mut asked = Vec::new();
    loop {
        let question = session.current_question().expect("an unfinished session has a question");
        asked.push(question.id.clone());
        let step = match question.choices() {
            Some(choices) => session.answer_choice(&choices[choices.len() - 1].id),
            None => session.answer_slider(slider),
        }
        .unwrap();
        if let Step::Finished(outcome) = step {
            return (*outcome, asked);
        }
    }
}

fn answer_first(session: &mut QuizSession<'static>) -> Result<Step<'static>, QuizError> {
    let question = session.current_question().ok_or(QuizError::SessionComplete)?;
    match question.choices() {
        Some(choices) => session.answer_choice(&choices[0].id),
        None => session.answer_slider(50),
    }
}

#[test]
fn test_expert_session_asks_the_full_target_without_repeats() {
    let categories = vec![
        Category::PowerDynamics,
        Category::SensoryWorld,
        Category::FantasyImagination,
        Category::TrustVulnerability,
    ];
    let mut session = make_session(categories, Difficulty::Expert);
    let target = target_total(Difficulty::Expert, 4);
    assert_eq!(session.progress().total, target);

    let (outcome, asked) = run_to_end(&mut session, 85);
    assert_eq!(asked.len(), target);
    assert_eq!(asked.iter().collect::<HashSet<_>>().len(), target);
    assert_eq!(outcome.completion, Some(CompletionReason::TargetReached));
    assert_eq!(
        outcome.answered.iter().map(|a| a.question_id.clone()).collect::<Vec<_>>(),
        asked
    );
}

#[test]
fn test_selected_topics_dominate_the_session() {
    let mut session = make_session(
        vec![Category::VerbalExpression, Category::AtmosphereMood],
        Difficulty::Intermediate,
    );
    let (_, asked) = run_to_end(&mut session, 40);
    let bank = QuestionBank::builtin();
    let on_topic = asked
        .iter()
        .filter(|id| {
            matches!(
                bank.get(id).unwrap().category,
                Category::VerbalExpression | Category::AtmosphereMood
            )
        })
        .count();
    assert!(on_topic * 2 >= asked.len(), "{on_topic} of {}", asked.len());
}

#[test]
fn test_same_script_replays_the_same_session() {
    let run = || {
        let mut session = make_session(
            vec![Category::EmotionalDepth, Category::PassionIntensity, Category::IntimacyBond],
            Difficulty::Beginner,
        );
        run_to_end(&mut session, 60)
    };
    let (first, first_asked) = run();
    let (second, second_asked) = run();
    assert_eq!(first_asked, second_asked);
    assert_eq!(first.scores, second.scores);
    assert_eq!(first.analysis.primary.archetype.id, second.analysis.primary.archetype.id);
}

#[test]
fn test_back_then_forward_matches_a_straight_run() {
    let mut session = make_session(
        vec![Category::PowerDynamics, Category::AdventureThrill],
        Difficulty::Beginner,
    );
    let first = session.current_question().unwrap();

    answer_first(&mut session).unwrap();
    let after_one = session.state().clone();
    answer_first(&mut session).unwrap();
    session.back().unwrap();
    assert_eq!(session.state(), &after_one);

    session.back().unwrap();
    assert_eq!(session.current_question().unwrap().id, first.id);
    assert_eq!(session.state().answered_count(), 0);
    assert_eq!(session.back(), None);
}

#[test]
fn test_answering_after_completion_is_rejected() {
    let mut session = make_session(
        vec![Category::PowerDynamics, Category::EmotionalDepth],
        Difficulty::Beginner,
    );
    let (outcome, _) = run_to_end(&mut session, 50);
    assert_eq!(session.answer_slider(50), Err(QuizError::SessionComplete));
    assert_eq!(session.answer_choice("rr-1a"), Err(QuizError::SessionComplete));
    assert_eq!(session.state().answered_count(), outcome.answered.len());
}
