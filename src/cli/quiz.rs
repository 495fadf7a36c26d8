//! Interactive quiz over a line-oriented terminal.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use kindred::catalog::{AnswerShape, Category, Question, QuestionBank};
use kindred::session::Step;
use kindred::{Difficulty, EngineConfig, QuizError, QuizOutcome, QuizSession};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Args, Debug, Clone)]
pub struct QuizArgs {
    /// Topics to focus on (2 to 7, comma-separated ids).
    #[arg(long, value_delimiter = ',', required = true)]
    pub categories: Vec<Category>,

    /// beginner, intermediate or expert.
    #[arg(long, default_value = "intermediate")]
    pub difficulty: Difficulty,

    /// Seed for the question draw, for reproducible sessions.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name stored in the saved profile.
    #[arg(long, default_value = "You")]
    pub name: String,

    /// Write the partner profile JSON here when done.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

enum Command {
    Back,
    Quit,
    Value(u32),
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "b" | "back" => Some(Command::Back),
        "q" | "quit" => Some(Command::Quit),
        other => other.parse().ok().map(Command::Value),
    }
}

/// Run a session reading answers from `input` and writing prompts to `output`.
pub fn run_quiz<R, W>(
    args: QuizArgs,
    config: EngineConfig,
    mut input: R,
    mut output: W,
) -> anyhow::Result<QuizOutcome>
where
    R: BufRead,
    W: Write,
{
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = QuizSession::start(
        args.categories,
        args.difficulty,
        QuestionBank::builtin(),
        config,
        rng,
    )?;

    writeln!(
        output,
        "Answer with the option number, a slider value from 0 to 100, `b` to go back or `q` to finish early."
    )?;

    let mut line = String::new();
    let outcome = loop {
        let Some(question) = session.current_question() else {
            break session.finish();
        };
        let progress = session.progress();
        writeln!(output, "\n[{}/{}] {}", progress.current + 1, progress.total, question.text)?;
        print_options(&mut output, question)?;
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break session.finish();
        }

        let result = match parse_command(&line) {
            Some(Command::Quit) => break session.finish(),
            Some(Command::Back) => {
                if session.back().is_none() {
                    writeln!(output, "  Nothing to go back to.")?;
                }
                continue;
            }
            Some(Command::Value(value)) => answer(&mut session, question, value),
            None => {
                writeln!(output, "  Please enter a number, `b` or `q`.")?;
                continue;
            }
        };

        match result {
            Ok(Step::Ask(_)) => {}
            Ok(Step::Finished(outcome)) => break *outcome,
            Err(e) => writeln!(output, "  {e}")?,
        }
    };

    print_summary(&mut output, &outcome)?;

    if let Some(path) = &args.out {
        let profile = outcome.partner_profile(args.name.as_str());
        std::fs::write(path, serde_json::to_string_pretty(&profile)?)?;
        writeln!(output, "\nProfile saved to {}", path.display())?;
    }

    Ok(outcome)
}

/// Option numbers are 1-based; sliders take the raw value.
fn answer<'a>(
    session: &mut QuizSession<'a>,
    question: &'a Question,
    value: u32,
) -> Result<Step<'a>, QuizError> {
    match question.choices() {
        Some(choices) => {
            let choice = usize::try_from(value)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| choices.get(i))
                .ok_or_else(|| QuizError::UnknownChoice {
                    question: question.id.clone(),
                    choice: value.to_string(),
                })?;
            session.answer_choice(&choice.id)
        }
        None => session.answer_slider(value),
    }
}

fn print_options<W: Write>(output: &mut W, question: &Question) -> std::io::Result<()> {
    match &question.shape {
        AnswerShape::MultipleChoice { choices } | AnswerShape::CardSelect { choices } => {
            for (i, choice) in choices.iter().enumerate() {
                writeln!(output, "  {}. {}", i + 1, choice.text)?;
            }
        }
        AnswerShape::Slider {
            low_label,
            high_label,
            ..
        } => {
            writeln!(output, "  0 = {low_label}")?;
            writeln!(output, "  100 = {high_label}")?;
        }
    }
    Ok(())
}

fn print_summary<W: Write>(output: &mut W, outcome: &QuizOutcome) -> std::io::Result<()> {
    let analysis = &outcome.analysis;
    let spectrum = &outcome.spectrum;

    writeln!(output, "\nResult")?;
    writeln!(output, "======\n")?;
    if outcome.ended_early {
        writeln!(
            output,
            "  (finished early after {} answers)\n",
            outcome.answered.len()
        )?;
    }

    let primary = analysis.primary.archetype;
    writeln!(output, "  Primary match:  {} {}", primary.numeral, primary.name)?;
    writeln!(output, "                  {}", primary.description)?;
    for ranked in &analysis.top3 {
        writeln!(output, "    {:>3}%  {}", ranked.percentage, ranked.archetype.name)?;
    }

    writeln!(output)?;
    writeln!(output, "  Spectrum:       {} ({})", spectrum.spectrum_label, spectrum.spectrum)?;
    writeln!(output, "  Intensity:      {} ({})", spectrum.intensity_label, spectrum.intensity)?;
    writeln!(output, "  Role:           {}", spectrum.role.name)?;
    writeln!(output, "                  {}", spectrum.headline)?;

    if !analysis.trait_tags.is_empty() {
        let tags: Vec<&str> = analysis.trait_tags.iter().map(|t| t.label).collect();
        writeln!(output, "  Traits:         {}", tags.join(", "))?;
    }

    writeln!(output)?;
    for (dimension, score) in outcome.scores.iter() {
        writeln!(output, "  {:<14} {:>3}", dimension.name(), score)?;
    }
    Ok(())
}
