//! Listings of the built-in reference data.

use clap::Subcommand;
use kindred::catalog::{Category, QuestionBank, archetypes};

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommand {
    /// The twelve archetypes and their profiles
    Archetypes,

    /// Topics that can be selected for a quiz
    Categories,

    /// Questions in the built-in bank
    Questions {
        /// Only list questions of this topic
        #[arg(long)]
        category: Option<Category>,
    },
}

pub fn run_catalog_command(cmd: CatalogCommand) {
    match cmd {
        CatalogCommand::Archetypes => {
            println!("Archetypes:\n");
            for archetype in archetypes() {
                let profile: Vec<String> =
                    archetype.profile.values().iter().map(u8::to_string).collect();
                println!(
                    "  {:<5} {:<22} [{}]",
                    archetype.numeral,
                    archetype.name,
                    profile.join(", ")
                );
            }
        }
        CatalogCommand::Categories => {
            println!("Categories:\n");
            for category in Category::ALL {
                println!("  {:<22} {}", category.id(), category.description());
            }
        }
        CatalogCommand::Questions { category } => {
            let bank = QuestionBank::builtin();
            let questions = bank
                .questions()
                .iter()
                .filter(|q| category.is_none_or(|c| q.category == c));
            for question in questions {
                println!(
                    "  {:<6} {:<20} tier {} {:<16} {}",
                    question.id,
                    question.category.id(),
                    question.tier.level(),
                    question.shape.kind().as_str(),
                    question.text
                );
            }
        }
    }
    println!();
}
