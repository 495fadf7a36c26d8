mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kindred::DimensionScores;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{CatalogCommand, QuizArgs};

#[derive(Parser)]
#[command(name = "kindred", version, about = "Adaptive relationship-style quiz")]
struct Cli {
    /// Engine configuration TOML (environment variables still override it).
    #[arg(long, global = true, env = "KINDRED_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively.
    Quiz(QuizArgs),

    /// Classify a finished profile and print the result as JSON.
    Analyze {
        /// Eight comma-separated scores in dimension order.
        #[arg(long)]
        scores: DimensionScores,
    },

    /// Compare two saved partner profiles and print the report as JSON.
    Couple {
        /// First partner profile (JSON written by `kindred quiz --out`).
        partner1: PathBuf,

        /// Second partner profile.
        partner2: PathBuf,
    },

    /// List built-in reference data.
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kindred=info"));
    let fmt_layer = if cli.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Quiz(args) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            cli::quiz::run_quiz(args, config, stdin.lock(), stdout.lock())?;
        }
        Commands::Analyze { scores } => cli::analyze::run_analyze(&scores, &config)?,
        Commands::Couple { partner1, partner2 } => cli::couple::run_couple(&partner1, &partner2)?,
        Commands::Catalog(cmd) => cli::catalog::run_catalog_command(cmd),
    }

    Ok(())
}
