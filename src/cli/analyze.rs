//! One-shot classification of a score vector.

use kindred::analysis::analyze_with_config;
use kindred::{DimensionScores, EngineConfig, analyze_spectrum};
use serde_json::json;

pub fn run_analyze(scores: &DimensionScores, config: &EngineConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&analysis_report(scores, config))?);
    Ok(())
}

fn analysis_report(scores: &DimensionScores, config: &EngineConfig) -> serde_json::Value {
    json!({
        "analysis": analyze_with_config(scores, config),
        "spectrum": analyze_spectrum(scores),
    })
}
