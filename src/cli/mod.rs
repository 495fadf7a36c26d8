//! Terminal front end for the quiz engine.
//!
//! Everything that touches files, stdin or stdout lives here; the library
//! itself stays I/O free.

pub mod analyze;
pub mod catalog;
pub mod couple;
pub mod quiz;

use std::path::Path;

use anyhow::Context;
use kindred::EngineConfig;

pub use catalog::CatalogCommand;
pub use quiz::QuizArgs;

/// Defaults, then the TOML file if one is given, then `KINDRED_*` variables.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let base = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            EngineConfig::from_toml_str(&contents)
                .with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    Ok(base.with_env_overrides()?)
}
