//! Engine tunables.
//!
//! Resolution order: built-in defaults, then an optional TOML document, then
//! `KINDRED_*` environment variables. The defaults are tuned against the
//! built-in archetype catalog.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// All engine tunables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub amplification: AmplificationConfig,
    pub similarity: SimilarityConfig,
    pub selection: SelectionConfig,
}

/// Stretching of flat answer patterns before archetype matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmplificationConfig {
    /// Profiles with a population std dev below this are stretched.
    pub std_dev_threshold: f64,
    /// Cap on the stretch factor.
    pub max_factor: f64,
}

impl Default for AmplificationConfig {
    fn default() -> Self {
        Self {
            std_dev_threshold: 12.0,
            max_factor: 2.5,
        }
    }
}

/// Weights of the hybrid archetype similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub pearson_weight: f64,
    pub euclidean_weight: f64,
    /// Maximum deduction for a total variance mismatch.
    pub variance_penalty: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            pearson_weight: 0.40,
            euclidean_weight: 0.60,
            variance_penalty: 0.15,
        }
    }
}

/// Next-question selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Lead over the runner-up that makes the top candidate a certain pick.
    pub clear_lead_margin: f64,
    /// Number of top candidates entering the weighted draw.
    pub draw_pool: usize,
    /// Progress after which questions separating the two closest archetypes get a bonus.
    pub late_game_progress: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            clear_lead_margin: 10.0,
            draw_pool: 3,
            late_game_progress: 0.65,
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Parse a TOML document. Missing sections and keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `KINDRED_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let config = Self {
            amplification: AmplificationConfig {
                std_dev_threshold: parse_optional_env(
                    "KINDRED_AMPLIFY_STD_DEV_THRESHOLD",
                    self.amplification.std_dev_threshold,
                )?,
                max_factor: parse_optional_env(
                    "KINDRED_AMPLIFY_MAX_FACTOR",
                    self.amplification.max_factor,
                )?,
            },
            similarity: SimilarityConfig {
                pearson_weight: parse_optional_env(
                    "KINDRED_SIMILARITY_PEARSON_WEIGHT",
                    self.similarity.pearson_weight,
                )?,
                euclidean_weight: parse_optional_env(
                    "KINDRED_SIMILARITY_EUCLIDEAN_WEIGHT",
                    self.similarity.euclidean_weight,
                )?,
                variance_penalty: parse_optional_env(
                    "KINDRED_SIMILARITY_VARIANCE_PENALTY",
                    self.similarity.variance_penalty,
                )?,
            },
            selection: SelectionConfig {
                clear_lead_margin: parse_optional_env(
                    "KINDRED_SELECT_CLEAR_LEAD_MARGIN",
                    self.selection.clear_lead_margin,
                )?,
                draw_pool: parse_optional_env("KINDRED_SELECT_DRAW_POOL", self.selection.draw_pool)?,
                late_game_progress: parse_optional_env(
                    "KINDRED_SELECT_LATE_GAME_PROGRESS",
                    self.selection.late_game_progress,
                )?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("amplification.std_dev_threshold", self.amplification.std_dev_threshold),
            ("similarity.pearson_weight", self.similarity.pearson_weight),
            ("similarity.euclidean_weight", self.similarity.euclidean_weight),
            ("similarity.variance_penalty", self.similarity.variance_penalty),
            ("selection.clear_lead_margin", self.selection.clear_lead_margin),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, format!("must be a finite non-negative number, got {value}")));
            }
        }

        if !self.amplification.max_factor.is_finite() || self.amplification.max_factor < 1.0 {
            return Err(invalid(
                "amplification.max_factor",
                format!("must be at least 1, got {}", self.amplification.max_factor),
            ));
        }
        if self.selection.draw_pool == 0 {
            return Err(invalid("selection.draw_pool", "must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.selection.late_game_progress) {
            return Err(invalid(
                "selection.late_game_progress",
                format!("must be within [0, 1], got {}", self.selection.late_game_progress),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
}

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to read {key}: {e}"
        ))),
    }
}

pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)?
        .map(|s| {
            s.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{e}"),
            })
        })
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}
