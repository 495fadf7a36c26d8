//! Classification of a finished profile.
//!
//! Everything here is a pure function of the 8 dimension scores (and the
//! engine tunables), so results can be recomputed at any time.

pub mod classifier;
pub mod insights;
pub mod rules;
pub mod similarity;
pub mod spectrum;
pub mod traits;

pub use classifier::{AnalysisResult, ArchetypeMatch, RankedMatch, analyze, analyze_with_config};
pub use insights::{Band, DimensionInsight};
pub use spectrum::{IntensityBand, Role, SpectrumBand, SpectrumProfile, Tendency, analyze_spectrum};
pub use traits::TraitTag;
