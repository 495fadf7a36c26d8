//! Vector math over 8-dimension profiles.

use crate::config::{AmplificationConfig, SimilarityConfig};
use crate::dimensions::{Dimension, MAX_SCORE};

pub type Vector = [f64; Dimension::COUNT];

pub fn mean(v: &Vector) -> f64 {
    v.iter().sum::<f64>() / v.len() as f64
}

/// Population variance.
pub fn variance(v: &Vector) -> f64 {
    let m = mean(v);
    v.iter().map(|x| (x - m).powi(2)).sum::<f64>() / v.len() as f64
}

/// Cosine similarity; 0 when either vector has zero magnitude.
pub fn cosine(a: &Vector, b: &Vector) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

/// Pearson correlation remapped from [-1, 1] to [0, 1].
///
/// Returns 0.5 when either vector has zero variance.
pub fn pearson_unit(a: &Vector, b: &Vector) -> f64 {
    let (mean_a, mean_b) = (mean(a), mean(b));
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    let denominator = (var_a * var_b).sqrt();
    if denominator == 0.0 {
        return 0.5;
    }
    (cov / denominator + 1.0) / 2.0
}

pub fn euclidean(a: &Vector, b: &Vector) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Largest possible distance between two profiles: sqrt(8 * 100^2).
pub fn max_distance() -> f64 {
    (Dimension::COUNT as f64 * f64::from(MAX_SCORE).powi(2)).sqrt()
}

/// Stretch a flat profile away from its mean.
///
/// Applies only when `0 < std dev < threshold`. Each value moves by
/// `min(threshold / std dev, max_factor)` and is clamped to 0..=100.
pub fn amplify(raw: &Vector, config: &AmplificationConfig) -> Vector {
    let m = mean(raw);
    let std_dev = variance(raw).sqrt();
    if !(std_dev > 0.0 && std_dev < config.std_dev_threshold) {
        return *raw;
    }
    let factor = (config.std_dev_threshold / std_dev).min(config.max_factor);
    raw.map(|v| (m + (v - m) * factor).clamp(0.0, f64::from(MAX_SCORE)))
}

/// Blend of shape correlation and absolute distance, minus a variance-mismatch penalty.
pub fn hybrid_similarity(user: &Vector, archetype: &Vector, config: &SimilarityConfig) -> f64 {
    let pearson = pearson_unit(user, archetype);
    let euclid_inverse = 1.0 - euclidean(user, archetype) / max_distance();
    let raw = config.pearson_weight * pearson + config.euclidean_weight * euclid_inverse;

    let (var_user, var_archetype) = (variance(user), variance(archetype));
    let var_ratio = var_user.min(var_archetype) / var_user.max(var_archetype).max(1.0);
    (raw - (1.0 - var_ratio) * config.variance_penalty).max(0.0)
}
