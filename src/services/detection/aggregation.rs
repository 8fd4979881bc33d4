// Aggregation Logic
// Combines the six dimension scores into one overall AI-likelihood

use crate::models::FeatureVector;
use super::smoothing::clamp01;

// Language and topic entropy are the strongest signals, reasoning and emotion the weakest.
pub const WEIGHT_LANGUAGE_COMPLEXITY: f64 = 0.30;
pub const WEIGHT_TOPIC_ENTROPY: f64 = 0.25;
pub const WEIGHT_BURSTINESS: f64 = 0.20;
pub const WEIGHT_TEMPLATE_SIMILARITY: f64 = 0.15;
pub const WEIGHT_REASONING_COMPLEXITY: f64 = 0.05;
pub const WEIGHT_EMOTION_VARIANCE: f64 = 0.05;

/// Weighted AI-likelihood in [0, 1].
/// Humanness dimensions contribute (1 - score); template similarity contributes its raw value.
pub fn ai_likelihood(features: &FeatureVector) -> f64 {
    let ai_like = WEIGHT_LANGUAGE_COMPLEXITY * (1.0 - features.language_complexity.score)
        + WEIGHT_TOPIC_ENTROPY * (1.0 - features.topic_entropy.score)
        + WEIGHT_BURSTINESS * (1.0 - features.burstiness.score)
        + WEIGHT_TEMPLATE_SIMILARITY * features.template_similarity.raw
        + WEIGHT_REASONING_COMPLEXITY * (1.0 - features.reasoning_complexity.score)
        + WEIGHT_EMOTION_VARIANCE * (1.0 - features.emotion_variance.score);

    clamp01(ai_like)
}

/// Overall AI score, 0..=100 (higher = stronger AI-generation traces).
pub fn overall_ai_score(features: &FeatureVector) -> u8 {
    (ai_likelihood(features) * 100.0).round() as u8
}
