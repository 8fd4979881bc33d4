// Smoothing
// Maps raw statistics onto bounded [0, 1] humanness scores.
//
// The curve constants below are empirically chosen hyperparameters. Scores are
// only comparable across runs that use the same values.

use serde::{Deserialize, Serialize};

#[inline]
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Standard logistic curve centred on `midpoint`.
#[inline]
pub fn logistic(x: f64, midpoint: f64, slope: f64) -> f64 {
    1.0 / (1.0 + (-slope * (x - midpoint)).exp())
}

/// Saturating ratio x / (x + c); non-positive x maps to 0.
#[inline]
pub fn smooth_ratio(x: f64, c: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    x / (x + c)
}

#[inline]
pub fn round_to_1_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Entropy of overlapping character n-grams pushed through a logistic curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntropyCurve {
    pub ngram: usize,
    /// Shorter texts return `neutral` without computing entropy.
    pub min_chars: usize,
    pub midpoint: f64,
    pub slope: f64,
    pub neutral: f64,
}

impl EntropyCurve {
    pub fn apply(&self, entropy: f64) -> f64 {
        clamp01(logistic(entropy, self.midpoint, self.slope))
    }
}

/// score = floor + span * x / (x + scale), clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioCurve {
    pub floor: f64,
    pub span: f64,
    pub scale: f64,
    pub neutral: f64,
}

impl RatioCurve {
    pub fn apply(&self, x: f64) -> f64 {
        clamp01(self.floor + self.span * smooth_ratio(x, self.scale))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringParams {
    #[serde(default = "default_language_complexity")]
    pub language_complexity: EntropyCurve,
    #[serde(default = "default_topic_entropy")]
    pub topic_entropy: EntropyCurve,
    #[serde(default = "default_burstiness")]
    pub burstiness: RatioCurve,
    /// Japanese essays use few explicit connectives, hence the raised floor.
    #[serde(default = "default_reasoning")]
    pub reasoning: RatioCurve,
    #[serde(default = "default_emotion")]
    pub emotion: RatioCurve,
    #[serde(default = "default_template_ngram")]
    pub template_ngram: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            language_complexity: default_language_complexity(),
            topic_entropy: default_topic_entropy(),
            burstiness: default_burstiness(),
            reasoning: default_reasoning(),
            emotion: default_emotion(),
            template_ngram: default_template_ngram(),
        }
    }
}

fn default_language_complexity() -> EntropyCurve {
    EntropyCurve { ngram: 4, min_chars: 12, midpoint: 2.8, slope: 1.0, neutral: 0.5 }
}
fn default_topic_entropy() -> EntropyCurve {
    EntropyCurve { ngram: 2, min_chars: 5, midpoint: 1.8, slope: 1.2, neutral: 0.5 }
}
fn default_burstiness() -> RatioCurve {
    RatioCurve { floor: 0.0, span: 1.0, scale: 0.5, neutral: 0.5 }
}
fn default_reasoning() -> RatioCurve {
    RatioCurve { floor: 0.4, span: 0.6, scale: 0.003, neutral: 0.45 }
}
fn default_emotion() -> RatioCurve {
    RatioCurve { floor: 0.4, span: 0.6, scale: 0.8, neutral: 0.45 }
}
fn default_template_ngram() -> usize { 3 }
