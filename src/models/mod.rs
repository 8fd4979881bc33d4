// shibou-lens Data Models
// Value objects exchanged between the engine, the reporting layer and callers

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Dimensions ============

/// The six heuristic dimensions, in reporting order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    LanguageComplexity,
    Burstiness,
    TopicEntropy,
    ReasoningComplexity,
    EmotionVariance,
    TemplateSimilarity,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::LanguageComplexity,
        Dimension::Burstiness,
        Dimension::TopicEntropy,
        Dimension::ReasoningComplexity,
        Dimension::EmotionVariance,
        Dimension::TemplateSimilarity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::LanguageComplexity => "LanguageComplexity",
            Dimension::Burstiness => "Burstiness",
            Dimension::TopicEntropy => "TopicEntropy",
            Dimension::ReasoningComplexity => "ReasoningComplexity",
            Dimension::EmotionVariance => "EmotionVariance",
            Dimension::TemplateSimilarity => "TemplateSimilarity",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

// ============ Locale ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    /// Parse an Accept-Language style tag. Unknown or empty tags fall back to ja-JP.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.starts_with("zh") {
            Locale::ZhCn
        } else {
            Locale::JaJp
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::JaJp => "ja-JP",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============ Input ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub text: String,
    #[serde(default)]
    pub locale: Locale,
}

impl AnalysisInput {
    pub fn new(text: impl Into<String>, locale_tag: &str) -> Self {
        Self {
            text: text.into(),
            locale: Locale::from_tag(locale_tag),
        }
    }
}

// ============ Features ============

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeatureScore {
    /// Raw statistic (entropy, ratio, density, variance or template similarity).
    pub raw: f64,
    /// Humanness in [0, 1]; higher reads more human-written.
    pub score: f64,
    /// True when a degenerate-input guard produced the neutral default.
    #[serde(default)]
    pub fallback: bool,
}

impl FeatureScore {
    pub fn new(raw: f64, score: f64) -> Self {
        Self { raw, score, fallback: false }
    }

    pub fn neutral(score: f64) -> Self {
        Self { raw: 0.0, score, fallback: true }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub language_complexity: FeatureScore,
    pub burstiness: FeatureScore,
    pub topic_entropy: FeatureScore,
    pub reasoning_complexity: FeatureScore,
    pub emotion_variance: FeatureScore,
    /// `raw` is the AI-likeness similarity, `score` its complement.
    pub template_similarity: FeatureScore,
}

impl FeatureVector {
    pub fn get(&self, dimension: Dimension) -> &FeatureScore {
        match dimension {
            Dimension::LanguageComplexity => &self.language_complexity,
            Dimension::Burstiness => &self.burstiness,
            Dimension::TopicEntropy => &self.topic_entropy,
            Dimension::ReasoningComplexity => &self.reasoning_complexity,
            Dimension::EmotionVariance => &self.emotion_variance,
            Dimension::TemplateSimilarity => &self.template_similarity,
        }
    }

    pub fn humanness(&self, dimension: Dimension) -> f64 {
        self.get(dimension).score
    }
}

// ============ Assessment (locale-independent) ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAssessment {
    pub dimension: Dimension,
    pub score: f64,
    /// 0.0..=10.0, one decimal.
    pub level: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub overall_ai_score: u8,
    pub ai_likelihood: f64,
    pub features: FeatureVector,
    pub dimensions: Vec<DimensionAssessment>,
}

// ============ Localized Result ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionReport {
    pub name: String,
    pub level: f64,
    pub evaluation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_ai_score: u8,
    pub dimensions: Vec<DimensionReport>,
}

// ============ Qualitative Report (LLM critique) ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDimension {
    pub name: String,
    /// 0..=100
    pub score: i32,
    #[serde(default)]
    pub evaluation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    #[serde(default)]
    pub ai_probability: Option<String>,
    #[serde(default)]
    pub quality_dimensions: Vec<QualityDimension>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Endpoint payload: heuristic AI-trace fields merged with the qualitative critique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub ai_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_probability: Option<String>,
    pub ai_dimensions: Vec<DimensionReport>,
    pub quality_dimensions: Vec<QualityDimension>,
    pub recommendations: Vec<String>,
}
