// Dimension Reporter
// Turns humanness scores into 0-10 levels, tiers and localized explanations

use tracing::warn;

use crate::error::AnalysisError;
use crate::models::{
    AnalysisResult, Assessment, Dimension, DimensionAssessment, DimensionReport, FeatureVector,
    Locale, Tier,
};
use crate::services::catalog::MessageCatalog;

use super::smoothing::round_to_1_decimal;

/// Scores below `medium` are Low, below `high` Medium, otherwise High.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TierBounds {
    pub medium: f64,
    pub high: f64,
}

struct DimensionEntry {
    message_stem: &'static str,
    bounds: TierBounds,
}

// Indexed in `Dimension::ALL` order.
static DIMENSION_TABLE: [DimensionEntry; 6] = [
    DimensionEntry {
        message_stem: "linguistic_perplexity",
        bounds: TierBounds { medium: 0.3, high: 0.7 },
    },
    DimensionEntry {
        message_stem: "sentence_variation",
        bounds: TierBounds { medium: 0.3, high: 0.7 },
    },
    DimensionEntry {
        message_stem: "semantic_entropy",
        bounds: TierBounds { medium: 0.3, high: 0.7 },
    },
    DimensionEntry {
        message_stem: "inference_complexity",
        bounds: TierBounds { medium: 0.45, high: 0.75 },
    },
    DimensionEntry {
        message_stem: "emotional_fluctuation",
        bounds: TierBounds { medium: 0.45, high: 0.75 },
    },
    // applied to the reported (human) score, not the raw similarity
    DimensionEntry {
        message_stem: "template_tendency",
        bounds: TierBounds { medium: 0.4, high: 0.8 },
    },
];

fn entry(dimension: Dimension) -> &'static DimensionEntry {
    let idx = match dimension {
        Dimension::LanguageComplexity => 0,
        Dimension::Burstiness => 1,
        Dimension::TopicEntropy => 2,
        Dimension::ReasoningComplexity => 3,
        Dimension::EmotionVariance => 4,
        Dimension::TemplateSimilarity => 5,
    };
    &DIMENSION_TABLE[idx]
}

pub fn tier_bounds(dimension: Dimension) -> TierBounds {
    entry(dimension).bounds
}

pub fn tier_for(dimension: Dimension, score: f64) -> Tier {
    let bounds = tier_bounds(dimension);
    if score < bounds.medium {
        Tier::Low
    } else if score < bounds.high {
        Tier::Medium
    } else {
        Tier::High
    }
}

/// 0.0..=10.0 with one decimal.
pub fn level_for(score: f64) -> f64 {
    round_to_1_decimal(score * 10.0)
}

pub fn name_key(dimension: Dimension) -> String {
    format!("ai.dimension.{}", entry(dimension).message_stem)
}

pub fn explanation_key(dimension: Dimension, tier: Tier) -> String {
    format!(
        "ai.dimension.{}.evaluation.{}",
        entry(dimension).message_stem,
        tier.as_str()
    )
}

/// Every key a catalog must provide: 6 names plus 18 (dimension, tier) explanations.
pub fn all_message_keys() -> Vec<String> {
    let mut keys = Vec::with_capacity(24);
    for dimension in Dimension::ALL {
        keys.push(name_key(dimension));
        for tier in [Tier::Low, Tier::Medium, Tier::High] {
            keys.push(explanation_key(dimension, tier));
        }
    }
    keys
}

pub fn assess_dimensions(features: &FeatureVector) -> Vec<DimensionAssessment> {
    Dimension::ALL
        .iter()
        .map(|&dimension| {
            let score = features.humanness(dimension);
            DimensionAssessment {
                dimension,
                score,
                level: level_for(score),
                tier: tier_for(dimension, score),
            }
        })
        .collect()
}

fn resolve(
    catalog: &dyn MessageCatalog,
    key: &str,
    locale: Locale,
) -> Result<String, AnalysisError> {
    match catalog.resolve(key, locale) {
        Some(msg) if !msg.trim().is_empty() => Ok(msg),
        _ => {
            warn!(key = %key, locale = %locale, "catalog.missing_key");
            Err(AnalysisError::MissingLocalization {
                key: key.to_string(),
                locale: locale.tag().to_string(),
            })
        }
    }
}

/// Resolve names and explanations for an assessment.
pub fn localize(
    assessment: &Assessment,
    locale: Locale,
    catalog: &dyn MessageCatalog,
) -> Result<AnalysisResult, AnalysisError> {
    let dimensions = assessment
        .dimensions
        .iter()
        .map(|d| {
            Ok(DimensionReport {
                name: resolve(catalog, &name_key(d.dimension), locale)?,
                level: d.level,
                evaluation: resolve(catalog, &explanation_key(d.dimension, d.tier), locale)?,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(AnalysisResult {
        overall_ai_score: assessment.overall_ai_score,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureScore;
    use std::collections::HashMap;

    struct MapCatalog(HashMap<String, String>);

    impl MessageCatalog for MapCatalog {
        fn resolve(&self, key: &str, _locale: Locale) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    fn full_catalog() -> MapCatalog {
        MapCatalog(all_message_keys().into_iter().map(|k| (k.clone(), k)).collect())
    }

    fn sample_assessment() -> Assessment {
        let features = FeatureVector {
            language_complexity: FeatureScore::new(3.1, 0.57),
            burstiness: FeatureScore::new(0.1, 0.16),
            topic_entropy: FeatureScore::new(4.0, 0.81),
            reasoning_complexity: FeatureScore::neutral(0.45),
            emotion_variance: FeatureScore::new(0.9, 0.75),
            template_similarity: FeatureScore::new(0.35, 0.65),
        };
        Assessment {
            overall_ai_score: 40,
            ai_likelihood: 0.4,
            features,
            dimensions: assess_dimensions(&features),
        }
    }

    #[test]
    fn test_tiers_use_dimension_specific_bounds() {
        assert_eq!(tier_for(Dimension::LanguageComplexity, 0.29), Tier::Low);
        assert_eq!(tier_for(Dimension::LanguageComplexity, 0.3), Tier::Medium);
        assert_eq!(tier_for(Dimension::LanguageComplexity, 0.7), Tier::High);
        assert_eq!(tier_for(Dimension::ReasoningComplexity, 0.44), Tier::Low);
        assert_eq!(tier_for(Dimension::ReasoningComplexity, 0.45), Tier::Medium);
        assert_eq!(tier_for(Dimension::EmotionVariance, 0.75), Tier::High);
        assert_eq!(tier_for(Dimension::TemplateSimilarity, 0.39), Tier::Low);
        assert_eq!(tier_for(Dimension::TemplateSimilarity, 0.79), Tier::Medium);
        assert_eq!(tier_for(Dimension::TemplateSimilarity, 0.8), Tier::High);
    }

    #[test]
    fn test_level_rounding() {
        assert_eq!(level_for(0.0), 0.0);
        assert_eq!(level_for(1.0), 10.0);
        assert_eq!(level_for(0.567), 5.7);
        assert_eq!(level_for(0.45), 4.5);
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(name_key(Dimension::Burstiness), "ai.dimension.sentence_variation");
        assert_eq!(
            explanation_key(Dimension::TemplateSimilarity, Tier::Low),
            "ai.dimension.template_tendency.evaluation.low"
        );
        let keys = all_message_keys();
        assert_eq!(keys.len(), 24);
    }

    #[test]
    fn test_assess_dimensions_order_and_tiers() {
        let assessment = sample_assessment();
        let dims: Vec<Dimension> = assessment.dimensions.iter().map(|d| d.dimension).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
        assert_eq!(assessment.dimensions[1].tier, Tier::Low);
        assert_eq!(assessment.dimensions[2].tier, Tier::High);
        assert_eq!(assessment.dimensions[3].tier, Tier::Medium);
        assert_eq!(assessment.dimensions[5].level, 6.5);
    }

    #[test]
    fn test_localize_resolves_every_dimension() {
        let result = localize(&sample_assessment(), Locale::JaJp, &full_catalog()).unwrap();
        assert_eq!(result.overall_ai_score, 40);
        assert_eq!(result.dimensions.len(), 6);
        assert_eq!(result.dimensions[0].name, "ai.dimension.linguistic_perplexity");
        assert_eq!(
            result.dimensions[4].evaluation,
            "ai.dimension.emotional_fluctuation.evaluation.high"
        );
    }

    #[test]
    fn test_localize_missing_key_fails() {
        let mut catalog = full_catalog();
        catalog.0.remove("ai.dimension.semantic_entropy.evaluation.high");
        let err = localize(&sample_assessment(), Locale::ZhCn, &catalog).unwrap_err();
        match err {
            AnalysisError::MissingLocalization { key, locale } => {
                assert_eq!(key, "ai.dimension.semantic_entropy.evaluation.high");
                assert_eq!(locale, "zh-CN");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_localize_blank_message_fails() {
        let mut catalog = full_catalog();
        catalog.0.insert("ai.dimension.sentence_variation".to_string(), "  ".to_string());
        assert!(localize(&sample_assessment(), Locale::JaJp, &catalog).is_err());
    }
}
