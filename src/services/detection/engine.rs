// Analyzer
// Runs the six feature extractors over one essay and produces the scored,
// optionally localized, assessment

use std::sync::Arc;

use tracing::debug;

use crate::error::AnalysisError;
use crate::models::{AnalysisInput, AnalysisResult, Assessment, FeatureVector};
use crate::services::catalog::MessageCatalog;
use crate::services::lexicon::Lexicon;
use crate::services::text_processor::Document;

use super::aggregation::{ai_likelihood, overall_ai_score};
use super::features::{
    burstiness, emotion_variance, language_complexity, reasoning_complexity, template_similarity,
    topic_entropy, TemplateVector,
};
use super::report::{assess_dimensions, localize};
use super::smoothing::ScoringParams;

/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    lexicon: Arc<Lexicon>,
    params: ScoringParams,
    templates: Vec<TemplateVector>,
}

impl Analyzer {
    pub fn new(lexicon: Arc<Lexicon>, params: ScoringParams) -> Self {
        let templates = lexicon
            .templates
            .iter()
            .map(|t| TemplateVector::build(t, params.template_ngram))
            .collect();
        Self {
            lexicon,
            params,
            templates,
        }
    }

    /// Built-in Japanese lexicon with default curve parameters.
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin(), ScoringParams::default())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn extract(&self, text: &str) -> FeatureVector {
        let doc = Document::prepare(text);
        let p = &self.params;

        let features = FeatureVector {
            language_complexity: language_complexity(&doc, &p.language_complexity),
            burstiness: burstiness(&doc, &p.burstiness),
            topic_entropy: topic_entropy(&doc, &p.topic_entropy),
            reasoning_complexity: reasoning_complexity(&doc, &self.lexicon, &p.reasoning),
            emotion_variance: emotion_variance(&doc, &self.lexicon, &p.emotion),
            template_similarity: template_similarity(&doc, &self.templates, p.template_ngram),
        };

        debug!(
            chars = doc.char_len(),
            sentences = doc.sentences.len(),
            entropy4 = features.language_complexity.raw,
            burst_ratio = features.burstiness.raw,
            entropy2 = features.topic_entropy.raw,
            connective_density = features.reasoning_complexity.raw,
            polarity_variance = features.emotion_variance.raw,
            template_sim = features.template_similarity.raw,
            "features.extracted"
        );

        features
    }

    /// Locale-independent scoring.
    pub fn assess(&self, text: &str) -> Assessment {
        let features = self.extract(text);
        let likelihood = ai_likelihood(&features);
        let score = overall_ai_score(&features);
        debug!(ai_likelihood = likelihood, overall = score, "analysis.scored");

        Assessment {
            overall_ai_score: score,
            ai_likelihood: likelihood,
            features,
            dimensions: assess_dimensions(&features),
        }
    }

    pub fn analyze(
        &self,
        input: &AnalysisInput,
        catalog: &dyn MessageCatalog,
    ) -> Result<AnalysisResult, AnalysisError> {
        let assessment = self.assess(&input.text);
        localize(&assessment, input.locale, catalog)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::builtin()
    }
}
