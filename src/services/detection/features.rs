// Feature Extractors
// Six independent statistics over a prepared document, each smoothed into a
// humanness score. Every extractor is total: degenerate input yields the
// curve's neutral value instead of an error.

use std::collections::BTreeMap;

use crate::models::FeatureScore;
use crate::services::lexicon::Lexicon;
use crate::services::text_processor::{
    char_ngram_counts, cosine_similarity, mean_and_variance, owned_ngram_counts, shannon_entropy,
    Document,
};

use super::smoothing::{clamp01, EntropyCurve, RatioCurve};

/// Precomputed n-gram vector of one reference template sentence.
#[derive(Debug, Clone)]
pub struct TemplateVector {
    pub text: String,
    pub counts: BTreeMap<Vec<char>, usize>,
}

impl TemplateVector {
    pub fn build(text: &str, n: usize) -> Self {
        Self {
            text: text.to_string(),
            counts: owned_ngram_counts(text, n),
        }
    }
}

fn ngram_entropy_score(doc: &Document, curve: &EntropyCurve) -> FeatureScore {
    if doc.char_len() < curve.min_chars {
        return FeatureScore::neutral(curve.neutral);
    }
    let counts = char_ngram_counts(&doc.chars, curve.ngram);
    if counts.is_empty() {
        return FeatureScore::neutral(curve.neutral);
    }
    let entropy = shannon_entropy(&counts);
    FeatureScore::new(entropy, curve.apply(entropy))
}

/// 4-gram entropy: richer local structure reads as more human.
pub fn language_complexity(doc: &Document, curve: &EntropyCurve) -> FeatureScore {
    ngram_entropy_score(doc, curve)
}

/// Bigram entropy over the whole text.
pub fn topic_entropy(doc: &Document, curve: &EntropyCurve) -> FeatureScore {
    ngram_entropy_score(doc, curve)
}

/// Coefficient of variation of sentence lengths.
pub fn burstiness(doc: &Document, curve: &RatioCurve) -> FeatureScore {
    if doc.sentences.is_empty() {
        return FeatureScore::neutral(curve.neutral);
    }

    let lengths: Vec<f64> = doc
        .sentences
        .iter()
        .map(|s| s.chars().count() as f64)
        .collect();
    let (mean, variance) = mean_and_variance(&lengths);
    if mean <= 0.0 {
        return FeatureScore::neutral(curve.neutral);
    }

    let ratio = variance.sqrt() / mean;
    FeatureScore::new(ratio, curve.apply(ratio))
}

/// Logical connectives per character across all sentences.
pub fn reasoning_complexity(doc: &Document, lexicon: &Lexicon, curve: &RatioCurve) -> FeatureScore {
    if doc.sentences.is_empty() {
        return FeatureScore::neutral(curve.neutral);
    }

    let mut total_chars = 0usize;
    let mut connective_count = 0usize;
    for sentence in &doc.sentences {
        total_chars += sentence.chars().count();
        connective_count += lexicon
            .connectives
            .iter()
            .map(|w| sentence.matches(w.as_str()).count())
            .sum::<usize>();
    }

    if total_chars == 0 {
        return FeatureScore::neutral(curve.neutral);
    }

    let density = connective_count as f64 / total_chars as f64;
    FeatureScore::new(density, curve.apply(density))
}

/// Net polarity of one sentence: lexicon hits, each word counted at most once.
pub fn sentence_polarity(sentence: &str, lexicon: &Lexicon) -> i64 {
    let pos = lexicon.positive.iter().filter(|w| sentence.contains(w.as_str())).count() as i64;
    let neg = lexicon.negative.iter().filter(|w| sentence.contains(w.as_str())).count() as i64;
    pos - neg
}

/// Population variance of per-sentence polarity.
pub fn emotion_variance(doc: &Document, lexicon: &Lexicon, curve: &RatioCurve) -> FeatureScore {
    if doc.sentences.is_empty() {
        return FeatureScore::neutral(curve.neutral);
    }

    let polarities: Vec<f64> = doc
        .sentences
        .iter()
        .map(|s| sentence_polarity(s, lexicon) as f64)
        .collect();
    let (_, variance) = mean_and_variance(&polarities);
    FeatureScore::new(variance, curve.apply(variance))
}

/// Maximum cosine similarity against the template corpus.
/// `raw` is the AI-likeness similarity; `score` reports its complement.
pub fn template_similarity(doc: &Document, templates: &[TemplateVector], n: usize) -> FeatureScore {
    let doc_counts = char_ngram_counts(&doc.chars, n);
    if doc_counts.is_empty() {
        return FeatureScore {
            raw: 0.0,
            score: 1.0,
            fallback: true,
        };
    }

    let similarity = templates
        .iter()
        .map(|tpl| cosine_similarity(&doc_counts, &tpl.counts))
        .fold(0.0_f64, f64::max);
    let similarity = clamp01(similarity);

    FeatureScore::new(similarity, 1.0 - similarity)
}
