// Text Processing Service
// Whitespace normalization, sentence splitting and character n-gram statistics

use regex::Regex;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII whitespace only: U+3000 indentation in Japanese documents is content.
    RE.get_or_init(|| Regex::new(r"[ \t\n\x0B\x0C\r]+").expect("whitespace regex"))
}

fn sentence_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[。！？!?.\n]").expect("sentence regex"))
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let collapsed = whitespace_re().replace_all(raw, " ");
    collapsed.trim_matches(|c: char| c <= ' ').to_string()
}

/// Split normalized text on CJK and Latin sentence terminators.
/// Fragments are trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    sentence_end_re()
        .split(text)
        .map(|s| s.trim_matches(|c: char| c <= ' '))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Normalized text plus everything derived from it, computed once per analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub text: String,
    #[serde(skip)]
    pub chars: Vec<char>,
    pub sentences: Vec<String>,
}

impl Document {
    pub fn prepare(raw: &str) -> Self {
        let text = normalize_whitespace(raw);
        let chars = text.chars().collect();
        let sentences = split_sentences(&text);
        Self { text, chars, sentences }
    }

    /// Length in characters (not UTF-8 bytes).
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Frequency table of overlapping character n-grams (stride 1).
/// Ordered so that downstream floating-point sums are reproducible.
pub fn char_ngram_counts(chars: &[char], n: usize) -> BTreeMap<&[char], usize> {
    let mut counts = BTreeMap::new();
    if n == 0 || chars.len() < n {
        return counts;
    }
    for gram in chars.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Owned variant used for vectors that outlive the source text (template corpus).
pub fn owned_ngram_counts(text: &str, n: usize) -> BTreeMap<Vec<char>, usize> {
    let chars: Vec<char> = text.chars().collect();
    char_ngram_counts(&chars, n)
        .into_iter()
        .map(|(gram, count)| (gram.to_vec(), count))
        .collect()
}

/// Shannon entropy (natural log) of a frequency table.
pub fn shannon_entropy<K>(counts: &BTreeMap<K, usize>) -> f64 {
    let total: usize = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum()
}

/// Cosine similarity between two n-gram frequency vectors.
/// Zero-norm on either side yields 0.
pub fn cosine_similarity<A, B>(a: &BTreeMap<A, usize>, b: &BTreeMap<B, usize>) -> f64
where
    A: Borrow<[char]> + Ord,
    B: Borrow<[char]> + Ord,
{
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    for (gram, &x) in a {
        norm_a += (x * x) as f64;
        let key: &[char] = <A as Borrow<[char]>>::borrow(gram);
        if let Some(&y) = b.get(key) {
            dot += (x * y) as f64;
        }
    }
    let norm_b: f64 = b.values().map(|&y| (y * y) as f64).sum();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    // sqrt of the product keeps identical vectors at exactly 1.0
    dot / (norm_a * norm_b).sqrt()
}

/// Population mean and variance.
pub fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}
