// Lexicon Store
// Sentiment words, logical connectives and reference template sentences.
// Built once, shared read-only between concurrent analyses.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LexiconFile {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    positive: Vec<String>,
    #[serde(default)]
    negative: Vec<String>,
    #[serde(default)]
    connectives: Vec<String>,
    #[serde(default)]
    templates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lexicon {
    pub language: String,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub connectives: Vec<String>,
    pub templates: Vec<String>,
}

static BUILTIN: OnceLock<Arc<Lexicon>> = OnceLock::new();

impl Lexicon {
    /// Japanese statement-of-purpose lexicon shipped with the crate.
    pub fn builtin() -> Arc<Lexicon> {
        BUILTIN
            .get_or_init(|| {
                let raw = include_str!(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/resources/lexicon_ja.json"
                ));
                Arc::new(Lexicon::from_json_str(raw).expect("lexicon_ja.json parse failed"))
            })
            .clone()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let parsed: LexiconFile =
            serde_json::from_str(raw).map_err(|e| format!("Failed to parse lexicon: {}", e))?;

        let lexicon = Lexicon {
            language: parsed
                .language
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "ja".to_string()),
            positive: clean_entries(parsed.positive),
            negative: clean_entries(parsed.negative),
            connectives: clean_entries(parsed.connectives),
            templates: clean_entries(parsed.templates),
        };

        if lexicon.templates.is_empty() {
            return Err("Lexicon must contain at least one template sentence".to_string());
        }
        Ok(lexicon)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read lexicon {}: {}", path.display(), e))?;
        Self::from_json_str(&content)
    }
}

// An empty entry would match every sentence.
fn clean_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_sizes() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.language, "ja");
        assert_eq!(lexicon.positive.len(), 11);
        assert_eq!(lexicon.negative.len(), 10);
        assert_eq!(lexicon.connectives.len(), 10);
        assert_eq!(lexicon.templates.len(), 4);
        assert!(lexicon.connectives.iter().any(|w| w == "したがって"));
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = Lexicon::builtin();
        let b = Lexicon::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_custom_lexicon_drops_blank_entries() {
        let raw = r#"{"positive": ["good", "  ", ""], "templates": [" I am writing to apply. "]}"#;
        let lexicon = Lexicon::from_json_str(raw).unwrap();
        assert_eq!(lexicon.positive, vec!["good"]);
        assert!(lexicon.negative.is_empty());
        assert_eq!(lexicon.templates, vec!["I am writing to apply."]);
        assert_eq!(lexicon.language, "ja");
    }

    #[test]
    fn test_lexicon_without_templates_rejected() {
        let err = Lexicon::from_json_str(r#"{"positive": ["good"]}"#).unwrap_err();
        assert!(err.contains("template"));
    }

    #[test]
    fn test_lexicon_from_missing_file() {
        let err = Lexicon::from_file(Path::new("/nonexistent/lexicon.json")).unwrap_err();
        assert!(err.starts_with("Failed to read lexicon"));
    }
}
