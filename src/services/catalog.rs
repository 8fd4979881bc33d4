// Message Catalog
// Resolves dimension names and tier explanations per locale

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

pub use crate::models::Locale;

/// Lookup of localized display strings. Implementations must be shareable
/// across concurrent analyses.
pub trait MessageCatalog: Send + Sync {
    fn resolve(&self, key: &str, locale: Locale) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile(HashMap<Locale, HashMap<String, String>>);

/// ja-JP and zh-CN messages shipped with the crate.
#[derive(Debug, Clone, Default)]
pub struct BundledCatalog {
    messages: HashMap<Locale, HashMap<String, String>>,
}

static BUNDLED: OnceLock<BundledCatalog> = OnceLock::new();

impl BundledCatalog {
    pub fn shared() -> &'static BundledCatalog {
        BUNDLED.get_or_init(|| {
            let raw = include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/resources/messages.json"
            ));
            BundledCatalog::from_json_str(raw).expect("messages.json parse failed")
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let parsed: CatalogFile =
            serde_json::from_str(raw).map_err(|e| format!("Failed to parse message catalog: {}", e))?;
        Ok(Self { messages: parsed.0 })
    }

    /// Keys in `required` that have no non-blank message for `locale`.
    pub fn missing_keys(&self, locale: Locale, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|key| {
                self.resolve(key, locale)
                    .map_or(true, |msg| msg.trim().is_empty())
            })
            .cloned()
            .collect()
    }
}

impl MessageCatalog for BundledCatalog {
    fn resolve(&self, key: &str, locale: Locale) -> Option<String> {
        self.messages
            .get(&locale)
            .and_then(|table| table.get(key))
            .cloned()
    }
}
