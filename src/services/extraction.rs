// Text Extraction
// Turns uploaded document bytes into plain text before analysis.
// Only plain-text formats are decoded here; binary document formats are
// reported as unsupported so a dedicated extractor can be plugged in.

use std::path::Path;

use crate::error::AnalysisError;

/// Upload limit enforced before decoding (10 MiB).
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

const UTF8_BOM: &str = "\u{feff}";

pub trait TextExtractor: Send + Sync {
    fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<String, AnalysisError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

/// Lower-cased extension without the dot; empty when the name has none.
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<String, AnalysisError> {
        let ext = file_extension(file_name);
        match ext.as_str() {
            "" | "txt" | "text" | "md" => {}
            _ => return Err(AnalysisError::UnsupportedFormat(ext)),
        }

        if bytes.is_empty() {
            return Err(AnalysisError::ExtractionFailed {
                file: file_name.to_string(),
                reason: "file is empty".to_string(),
            });
        }
        if bytes.len() > MAX_FILE_BYTES {
            return Err(AnalysisError::ExtractionFailed {
                file: file_name.to_string(),
                reason: format!("file exceeds {} bytes", MAX_FILE_BYTES),
            });
        }

        let text = std::str::from_utf8(bytes).map_err(|e| AnalysisError::ExtractionFailed {
            file: file_name.to_string(),
            reason: format!("invalid UTF-8: {}", e),
        })?;

        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
    }
}
