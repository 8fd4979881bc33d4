// Boundary errors
// The scoring engine itself is total; these come from collaborators around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("text extraction failed for {file}: {reason}")]
    ExtractionFailed { file: String, reason: String },
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("missing localization for key {key} ({locale})")]
    MissingLocalization { key: String, locale: String },
    #[error("invalid quality report: {0}")]
    InvalidQualityReport(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Stable machine-readable kind for callers that map errors to responses.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::ExtractionFailed { .. } => "extraction_failed",
            AnalysisError::UnsupportedFormat(_) => "unsupported_format",
            AnalysisError::MissingLocalization { .. } => "missing_localization",
            AnalysisError::InvalidQualityReport(_) => "invalid_quality_report",
            AnalysisError::Io(_) => "io",
        }
    }
}
