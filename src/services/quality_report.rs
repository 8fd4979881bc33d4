// Quality Report
// Parses the LLM essay critique and merges it with the heuristic AI-trace result

use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, ContentAnalysis, QualityReport};

/// Slice from the first `{` to the last `}`; models often wrap JSON in prose or fences.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }
    trimmed
}

impl QualityReport {
    pub fn from_llm_output(raw: &str) -> Result<Self, AnalysisError> {
        let json = extract_json(raw);
        let mut report: QualityReport = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "quality_report.parse_failed");
            AnalysisError::InvalidQualityReport(e.to_string())
        })?;

        for dim in &mut report.quality_dimensions {
            dim.score = dim.score.clamp(0, 100);
        }
        report.recommendations = report
            .recommendations
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        debug!(
            dimensions = report.quality_dimensions.len(),
            recommendations = report.recommendations.len(),
            "quality_report.parsed"
        );
        Ok(report)
    }
}

impl ContentAnalysis {
    /// AI-trace fields always come from the heuristic engine; anything the
    /// model said about them is discarded.
    pub fn merge(quality: QualityReport, heuristic: AnalysisResult) -> Self {
        Self {
            ai_score: heuristic.overall_ai_score,
            ai_probability: quality.ai_probability,
            ai_dimensions: heuristic.dimensions,
            quality_dimensions: quality.quality_dimensions,
            recommendations: quality.recommendations,
        }
    }

    pub fn heuristic_only(heuristic: AnalysisResult) -> Self {
        Self::merge(QualityReport::default(), heuristic)
    }
}
