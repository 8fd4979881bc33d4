// Detection Module
// Heuristic AI-trace scoring organized into specialized submodules:
// - features: The six per-dimension statistics over a prepared document
// - smoothing: Curves that map raw statistics onto [0, 1] humanness scores
// - aggregation: Fixed-weight combination into the overall AI score
// - report: Levels, tiers and localized explanations per dimension
// - engine: The `Analyzer` that runs the pipeline end to end

pub mod features;
pub mod smoothing;
pub mod aggregation;
pub mod report;
pub mod engine;

// Re-export commonly used items
pub use engine::Analyzer;
pub use smoothing::{EntropyCurve, RatioCurve, ScoringParams};
pub use aggregation::{ai_likelihood, overall_ai_score};
pub use report::{
    all_message_keys,
    assess_dimensions,
    explanation_key,
    localize,
    name_key,
    tier_bounds,
    tier_for,
    TierBounds,
};
pub use features::TemplateVector;
