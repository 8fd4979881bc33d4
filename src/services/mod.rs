// shibou-lens Core Services

pub mod text_processor;
pub mod lexicon;
pub mod catalog;
pub mod extraction;
pub mod quality_report;
pub mod config_store;
pub mod detection;

pub use text_processor::*;
pub use lexicon::Lexicon;
pub use catalog::{BundledCatalog, MessageCatalog};
pub use extraction::{PlainTextExtractor, TextExtractor};
pub use config_store::*;

pub use detection::{
    Analyzer,
    ScoringParams,
    ai_likelihood,
    overall_ai_score,
    assess_dimensions,
    localize,
};
