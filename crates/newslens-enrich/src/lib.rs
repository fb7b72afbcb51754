//! Content enrichment: model contracts, the fallback-safe inference adapters,
//! and the orchestrator that runs them over extracted article text.

pub mod adapters;
pub mod error;
pub mod gate;
pub mod hf;
pub mod models;
pub mod outcome;
pub mod pipeline;
pub mod truncate;

#[cfg(test)]
mod mocks;

pub use adapters::{InferenceLimits, SentimentAdapter, SummaryAdapter, TopicAdapter};
pub use error::{EnrichError, InferenceError};
pub use gate::InferenceGate;
pub use hf::HfInferenceClient;
pub use models::{ArticleTextSource, SentimentModel, SummarizationModel, TopicModel};
pub use outcome::{
    AdapterOutcome, FallbackReason, EMPTY_INPUT_SUMMARY, EXTRACTION_FAILED_SUMMARY,
    FAILED_SUMMARY, GENERAL_CATEGORY,
};
pub use pipeline::{Enricher, Models};
