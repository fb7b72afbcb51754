//! Shared data model and configuration for newslens.

pub mod app_config;
pub mod article;
pub mod config;
pub mod enrichment;
pub mod policy;
pub mod stages;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, FeedConfig, InferenceConfig, InferenceDevice};
pub use article::{ArticleReference, UNKNOWN_SOURCE};
pub use config::{load_app_config, load_app_config_from_env};
pub use enrichment::{EnrichedArticle, EnrichmentResult, Sentiment, SentimentLabel};
pub use policy::EnrichmentPolicy;
pub use stages::{Stage, StageSet};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown enrichment stage: {0}")]
    UnknownStage(String),

    #[error("unknown sentiment label: {0}")]
    UnknownSentimentLabel(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
