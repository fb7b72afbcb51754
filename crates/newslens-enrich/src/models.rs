//! Contracts for the external collaborators of the orchestrator.
//!
//! Concrete implementations are constructed once at startup and injected into
//! [`Enricher`](crate::Enricher), so tests can swap in mocks.

use async_trait::async_trait;
use newslens_core::Sentiment;
use newslens_extract::TextExtractor;

use crate::error::InferenceError;

/// Abstractive summarization model.
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    /// Summarizes `text` into `min_length..=max_length` model tokens.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] on any model or transport failure.
    async fn summarize(
        &self,
        text: &str,
        min_length: u32,
        max_length: u32,
    ) -> Result<String, InferenceError>;
}

/// Binary or ternary sentiment classifier.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// # Errors
    ///
    /// Returns [`InferenceError`] on any model or transport failure.
    async fn classify_sentiment(&self, text: &str) -> Result<Sentiment, InferenceError>;
}

/// Zero-shot topic classifier over a caller-supplied label set.
#[async_trait]
pub trait TopicModel: Send + Sync {
    /// Returns the best matching label from `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] on any model or transport failure.
    async fn classify_topic(&self, text: &str, labels: &[String])
        -> Result<String, InferenceError>;
}

/// Source of main article text for a URL.
///
/// `None` means the text is absent for any reason; implementations log the
/// cause themselves.
#[async_trait]
pub trait ArticleTextSource: Send + Sync {
    async fn article_text(&self, url: &str) -> Option<String>;
}

#[async_trait]
impl ArticleTextSource for TextExtractor {
    async fn article_text(&self, url: &str) -> Option<String> {
        self.extract(url).await
    }
}
