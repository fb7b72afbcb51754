//! Enrichment orchestration.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use newslens_core::{
    AppConfig, ArticleReference, EnrichedArticle, EnrichmentPolicy, EnrichmentResult, Stage,
    StageSet,
};
use newslens_extract::TextExtractor;

use crate::adapters::{InferenceLimits, SentimentAdapter, SummaryAdapter, TopicAdapter};
use crate::error::EnrichError;
use crate::gate::InferenceGate;
use crate::hf::HfInferenceClient;
use crate::models::{ArticleTextSource, SentimentModel, SummarizationModel, TopicModel};
use crate::outcome::{AdapterOutcome, FallbackReason, EXTRACTION_FAILED_SUMMARY};
use crate::truncate::snippet;

/// Upper bound on articles enriched at once by [`Enricher::enrich_leading`].
const MAX_CONCURRENT_ARTICLES: usize = 4;

/// The three models the enricher drives.
pub struct Models {
    pub summarizer: Arc<dyn SummarizationModel>,
    pub sentiment: Arc<dyn SentimentModel>,
    pub topic: Arc<dyn TopicModel>,
}

/// Extracts article text and runs the requested inference stages over it.
///
/// Built once at startup and shared by reference. Holds no per-article
/// state: every call re-extracts and re-infers.
pub struct Enricher {
    text_source: Arc<dyn ArticleTextSource>,
    summary: SummaryAdapter,
    sentiment: SentimentAdapter,
    topic: TopicAdapter,
    snippet_chars: usize,
}

impl Enricher {
    #[must_use]
    pub fn new(
        text_source: Arc<dyn ArticleTextSource>,
        models: Models,
        policy: &EnrichmentPolicy,
        limits: &InferenceLimits,
    ) -> Self {
        Self {
            text_source,
            summary: SummaryAdapter::new(
                models.summarizer,
                policy.summary_input_chars,
                policy.summary_min_length,
                policy.summary_max_length,
                limits.clone(),
            ),
            sentiment: SentimentAdapter::new(
                models.sentiment,
                policy.sentiment_input_chars,
                limits.clone(),
            ),
            topic: TopicAdapter::new(
                models.topic,
                policy.topic_input_chars,
                policy.topic_labels.clone(),
                limits.clone(),
            ),
            snippet_chars: policy.snippet_chars,
        }
    }

    /// Wires the HTTP text extractor and inference client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError`] if either HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, EnrichError> {
        let extractor = TextExtractor::new(
            config.extract_timeout_secs,
            &config.extract_user_agent,
            config.extract_min_chars,
        )?;
        let inference = Arc::new(HfInferenceClient::new(&config.inference)?);
        let limits = InferenceLimits {
            gate: InferenceGate::for_device(config.inference.device),
            timeout: config.inference.timeout_secs.map(Duration::from_secs),
        };

        tracing::info!(
            device = %config.inference.device,
            exclusive_inference = limits.gate.is_exclusive(),
            summarization_model = %config.inference.summarization_model,
            sentiment_model = %config.inference.sentiment_model,
            classification_model = %config.inference.classification_model,
            "enrichment pipeline ready"
        );

        Ok(Self::new(
            Arc::new(extractor),
            Models {
                summarizer: inference.clone(),
                sentiment: inference.clone(),
                topic: inference,
            },
            &config.policy,
            &limits,
        ))
    }

    /// Enriches one article with the requested stages.
    ///
    /// An empty `stages` set returns immediately without extracting. When the
    /// page text is absent, only the diagnostic summary is set and no model is
    /// called. Otherwise each requested stage runs concurrently and degrades
    /// to its own fallback on failure.
    pub async fn enrich(&self, article: &ArticleReference, stages: StageSet) -> EnrichmentResult {
        if stages.is_empty() {
            return EnrichmentResult::default();
        }

        let url = article.url.as_str();
        let Some(text) = self
            .text_source
            .article_text(url)
            .await
            .filter(|t| !t.trim().is_empty())
        else {
            tracing::warn!(url, "article text unavailable, skipping inference");
            return EnrichmentResult {
                summary: Some(EXTRACTION_FAILED_SUMMARY.to_string()),
                ..EnrichmentResult::default()
            };
        };

        let text = text.as_str();
        let (summary, sentiment, category) = tokio::join!(
            async {
                if stages.contains(Stage::Summary) {
                    Some(self.summary.run(text).await)
                } else {
                    None
                }
            },
            async {
                if stages.contains(Stage::Sentiment) {
                    Some(self.sentiment.run(text).await)
                } else {
                    None
                }
            },
            async {
                if stages.contains(Stage::Category) {
                    Some(self.topic.run(text).await)
                } else {
                    None
                }
            },
        );

        let result = EnrichmentResult {
            summary: summary.map(|o| settle(url, Stage::Summary, o)),
            full_text_snippet: Some(snippet(text, self.snippet_chars)),
            sentiment: sentiment.map(|o| settle(url, Stage::Sentiment, o)),
            category: category.map(|o| settle(url, Stage::Category, o)),
        };
        tracing::debug!(url, stages = %stages, "article enriched");
        result
    }

    /// Enriches `article` and returns it alongside its untouched metadata.
    pub async fn enrich_article(&self, article: ArticleReference, stages: StageSet) -> EnrichedArticle {
        let enrichment = self.enrich(&article, stages).await;
        EnrichedArticle {
            article,
            enrichment,
        }
    }

    /// Enriches the first `count` articles and returns the rest headline-only.
    ///
    /// Order is preserved. Leading articles are processed concurrently, at
    /// most a few at a time.
    pub async fn enrich_leading(
        &self,
        mut articles: Vec<ArticleReference>,
        stages: StageSet,
        count: usize,
    ) -> Vec<EnrichedArticle> {
        let count = if stages.is_empty() { 0 } else { count };
        let rest = articles.split_off(count.min(articles.len()));

        let mut enriched: Vec<EnrichedArticle> = stream::iter(articles)
            .map(|article| self.enrich_article(article, stages))
            .buffered(MAX_CONCURRENT_ARTICLES)
            .collect()
            .await;
        enriched.extend(rest.into_iter().map(EnrichedArticle::headline_only));
        enriched
    }
}

/// Logs a fallback and keeps only the value.
fn settle<T>(url: &str, stage: Stage, outcome: AdapterOutcome<T>) -> T {
    match outcome.fallback_reason() {
        Some(FallbackReason::EmptyInput) => {
            tracing::debug!(url, stage = %stage, reason = "empty_input", "stage fell back");
        }
        Some(reason) => {
            tracing::warn!(url, stage = %stage, reason = %reason, "stage fell back");
        }
        None => {}
    }
    outcome.into_value()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
