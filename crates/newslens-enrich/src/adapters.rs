//! The three inference adapters.
//!
//! Each one truncates its input to its own bound, runs the model through the
//! shared [`InferenceGate`] under an optional deadline, and turns every failure
//! into its documented fallback. None of them can fail.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use newslens_core::Sentiment;

use crate::error::InferenceError;
use crate::gate::InferenceGate;
use crate::models::{SentimentModel, SummarizationModel, TopicModel};
use crate::outcome::{
    AdapterOutcome, FallbackReason, EMPTY_INPUT_SUMMARY, FAILED_SUMMARY, GENERAL_CATEGORY,
};
use crate::truncate::truncate_chars;

/// Scheduling shared by all adapters: the accelerator gate and the per-call
/// deadline.
#[derive(Debug, Clone, Default)]
pub struct InferenceLimits {
    pub gate: InferenceGate,
    pub timeout: Option<Duration>,
}

impl InferenceLimits {
    /// Runs one model call. The deadline covers the wait for the gate too.
    async fn call<T, F>(&self, stage: &'static str, fut: F) -> Result<T, FallbackReason>
    where
        F: Future<Output = Result<T, InferenceError>>,
    {
        let gated = self.gate.run(fut);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, gated).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!(stage, timeout_secs = limit.as_secs_f64(), "inference timed out");
                    return Err(FallbackReason::TimedOut);
                }
            },
            None => gated.await,
        };
        result.map_err(|e| {
            tracing::debug!(stage, error = %e, "inference failed");
            FallbackReason::InferenceFailed
        })
    }
}

/// Bounded abstractive summary.
pub struct SummaryAdapter {
    model: Arc<dyn SummarizationModel>,
    input_chars: usize,
    min_length: u32,
    max_length: u32,
    limits: InferenceLimits,
}

impl SummaryAdapter {
    #[must_use]
    pub fn new(
        model: Arc<dyn SummarizationModel>,
        input_chars: usize,
        min_length: u32,
        max_length: u32,
        limits: InferenceLimits,
    ) -> Self {
        Self {
            model,
            input_chars,
            min_length,
            max_length,
            limits,
        }
    }

    pub async fn run(&self, text: &str) -> AdapterOutcome<String> {
        let input = truncate_chars(text, self.input_chars);
        if input.trim().is_empty() {
            return AdapterOutcome::Fallback {
                value: EMPTY_INPUT_SUMMARY.to_string(),
                reason: FallbackReason::EmptyInput,
            };
        }
        let call = self
            .model
            .summarize(input, self.min_length, self.max_length);
        match self.limits.call("summary", call).await {
            Ok(summary) => AdapterOutcome::Produced(summary),
            Err(reason) => AdapterOutcome::Fallback {
                value: FAILED_SUMMARY.to_string(),
                reason,
            },
        }
    }
}

/// Sentiment label with confidence.
pub struct SentimentAdapter {
    model: Arc<dyn SentimentModel>,
    input_chars: usize,
    limits: InferenceLimits,
}

impl SentimentAdapter {
    #[must_use]
    pub fn new(model: Arc<dyn SentimentModel>, input_chars: usize, limits: InferenceLimits) -> Self {
        Self {
            model,
            input_chars,
            limits,
        }
    }

    pub async fn run(&self, text: &str) -> AdapterOutcome<Sentiment> {
        let input = truncate_chars(text, self.input_chars);
        if input.trim().is_empty() {
            return AdapterOutcome::Fallback {
                value: Sentiment::neutral(),
                reason: FallbackReason::EmptyInput,
            };
        }
        match self
            .limits
            .call("sentiment", self.model.classify_sentiment(input))
            .await
        {
            Ok(sentiment) => AdapterOutcome::Produced(sentiment),
            Err(reason) => AdapterOutcome::Fallback {
                value: Sentiment::neutral(),
                reason,
            },
        }
    }
}

/// Single best topic from a closed label set.
pub struct TopicAdapter {
    model: Arc<dyn TopicModel>,
    input_chars: usize,
    labels: Vec<String>,
    limits: InferenceLimits,
}

impl TopicAdapter {
    #[must_use]
    pub fn new(
        model: Arc<dyn TopicModel>,
        input_chars: usize,
        labels: Vec<String>,
        limits: InferenceLimits,
    ) -> Self {
        Self {
            model,
            input_chars,
            labels,
            limits,
        }
    }

    pub async fn run(&self, text: &str) -> AdapterOutcome<String> {
        let input = truncate_chars(text, self.input_chars);
        if input.trim().is_empty() {
            return AdapterOutcome::Fallback {
                value: GENERAL_CATEGORY.to_string(),
                reason: FallbackReason::EmptyInput,
            };
        }
        let call = self.model.classify_topic(input, &self.labels);
        match self.limits.call("category", call).await {
            Ok(label) if self.labels.contains(&label) => AdapterOutcome::Produced(label),
            Ok(label) => {
                tracing::debug!(label = %label, "model returned a label outside the set");
                AdapterOutcome::Fallback {
                    value: GENERAL_CATEGORY.to_string(),
                    reason: FallbackReason::InferenceFailed,
                }
            }
            Err(reason) => AdapterOutcome::Fallback {
                value: GENERAL_CATEGORY.to_string(),
                reason,
            },
        }
    }
}

#[cfg(test)]
#[path = "adapters_test.rs"]
mod tests;
