//! In-memory collaborators for orchestrator and adapter tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use newslens_core::{Sentiment, SentimentLabel};

use crate::error::InferenceError;
use crate::models::{ArticleTextSource, SentimentModel, SummarizationModel, TopicModel};

/// How a mock model answers.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    Succeed,
    Fail,
    Hang,
}

impl Behavior {
    async fn apply<T>(self, value: T) -> Result<T, InferenceError> {
        match self {
            Behavior::Succeed => Ok(value),
            Behavior::Fail => Err(InferenceError::MalformedResponse {
                model: "mock".to_string(),
                reason: "forced failure".to_string(),
            }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(value)
            }
        }
    }
}

/// Records every input it receives.
#[derive(Debug, Default)]
pub(crate) struct Inputs(Mutex<Vec<String>>);

impl Inputs {
    fn push(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }

    pub(crate) fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub(crate) struct MockSummarizer {
    pub behavior: Behavior,
    pub inputs: Inputs,
}

impl MockSummarizer {
    pub(crate) fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            inputs: Inputs::default(),
        }
    }
}

#[async_trait]
impl SummarizationModel for MockSummarizer {
    async fn summarize(
        &self,
        text: &str,
        min_length: u32,
        _max_length: u32,
    ) -> Result<String, InferenceError> {
        self.inputs.push(text);
        let words: Vec<&str> = text.split_whitespace().take(min_length as usize).collect();
        self.behavior.apply(words.join(" ")).await
    }
}

pub(crate) struct MockSentiment {
    pub behavior: Behavior,
    pub label: SentimentLabel,
    pub inputs: Inputs,
}

impl MockSentiment {
    pub(crate) fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            label: SentimentLabel::Positive,
            inputs: Inputs::default(),
        }
    }
}

#[async_trait]
impl SentimentModel for MockSentiment {
    async fn classify_sentiment(&self, text: &str) -> Result<Sentiment, InferenceError> {
        self.inputs.push(text);
        self.behavior.apply(Sentiment::new(self.label, 0.93)).await
    }
}

pub(crate) struct MockTopic {
    pub behavior: Behavior,
    /// Label returned on success; `None` picks the first candidate.
    pub answer: Option<String>,
    pub inputs: Inputs,
}

impl MockTopic {
    pub(crate) fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            answer: None,
            inputs: Inputs::default(),
        }
    }
}

#[async_trait]
impl TopicModel for MockTopic {
    async fn classify_topic(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<String, InferenceError> {
        self.inputs.push(text);
        let label = self
            .answer
            .clone()
            .or_else(|| labels.first().cloned())
            .unwrap_or_default();
        self.behavior.apply(label).await
    }
}

/// Serves canned article text by URL; unknown URLs are absent.
#[derive(Default)]
pub(crate) struct MockTextSource {
    pages: HashMap<String, String>,
    pub requested: Inputs,
}

impl MockTextSource {
    pub(crate) fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl ArticleTextSource for MockTextSource {
    async fn article_text(&self, url: &str) -> Option<String> {
        self.requested.push(url);
        self.pages.get(url).cloned()
    }
}
