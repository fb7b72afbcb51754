//! HTTP client for Hugging Face compatible inference servers.
//!
//! Every task is `POST {base}/models/{model}` with an `inputs` field, task
//! parameters, and `options`. Sampling is disabled so identical inputs yield
//! identical outputs.

use std::time::Duration;

use async_trait::async_trait;
use newslens_core::{InferenceConfig, Sentiment, SentimentLabel};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::models::{SentimentModel, SummarizationModel, TopicModel};

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
    use_cache: bool,
}

const OPTIONS: RequestOptions = RequestOptions {
    wait_for_model: true,
    use_cache: false,
};

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
    options: RequestOptions,
}

#[derive(Serialize)]
struct SummarizeParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    options: RequestOptions,
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
    options: RequestOptions,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Text classification responses come back flat for a single input on some
/// servers and nested one level on others.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct ZeroShotOutput {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Single(ZeroShotOutput),
    Batch(Vec<ZeroShotOutput>),
}

/// Inference client bound to one summarization, one sentiment and one
/// zero-shot classification model.
pub struct HfInferenceClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    summarization_model: String,
    sentiment_model: String,
    classification_model: String,
}

impl HfInferenceClient {
    /// # Errors
    ///
    /// Returns [`InferenceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        // No overall request timeout here: the adapters own the deadline.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newslens/0.1 (inference)")
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            summarization_model: config.summarization_model.clone(),
            sentiment_model: config.sentiment_model.clone(),
            classification_model: config.classification_model.clone(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{model}", self.base_url)
    }

    async fn post<B, T>(&self, model: &str, body: &B) -> Result<T, InferenceError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.model_url(model)).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::UnexpectedStatus {
                status: status.as_u16(),
                model: model.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| InferenceError::MalformedResponse {
            model: model.to_string(),
            reason: e.to_string(),
        })
    }

    fn malformed(model: &str, reason: &str) -> InferenceError {
        InferenceError::MalformedResponse {
            model: model.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl SummarizationModel for HfInferenceClient {
    async fn summarize(
        &self,
        text: &str,
        min_length: u32,
        max_length: u32,
    ) -> Result<String, InferenceError> {
        let model = self.summarization_model.as_str();
        let request = SummarizeRequest {
            inputs: text,
            parameters: SummarizeParameters {
                min_length,
                max_length,
                do_sample: false,
            },
            options: OPTIONS,
        };
        let items: Vec<SummaryItem> = self.post(model, &request).await?;
        items
            .into_iter()
            .next()
            .map(|item| item.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Self::malformed(model, "empty summary"))
    }
}

#[async_trait]
impl SentimentModel for HfInferenceClient {
    async fn classify_sentiment(&self, text: &str) -> Result<Sentiment, InferenceError> {
        let model = self.sentiment_model.as_str();
        let request = ClassifyRequest {
            inputs: text,
            options: OPTIONS,
        };
        let response: ClassificationResponse = self.post(model, &request).await?;
        let candidates = match response {
            ClassificationResponse::Nested(nested) => nested.into_iter().flatten().collect(),
            ClassificationResponse::Flat(flat) => flat,
        };
        let best = candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| Self::malformed(model, "no labels"))?;
        let label: SentimentLabel = best
            .label
            .parse()
            .map_err(|_| InferenceError::UnknownLabel(best.label.clone()))?;
        Ok(Sentiment::new(label, best.score))
    }
}

#[async_trait]
impl TopicModel for HfInferenceClient {
    async fn classify_topic(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<String, InferenceError> {
        let model = self.classification_model.as_str();
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
            options: OPTIONS,
        };
        let response: ZeroShotResponse = self.post(model, &request).await?;
        let output = match response {
            ZeroShotResponse::Single(output) => output,
            ZeroShotResponse::Batch(batch) => batch
                .into_iter()
                .next()
                .ok_or_else(|| Self::malformed(model, "empty batch"))?,
        };
        if output.labels.len() != output.scores.len() {
            return Err(Self::malformed(model, "labels and scores differ in length"));
        }
        let (best, _) = output
            .labels
            .into_iter()
            .zip(output.scores)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| Self::malformed(model, "no labels"))?;
        if !labels.contains(&best) {
            return Err(InferenceError::UnknownLabel(best));
        }
        Ok(best)
    }
}
