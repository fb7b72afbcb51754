//! HTTP client for the NewsAPI v2 REST API.
//!
//! Free-text searches go to `everything` sorted by relevance; an empty query
//! fetches the country front page from `top-headlines`. The API key travels in
//! the `X-Api-Key` header so it never shows up in logged URLs.

use std::time::Duration;

use async_trait::async_trait;
use newslens_core::FeedConfig;
use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::types::{ArticlesResponse, ErrorResponse, RawArticle};
use crate::{FeedQuery, HeadlinePage, HeadlineSource};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the NewsAPI v2 REST API.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    country: String,
}

impl NewsApiClient {
    /// Creates a client from the feed section of the application config.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`FeedError::InvalidBaseUrl`] if the configured base
    /// URL does not parse.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let base_url = if config.base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            config.base_url.as_str()
        };
        Self::with_base_url(&config.api_key, config.timeout_secs, base_url, &config.country)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`FeedError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        country: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newslens/0.1 (headline-feed)")
            .build()?;

        // Exactly one trailing slash so `join` appends the endpoint instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| FeedError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            country: country.to_owned(),
        })
    }

    /// Fetches one page of headlines for `query`.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Api`] if the provider reports an error.
    /// - [`FeedError::UnexpectedStatus`] on a non-2xx status without an error body.
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_headlines(&self, query: &FeedQuery) -> Result<HeadlinePage, FeedError> {
        let url = self.build_url(query)?;
        let endpoint = url.path().to_string();

        tracing::debug!(
            endpoint = %endpoint,
            query = query.search_terms().unwrap_or_default(),
            page = query.page,
            page_size = query.page_size,
            "fetching headlines"
        );

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(FeedError::UnexpectedStatus {
                    status: status.as_u16(),
                    endpoint,
                });
            }
            Err(e) => {
                return Err(FeedError::Deserialize {
                    context: endpoint,
                    source: e,
                });
            }
        };

        if let Some(err) = Self::api_error(&value) {
            return Err(err);
        }
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let envelope: ArticlesResponse =
            serde_json::from_value(value).map_err(|e| FeedError::Deserialize {
                context: endpoint.clone(),
                source: e,
            })?;

        let received = envelope.articles.len();
        let articles: Vec<_> = envelope
            .articles
            .into_iter()
            .filter_map(RawArticle::into_reference)
            .collect();
        if articles.len() < received {
            tracing::debug!(
                endpoint = %endpoint,
                skipped = received - articles.len(),
                "skipped articles without a usable url"
            );
        }

        Ok(HeadlinePage {
            total_results: envelope.total_results,
            articles,
        })
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn build_url(&self, query: &FeedQuery) -> Result<Url, FeedError> {
        let page_size = query.page_size.clamp(1, 100).to_string();
        let page = query.page.max(1).to_string();

        let (endpoint, params): (&str, Vec<(&str, &str)>) = match query.search_terms() {
            Some(terms) => (
                "everything",
                vec![
                    ("q", terms),
                    ("language", query.language.as_str()),
                    ("sortBy", "relevancy"),
                    ("pageSize", page_size.as_str()),
                    ("page", page.as_str()),
                ],
            ),
            None => (
                "top-headlines",
                vec![
                    ("country", self.country.as_str()),
                    ("pageSize", page_size.as_str()),
                    ("page", page.as_str()),
                ],
            ),
        };

        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| FeedError::InvalidBaseUrl(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Returns the provider error when the body carries `"status": "error"`.
    fn api_error(body: &serde_json::Value) -> Option<FeedError> {
        if body.get("status").and_then(serde_json::Value::as_str) != Some("error") {
            return None;
        }
        let parsed: ErrorResponse = serde_json::from_value(body.clone()).unwrap_or_default();
        Some(FeedError::Api {
            code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
            message: parsed.message.unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn fetch(&self, query: &FeedQuery) -> Result<HeadlinePage, FeedError> {
        self.fetch_headlines(query).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
