use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};

use crate::boundary::extract_main_text;
use crate::error::ExtractError;

/// Response bodies above this size are rejected without being parsed.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Fetches a page and isolates its main article text.
///
/// Stateless apart from the pooled HTTP client, so one instance is shared
/// across concurrent enrichments.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    client: Client,
    min_chars: usize,
    max_body_bytes: usize,
}

impl TextExtractor {
    /// Creates a `TextExtractor` with the given request timeout and `User-Agent`.
    ///
    /// `min_chars` is the shortest body accepted as an article; anything
    /// shorter is reported as no content.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, min_chars: usize) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            min_chars,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Fetches `url` once and returns the main article text, or the reason
    /// there is none.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Http`] on connect, timeout, or body read failures.
    /// - [`ExtractError::UnexpectedStatus`] on any non-2xx response.
    /// - [`ExtractError::UnsupportedContentType`] when the response declares a
    ///   non-HTML content type.
    /// - [`ExtractError::BodyTooLarge`] when the body exceeds the size cap.
    /// - [`ExtractError::NoContent`] when no article region is found.
    pub async fn try_extract(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(ExtractError::UnsupportedContentType {
                    content_type: content_type.to_string(),
                    url: url.to_string(),
                });
            }
        }

        let html = self.read_body(response, url).await?;

        // `scraper::Html` is not `Send`; parse after the last await.
        extract_main_text(&html, self.min_chars).ok_or_else(|| ExtractError::NoContent {
            url: url.to_string(),
        })
    }

    /// Reads the body in chunks, giving up as soon as it passes the cap.
    async fn read_body(&self, mut response: Response, url: &str) -> Result<String, ExtractError> {
        let too_large = || ExtractError::BodyTooLarge {
            limit: self.max_body_bytes,
            url: url.to_string(),
        };
        let limit = u64::try_from(self.max_body_bytes).unwrap_or(u64::MAX);
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Returns the main article text of `url`, or `None` when it cannot be
    /// fetched or has no identifiable article body. The cause is logged.
    pub async fn extract(&self, url: &str) -> Option<String> {
        match self.try_extract(url).await {
            Ok(text) => {
                tracing::debug!(url, chars = text.chars().count(), "article text extracted");
                Some(text)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "article text extraction failed");
                None
            }
        }
    }
}

fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}
