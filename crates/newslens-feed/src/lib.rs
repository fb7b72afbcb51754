//! Headline Feed Adapter: turns NewsAPI responses into [`ArticleReference`]s.
//!
//! Ordering is whatever the provider returns (relevance for searches,
//! recency for the front page) and is preserved as-is.
//!
//! [`ArticleReference`]: newslens_core::ArticleReference

pub mod client;
pub mod error;
pub(crate) mod types;

use async_trait::async_trait;
use newslens_core::ArticleReference;

pub use client::NewsApiClient;
pub use error::FeedError;

/// Parameters for one headline fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// Free-text query; `None` or blank fetches the front page instead.
    pub query: Option<String>,
    pub language: String,
    pub page_size: u32,
    pub page: u32,
}

impl FeedQuery {
    /// Returns the trimmed query, or `None` when it is absent or blank.
    #[must_use]
    pub fn search_terms(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// One page of headlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlinePage {
    /// Total matches reported by the provider, across all pages.
    pub total_results: u64,
    pub articles: Vec<ArticleReference>,
}

/// Source of article references for the enrichment pipeline.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetches one page of headlines.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when the provider cannot be reached or rejects
    /// the request.
    async fn fetch(&self, query: &FeedQuery) -> Result<HeadlinePage, FeedError>;
}
