use serde::{Deserialize, Serialize};

/// Source name used when the provider omits one.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Metadata identifying one news article prior to enrichment.
///
/// Built once by the headline feed and never mutated afterwards. `url` is an
/// opaque identifier and the fetch target for extraction; `published_at` is
/// kept exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleReference {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

fn default_source_name() -> String {
    UNKNOWN_SOURCE.to_string()
}

impl ArticleReference {
    /// Reference with only a URL, for callers that enrich a bare link.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            description: None,
            url,
            source_name: default_source_name(),
            image_url: None,
            published_at: None,
        }
    }
}
