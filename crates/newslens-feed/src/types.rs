//! NewsAPI wire types. Everything optional is defaulted so one malformed
//! article never fails the whole page.

use newslens_core::{ArticleReference, UNKNOWN_SOURCE};
use serde::Deserialize;

/// Title used when the provider omits one.
pub(crate) const UNTITLED: &str = "No Title";

/// Placeholder NewsAPI substitutes for articles pulled by the publisher.
const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticlesResponse {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RawArticle {
    /// Converts to an [`ArticleReference`], or `None` when the entry has no
    /// usable URL or was removed by the publisher.
    pub(crate) fn into_reference(self) -> Option<ArticleReference> {
        let url = non_blank(self.url)?;
        let title = non_blank(self.title).unwrap_or_else(|| UNTITLED.to_string());
        if title == REMOVED_MARKER {
            return None;
        }
        Some(ArticleReference {
            title,
            description: non_blank(self.description),
            url,
            source_name: non_blank(self.source.and_then(|s| s.name))
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            image_url: non_blank(self.url_to_image),
            published_at: non_blank(self.published_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "source": { "id": null, "name": null },
            "title": null,
            "url": "https://example.com/a"
        }))
        .unwrap();
        let article = raw.into_reference().unwrap();
        assert_eq!(article.title, UNTITLED);
        assert_eq!(article.source_name, UNKNOWN_SOURCE);
        assert!(article.description.is_none());
        assert!(article.image_url.is_none());
    }

    #[test]
    fn article_without_url_is_skipped() {
        let raw = RawArticle {
            title: Some("Headline".to_string()),
            url: Some("  ".to_string()),
            ..RawArticle::default()
        };
        assert!(raw.into_reference().is_none());
    }

    #[test]
    fn removed_article_is_skipped() {
        let raw = RawArticle {
            title: Some("[Removed]".to_string()),
            url: Some("https://removed.com".to_string()),
            ..RawArticle::default()
        };
        assert!(raw.into_reference().is_none());
    }
}
