use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ArticleReference, CoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => f.write_str("POSITIVE"),
            SentimentLabel::Negative => f.write_str("NEGATIVE"),
            SentimentLabel::Neutral => f.write_str("NEUTRAL"),
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = CoreError;

    /// Accepts the label names used by common sentiment models, including the
    /// bare `LABEL_0`/`LABEL_1` ids of binary classifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" | "POS" | "LABEL_1" => Ok(SentimentLabel::Positive),
            "NEGATIVE" | "NEG" | "LABEL_0" => Ok(SentimentLabel::Negative),
            "NEUTRAL" | "NEU" => Ok(SentimentLabel::Neutral),
            _ => Err(CoreError::UnknownSentimentLabel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Model confidence in `[0.0, 1.0]`.
    pub score: f32,
}

impl Sentiment {
    /// Builds a sentiment, clamping `score` into `[0.0, 1.0]`.
    #[must_use]
    pub fn new(label: SentimentLabel, score: f32) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self { label, score }
    }

    /// `{NEUTRAL, 0.0}`, returned whenever classification cannot run.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
        }
    }
}

/// AI-derived annotations for one article.
///
/// Every field is populated independently. The full extracted text is never
/// carried here; `full_text_snippet` is a bounded preview only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub summary: Option<String>,
    pub full_text_snippet: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub category: Option<String>,
}

/// An article's original metadata alongside its enrichment, as served to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub article: ArticleReference,
    #[serde(flatten)]
    pub enrichment: EnrichmentResult,
}

impl EnrichedArticle {
    /// Wraps an article with no enrichment (headline-only mode).
    #[must_use]
    pub fn headline_only(article: ArticleReference) -> Self {
        Self {
            article,
            enrichment: EnrichmentResult::default(),
        }
    }
}
