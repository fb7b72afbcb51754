//! Per-adapter truncation and generation bounds.

/// Topic labels used when `NEWSLENS_TOPIC_LABELS` is unset.
pub const DEFAULT_TOPIC_LABELS: &[&str] = &[
    "Politics",
    "Sports",
    "Business",
    "Technology",
    "Entertainment",
    "Health",
    "Science",
    "World News",
    "Finance",
];

/// Tunable enrichment parameters.
///
/// Truncation bounds are character counts over the extracted text; summary
/// lengths are generation bounds in model tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentPolicy {
    pub summary_input_chars: usize,
    pub summary_min_length: u32,
    pub summary_max_length: u32,
    pub sentiment_input_chars: usize,
    pub topic_input_chars: usize,
    pub snippet_chars: usize,
    pub topic_labels: Vec<String>,
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self {
            summary_input_chars: 3000,
            summary_min_length: 30,
            summary_max_length: 130,
            sentiment_input_chars: 512,
            topic_input_chars: 1000,
            snippet_chars: 200,
            topic_labels: DEFAULT_TOPIC_LABELS
                .iter()
                .map(|l| (*l).to_string())
                .collect(),
        }
    }
}

/// Splits a comma-separated label list, trimming blanks and dropping duplicates
/// while keeping first-seen order.
#[must_use]
pub fn parse_topic_labels(raw: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }
    labels
}
