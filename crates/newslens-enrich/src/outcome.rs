//! Result-or-fallback values produced by the inference adapters.

/// Summary when the extracted text is empty.
pub const EMPTY_INPUT_SUMMARY: &str = "No content to summarize.";

/// Summary when the summarization model fails.
pub const FAILED_SUMMARY: &str = "Error generating summary.";

/// Summary when the article page could not be extracted at all.
pub const EXTRACTION_FAILED_SUMMARY: &str = "Could not extract content (Protected or Dead Link).";

/// Catch-all topic outside the configured label set.
pub const GENERAL_CATEGORY: &str = "General";

/// Why an adapter returned its fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    EmptyInput,
    InferenceFailed,
    TimedOut,
}

impl FallbackReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackReason::EmptyInput => "empty_input",
            FallbackReason::InferenceFailed => "inference_failed",
            FallbackReason::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model output or the documented substitute for it.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome<T> {
    Produced(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> AdapterOutcome<T> {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, AdapterOutcome::Fallback { .. })
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            AdapterOutcome::Produced(_) => None,
            AdapterOutcome::Fallback { reason, .. } => Some(*reason),
        }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            AdapterOutcome::Produced(value) | AdapterOutcome::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            AdapterOutcome::Produced(value) | AdapterOutcome::Fallback { value, .. } => value,
        }
    }
}
