use thiserror::Error;

/// Failure of a single inference call. Adapters convert every variant into
/// their fallback value; it never reaches an API response.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference server returned status {status} for model {model}")]
    UnexpectedStatus { status: u16, model: String },

    #[error("malformed response from model {model}: {reason}")]
    MalformedResponse { model: String, reason: String },

    #[error("model returned label \"{0}\" outside the expected set")]
    UnknownLabel(String),
}

/// Failure to construct the enrichment pipeline at startup.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("text extractor: {0}")]
    Extract(#[from] newslens_extract::ExtractError),

    #[error("inference client: {0}")]
    Inference(#[from] InferenceError),
}
