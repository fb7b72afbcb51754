use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unsupported content type \"{content_type}\" from {url}")]
    UnsupportedContentType { content_type: String, url: String },

    #[error("response from {url} exceeds {limit} bytes")]
    BodyTooLarge { limit: usize, url: String },

    #[error("no extractable article content at {url}")]
    NoContent { url: String },
}
