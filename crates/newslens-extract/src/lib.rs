//! Main-article text extraction for arbitrary news URLs.
//!
//! One fetch per call, no retries. Fetch failures, non-HTML responses and
//! pages without an identifiable article body all collapse to "no text" at the
//! [`TextExtractor::extract`] boundary; [`TextExtractor::try_extract`] keeps the
//! cause for diagnostics.

pub mod boundary;
pub mod error;
pub mod extractor;

pub use boundary::extract_main_text;
pub use error::ExtractError;
pub use extractor::{TextExtractor, DEFAULT_MAX_BODY_BYTES};
