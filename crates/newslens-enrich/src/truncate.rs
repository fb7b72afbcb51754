//! Character-bounded views over extracted text.

/// Marker appended to snippets.
pub const ELLIPSIS: &str = "...";

/// Returns the first `max_chars` characters of `text`, never splitting a
/// UTF-8 code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Preview of `text`: its first `max_chars` characters followed by
/// [`ELLIPSIS`].
#[must_use]
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut out = truncate_chars(text, max_chars).to_string();
    out.push_str(ELLIPSIS);
    out
}
