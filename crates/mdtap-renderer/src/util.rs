//! Shared helpers for HTML output.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, and `"` for HTML text and attribute positions.
///
/// Borrows the input unchanged when nothing needs escaping.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(['&', '<', '>', '"']) else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 8);
    escaped.push_str(&text[..first]);
    for ch in text[first..].chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
