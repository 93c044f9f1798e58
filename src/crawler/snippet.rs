//! Snippet formatting for report rows

use crate::crawler::links::LinkRef;

/// Cuts `text` to at most `limit` characters, ending in `...` when cut
pub fn trim_snippet(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Describes a link as `"anchor text" -> href`, with an optional detail suffix
pub fn link_snippet(link: &LinkRef, extra: Option<&str>, limit: usize) -> String {
    let text = if link.anchor_text.is_empty() {
        "<no text>"
    } else {
        link.anchor_text.as_str()
    };
    let target = if link.raw_href.is_empty() {
        link.url.as_str()
    } else {
        link.raw_href.as_str()
    };

    let snippet = match extra {
        Some(extra) => format!("\"{}\" -> {} ({})", text, target, extra),
        None => format!("\"{}\" -> {}", text, target),
    };
    trim_snippet(&snippet, limit)
}

/// Returns the text around `start..end`, widened by `context` characters per side
///
/// `start` and `end` are byte offsets on char boundaries.
pub fn text_window(text: &str, start: usize, end: usize, context: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(context)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let to = text[end..]
        .char_indices()
        .nth(context)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].trim()
}
