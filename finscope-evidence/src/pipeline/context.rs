//! Render results into the context block handed to the text generator.

use crate::types::NormalizedResult;

/// Returned verbatim when there is no evidence to render.
pub const NO_RESULTS: &str = "No search results found.";

/// Appended when the context block had to be cut short.
const TRUNCATION_MARKER: &str = "\n\n[Context truncated]";

/// Render results as a numbered, 1-indexed block in the order received.
///
/// Each entry reads:
///
/// ```text
/// [1] Title
/// URL: https://…
/// Snippet text
/// ```
///
/// Entries are separated by a blank line. An empty input renders as
/// [`NO_RESULTS`].
pub fn format_context(results: &[NormalizedResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_owned();
    }

    let entries: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{}] {}\nURL: {}\n{}", i + 1, r.title, r.url, r.snippet))
        .collect();
    entries.join("\n\n")
}

/// Cut a context block to at most `max_bytes`, on a char boundary.
///
/// Whole trailing entries are preferred: the cut backs up to the last entry
/// separator that fits. A marker is appended whenever anything was dropped.
pub fn bound_context(context: String, max_bytes: usize) -> String {
    if context.len() <= max_bytes {
        return context;
    }

    let mut end = max_bytes;
    while end > 0 && !context.is_char_boundary(end) {
        end -= 1;
    }
    if let Some(sep) = context[..end].rfind("\n\n[") {
        end = sep;
    }

    let mut bounded = context[..end].trim_end().to_owned();
    bounded.push_str(TRUNCATION_MARKER);
    bounded
}
