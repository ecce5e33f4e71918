//! Highlight-span computation for search results
//!
//! Splits a display string into alternating matched/unmatched spans so the
//! UI can emphasize where the query's characters occur. The pattern is built
//! from the query's *individual characters* (whitespace stripped, each one
//! escaped, OR'd together, case-insensitive), which mirrors the subsequence
//! matcher: every occurrence of any query character gets emphasized,
//! regardless of order or adjacency.
//!
//! Invariant: concatenating the returned spans' text reconstructs the input
//! exactly.

use regex::Regex;

/// One piece of a display string, tagged with whether it matched the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Slice of the original text
    pub text: &'a str,
    /// Whether this piece is a query-character hit
    pub matched: bool,
}

impl<'a> Span<'a> {
    const fn matched(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }

    const fn unmatched(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }
}

/// Build the per-character alternation pattern for a query
///
/// Returns `None` when the query has no non-whitespace characters.
fn char_pattern(query: &str) -> Option<Regex> {
    let alternation = query
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| regex::escape(&c.to_string()))
        .collect::<Vec<_>>()
        .join("|");

    if alternation.is_empty() {
        return None;
    }

    Regex::new(&format!("(?i){alternation}")).ok()
}

/// Split `text` into matched/unmatched spans for `query`
///
/// A trimmed-empty query yields the whole text as one unmatched span.
/// Adjacent query-character hits come back as separate single-character
/// matched spans, matching how the pattern finds one character at a time.
///
/// # Examples
///
/// ```
/// use shelfr::search::highlight::spans;
///
/// let pieces = spans("Hello", "h");
/// assert!(pieces[0].matched);
/// assert_eq!(pieces[0].text, "H");
/// ```
#[must_use]
pub fn spans<'a>(text: &'a str, query: &str) -> Vec<Span<'a>> {
    let Some(pattern) = char_pattern(query) else {
        return vec![Span::unmatched(text)];
    };

    let mut pieces = Vec::new();
    let mut last_end = 0;

    for hit in pattern.find_iter(text) {
        if hit.start() > last_end {
            pieces.push(Span::unmatched(&text[last_end..hit.start()]));
        }
        pieces.push(Span::matched(hit.as_str()));
        last_end = hit.end();
    }

    if last_end < text.len() {
        pieces.push(Span::unmatched(&text[last_end..]));
    }

    pieces
}
