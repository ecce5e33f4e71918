//! Subsequence matching for catalog titles
//!
//! The match contract is ordered subsequence containment, not substring
//! containment: every query character must appear in the candidate in the
//! same relative order, but not necessarily adjacent. Whitespace is ignored
//! on both sides and comparison is case-insensitive, so `"hp"` matches
//! `"Harry Potter"` and `"해리"` matches `"해리포터"`.

/// Characters of `text` with whitespace removed and case folded
fn normalized(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
}

/// Decide whether `candidate` contains `query` as an ordered subsequence
///
/// Walks the query's characters in order, scanning forward through the
/// candidate for each one. An empty or whitespace-only query matches
/// everything; callers that want "empty query shows nothing" enforce that
/// before searching.
///
/// # Examples
///
/// ```
/// use shelfr::search::matches;
///
/// assert!(matches("axbxc", "abc"));
/// assert!(matches("abc", "a b c"));
/// assert!(!matches("abc", "ba"));
/// ```
#[must_use]
pub fn matches(candidate: &str, query: &str) -> bool {
    let mut wanted = normalized(query).peekable();
    if wanted.peek().is_none() {
        return true;
    }

    for c in normalized(candidate) {
        if wanted.peek() == Some(&c) {
            wanted.next();
            if wanted.peek().is_none() {
                return true;
            }
        }
    }

    wanted.peek().is_none()
}
