//! Query matching and highlight computation
//!
//! Pure text logic shared by the TUI and the one-shot CLI commands:
//! 1. Subsequence matching decides which entries a query keeps visible
//! 2. Highlight spans mark where the query's characters occur in a title

pub mod highlight;
pub mod matcher;

pub use highlight::{Span, spans};
pub use matcher::matches;
