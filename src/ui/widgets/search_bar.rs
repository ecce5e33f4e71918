//! Query input bar for the live title search

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Hint shown while nothing has been typed
const EMPTY_HINT: &str = "any letters of a title, in order";

/// Where the current query stands in its round trip
///
/// Drawn into the bar title so an armed debounce window or an outstanding
/// request is visible right where the user is typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    /// No armed window, no outstanding request
    #[default]
    Idle,
    /// Debounce window armed; the search fires once typing pauses
    Typing,
    /// Request handed to the store, reply not yet in
    Waiting,
}

impl QueryPhase {
    /// Block title for the phase
    const fn title(self) -> &'static str {
        match self {
            Self::Idle => " Search ",
            Self::Typing => " Search (typing…) ",
            Self::Waiting => " Search (searching…) ",
        }
    }
}

/// Split the query around the character under the cursor
///
/// `cursor` is a byte index on a char boundary; at the end of the query
/// there is no character to overdraw.
fn split_at_cursor(query: &str, cursor: usize) -> (&str, Option<char>, &str) {
    let before = &query[..cursor];
    match query[cursor..].chars().next() {
        Some(c) => (before, Some(c), &query[cursor + c.len_utf8()..]),
        None => (before, None, ""),
    }
}

/// Input bar showing the query, a block cursor, and the round-trip phase
pub struct SearchBar<'a> {
    /// Query as typed
    query: &'a str,
    /// Cursor position in the query (byte index)
    cursor: usize,
    /// Round-trip phase shown in the title
    phase: QueryPhase,
    /// Theme for styling
    theme: &'a Theme,
    /// Whether keystrokes currently land here
    focused: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            phase: QueryPhase::Idle,
            theme,
            focused: true,
        }
    }

    /// Set the round-trip phase
    #[must_use]
    pub const fn phase(mut self, phase: QueryPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block_cursor() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Build the line inside the bar
    ///
    /// The cursor overdraws the character it sits on (a reversed cell)
    /// and only appears while the bar has focus; a modal on top leaves
    /// the query rendered plain.
    fn input_line(&self) -> Line<'a> {
        let prompt_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.dimmed_style()
        };
        let mut spans = vec![Span::styled("❯ ", prompt_style)];

        if self.query.is_empty() {
            if self.focused {
                spans.push(Span::styled(" ", Self::block_cursor()));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                EMPTY_HINT,
                self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
            ));
            return Line::from(spans);
        }

        if !self.focused {
            spans.push(Span::raw(self.query));
            return Line::from(spans);
        }

        let (before, under, after) = split_at_cursor(self.query, self.cursor);
        spans.push(Span::raw(before));
        match under {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), Self::block_cursor()));
                spans.push(Span::raw(after));
            }
            None => spans.push(Span::styled(" ", Self::block_cursor())),
        }
        Line::from(spans)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.phase.title());

        let inner = block.inner(area);
        let line = self.input_line();
        block.render(area, buf);
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_split_at_cursor_walks_the_query() {
        assert_eq!(split_at_cursor("harry", 0), ("", Some('h'), "arry"));
        assert_eq!(split_at_cursor("harry", 2), ("ha", Some('r'), "ry"));
        assert_eq!(split_at_cursor("harry", 5), ("harry", None, ""));
    }

    #[test]
    fn test_split_at_cursor_multibyte() {
        assert_eq!(split_at_cursor("해리", 0), ("", Some('해'), "리"));
        assert_eq!(split_at_cursor("해리", 3), ("해", Some('리'), ""));
        assert_eq!(split_at_cursor("해리", 6), ("해리", None, ""));
    }

    #[test]
    fn test_phase_titles() {
        assert_eq!(QueryPhase::Idle.title(), " Search ");
        assert_eq!(QueryPhase::Typing.title(), " Search (typing…) ");
        assert_eq!(QueryPhase::Waiting.title(), " Search (searching…) ");
    }

    #[test]
    fn test_empty_query_shows_match_hint() {
        let theme = Theme::dark();
        let bar = SearchBar::new("", 0, &theme);
        let line = bar.input_line();
        assert!(line.spans.iter().any(|s| s.content == EMPTY_HINT));
    }

    #[test]
    fn test_cursor_overdraws_instead_of_inserting() {
        let theme = Theme::dark();
        let bar = SearchBar::new("dune", 2, &theme);
        let line = bar.input_line();
        assert_eq!(line_text(&line), "❯ dune");
    }

    #[test]
    fn test_unfocused_bar_renders_plain_query() {
        let theme = Theme::dark();
        let bar = SearchBar::new("dune", 2, &theme).focused(false);
        let line = bar.input_line();
        assert_eq!(line_text(&line), "❯ dune");
        assert!(
            line.spans
                .iter()
                .all(|s| !s.style.add_modifier.contains(Modifier::REVERSED))
        );
    }
}
