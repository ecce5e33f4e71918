//! Result list widget for displaying catalog entries

use crate::catalog::CatalogEntry;
use crate::search;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Result list widget that displays matching entries with highlighted titles
pub struct EntryList<'a> {
    /// Application state
    state: &'a AppState,
    /// Theme for styling
    theme: &'a Theme,
    /// Title for the list block
    title: String,
}

impl<'a> EntryList<'a> {
    /// Create a new entry list widget
    #[must_use]
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        let count = state.view.results().len();
        let title = format!(" Results ({count}) ");

        Self {
            state,
            theme,
            title,
        }
    }

    /// Set custom title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render a single entry with the query characters emphasized
    fn render_item(&self, entry: &'a CatalogEntry, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
        ];

        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        for piece in search::spans(&entry.title, &self.state.query) {
            if piece.matched {
                spans.push(Span::styled(piece.text, self.theme.match_style()));
            } else {
                spans.push(Span::styled(piece.text, text_style));
            }
        }

        spans.push(Span::styled(
            format!("  shelf {}", entry.location),
            self.theme.shelf_style(),
        ));

        let line = Line::from(spans);

        if is_cursor {
            ListItem::new(line).style(self.theme.selected_style())
        } else {
            ListItem::new(line)
        }
    }

    /// Notice shown when the list has nothing to display
    fn empty_notice(&self) -> Line<'a> {
        if self.state.query.trim().is_empty() {
            return Line::styled("Type to search the catalog", self.theme.dimmed_style());
        }

        if self.state.view.can_add(&self.state.query) {
            return Line::from(vec![
                Span::styled("No matches. Press ", self.theme.dimmed_style()),
                Span::styled("Ctrl+N", self.theme.cursor_style()),
                Span::styled(
                    format!(" to add \"{}\"", self.state.query.trim()),
                    self.theme.dimmed_style(),
                ),
            ]);
        }

        Line::styled("No matches", self.theme.dimmed_style())
    }
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let results = self.state.view.results();

        if results.is_empty() {
            Paragraph::new(self.empty_notice()).render(inner, buf);
            return;
        }

        // Calculate visible range
        let visible_height = inner.height as usize;
        let start = self.state.scroll_offset;
        let end = (start + visible_height).min(results.len());

        // Build list items for visible range
        let items: Vec<ListItem> = (start..end)
            .filter_map(|idx| {
                let entry = results.get(idx)?;
                Some(self.render_item(entry, idx == self.state.cursor))
            })
            .collect();

        let list = List::new(items);
        list.render(inner, buf);
    }
}
