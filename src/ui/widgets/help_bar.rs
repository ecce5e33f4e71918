//! Help bar widget for displaying keybind hints

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "TAB", "ctrl+d")
    pub key: String,
    /// Action description (e.g., "edit", "remove")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    /// Hints to display
    hints: &'a [KeyHint],
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Build hints for the browse screen
    ///
    /// Admin affordances only appear once admin mode is active; the add
    /// hint only when the current query qualifies for add-new.
    #[must_use]
    pub fn browse_hints(admin: bool, can_add: bool) -> Vec<KeyHint> {
        let mut hints = vec![
            KeyHint::new("type", "search"),
            KeyHint::new("↑/↓", "navigate"),
        ];

        if admin {
            hints.push(KeyHint::new("Enter", "edit"));
            hints.push(KeyHint::new("ctrl-d", "remove"));
            if can_add {
                hints.push(KeyHint::new("ctrl-n", "add"));
            }
        }

        hints.push(KeyHint::new("ctrl-a", "admin"));
        hints.push(KeyHint::new("ESC", "quit"));
        hints
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        let line = Line::from(spans);
        Paragraph::new(line).render(area, buf);
    }
}
