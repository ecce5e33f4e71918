//! Masked passphrase prompt for entering admin mode

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// State for the passphrase prompt modal
///
/// Append-only editing; the buffer is compared against the configured
/// passphrase on submit and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct PassphraseState {
    /// Raw passphrase being typed
    pub buffer: String,
}

impl PassphraseState {
    /// Create an empty prompt state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character
    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }
}

/// Passphrase prompt overlay widget
pub struct PassphrasePrompt<'a> {
    state: &'a PassphraseState,
    theme: &'a Theme,
}

impl<'a> PassphrasePrompt<'a> {
    /// Create a new passphrase prompt widget
    #[must_use]
    pub const fn new(state: &'a PassphraseState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Calculate centered area for the modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }
}

impl Widget for PassphrasePrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 44.min(area.width.saturating_sub(4));
        let height = 7;

        let modal_area = Self::centered_rect(width, height, area);

        // Clear background
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.admin_style())
            .title(" Admin Passphrase ")
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Masked input
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Help
        ])
        .split(inner);

        // Masked input with blinking cursor
        let masked = "•".repeat(self.state.buffer.chars().count());
        let line = Line::from(vec![
            Span::raw(masked),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        // Help text
        let help = Paragraph::new("Enter: unlock | ESC: cancel")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center);
        help.render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_editing() {
        let mut state = PassphraseState::new();
        for c in "admin123".chars() {
            state.push(c);
        }
        assert_eq!(state.buffer, "admin123");

        state.backspace();
        assert_eq!(state.buffer, "admin12");
    }
}
