//! Confirmation dialog widget for destructive actions
//!
//! Provides a modal dialog overlay that asks the user to confirm
//! before a delete is sent to the store.

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// State for the confirmation dialog
#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    /// The title/prompt for the dialog
    pub title: String,
    /// Detailed message explaining what will happen
    pub message: String,
    /// Id of the entry the confirmed action applies to
    pub entry_id: u64,
}

impl ConfirmDialogState {
    /// Create a new confirmation dialog state
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>, entry_id: u64) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            entry_id,
        }
    }
}

/// Confirmation dialog overlay widget
pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Create a new confirmation dialog widget
    #[must_use]
    pub const fn new(state: &'a ConfirmDialogState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Calculate centered area for the modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }
}

impl Widget for ConfirmDialog<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Modal size - wider for longer messages
        let message_width = self.state.message.chars().count() as u16 + 4;
        let width = message_width
            .clamp(40, 70)
            .min(area.width.saturating_sub(4));
        let height = 7;

        let modal_area = Self::centered_rect(width, height, area);

        // Clear background
        Clear.render(modal_area, buf);

        // Main modal block with warning-colored border
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Message
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Help
        ])
        .split(inner);

        // Message
        let message = Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White));
        message.render(chunks[1], buf);

        // Button hints
        let buttons = Line::from(vec![
            Span::styled(
                " [Y] Yes ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                " [N] No ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let buttons_para = Paragraph::new(buttons).alignment(Alignment::Center);
        buttons_para.render(chunks[3], buf);

        // Help text
        let help = Paragraph::new("Y/Enter: confirm | N/ESC: cancel")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center);
        help.render(chunks[4], buf);
    }
}
