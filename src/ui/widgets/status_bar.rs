//! Status bar widget for displaying messages

use crate::ui::output::MessageLevel;
use crate::ui::state::StatusMessage;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget that displays the most recent message
pub struct StatusBar<'a> {
    /// Messages to display
    messages: &'a [&'a StatusMessage],
    /// Theme for styling
    theme: &'a Theme,
    /// In-flight activity text (takes precedence over messages)
    busy: Option<&'a str>,
    /// Whether admin affordances are active
    admin: bool,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(messages: &'a [&'a StatusMessage], theme: &'a Theme, admin: bool) -> Self {
        Self {
            messages,
            theme,
            busy: None,
            admin,
        }
    }

    /// Set in-flight activity text
    #[must_use]
    pub const fn with_busy(mut self, busy: Option<&'a str>) -> Self {
        self.busy = busy;
        self
    }

    /// Get style for a message level
    fn style_for_level(&self, level: MessageLevel) -> ratatui::style::Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    /// Get prefix for a message level
    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        use ratatui::layout::{Constraint, Direction, Layout};

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        // Split status bar into left (messages) and right (mode indicator)
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(80), Constraint::Percentage(20)])
            .split(inner);

        // Left side: in-flight activity takes precedence over messages
        if let Some(busy) = self.busy {
            let line = Line::styled(busy, self.theme.info_style());
            Paragraph::new(line).render(chunks[0], buf);
        } else if let Some(msg) = self.messages.last() {
            let style = self.style_for_level(msg.level);
            let prefix = Self::prefix_for_level(msg.level);
            let line = Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(msg.text.as_str(), style),
            ]);
            Paragraph::new(line).render(chunks[0], buf);
        }

        // Right side: admin indicator
        let (indicator, indicator_style) = if self.admin {
            ("[admin]", self.theme.admin_style())
        } else {
            ("[read-only]", self.theme.dimmed_style())
        };

        let indicator_line = Line::styled(indicator, indicator_style);
        let indicator_para = Paragraph::new(indicator_line);
        indicator_para.render(chunks[1], buf);
    }
}
