//! Modal form for composing and editing catalog entries
//!
//! Provides a two-field overlay (title, shelf number) with:
//! - Single-line text editing with cursor per field
//! - TAB to switch fields, Enter to submit, ESC to cancel
//! - Validation against the catalog invariants on submit

use crate::catalog::{CatalogEntry, CatalogError, EntryDraft, NewEntry};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Which mutation the form feeds on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormContext {
    /// Composing a brand-new entry
    Create,
    /// Editing the existing entry with this id
    Edit(u64),
}

/// Field that currently receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Book title field
    Title,
    /// Shelf number field
    Location,
}

/// Validated payload produced when the form is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmit {
    /// Send a create to the store with these fields
    Create(NewEntry),
    /// Send an update to the store, overwriting the entry with this id
    Update(CatalogEntry),
}

/// State for the entry form modal
#[derive(Debug, Clone)]
pub struct EntryFormState {
    /// Title buffer
    pub title: String,
    /// Cursor position in the title (character index, not byte)
    pub title_cursor: usize,
    /// Shelf number buffer (digits only)
    pub location: String,
    /// Cursor position in the location buffer
    pub location_cursor: usize,
    /// Field that currently has focus
    pub focus: FormField,
    /// Whether this form creates or edits
    pub context: FormContext,
}

/// Get byte index from a character cursor position
fn byte_index(buffer: &str, cursor: usize) -> usize {
    buffer
        .char_indices()
        .nth(cursor)
        .map_or(buffer.len(), |(i, _)| i)
}

impl EntryFormState {
    /// Start a create form from a draft
    ///
    /// The title comes pre-filled from the query that produced no matches,
    /// so focus lands on whichever field still needs input.
    #[must_use]
    pub fn create(draft: &EntryDraft) -> Self {
        let title = draft.title.clone();
        let location = draft.location.map(|n| n.to_string()).unwrap_or_default();
        let focus = if title.trim().is_empty() {
            FormField::Title
        } else {
            FormField::Location
        };

        Self {
            title_cursor: title.chars().count(),
            title,
            location_cursor: location.chars().count(),
            location,
            focus,
            context: FormContext::Create,
        }
    }

    /// Start an edit form pre-filled from an existing entry
    #[must_use]
    pub fn edit(entry: &CatalogEntry) -> Self {
        let title = entry.title.clone();
        let location = entry.location.to_string();

        Self {
            title_cursor: title.chars().count(),
            title,
            location_cursor: location.chars().count(),
            location,
            focus: FormField::Title,
            context: FormContext::Edit(entry.id),
        }
    }

    /// The focused buffer and its cursor
    fn field_mut(&mut self) -> (&mut String, &mut usize) {
        match self.focus {
            FormField::Title => (&mut self.title, &mut self.title_cursor),
            FormField::Location => (&mut self.location, &mut self.location_cursor),
        }
    }

    /// Switch focus to the other field
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Location,
            FormField::Location => FormField::Title,
        };
    }

    /// Insert a character at the cursor position
    ///
    /// The shelf number field only accepts digits.
    pub fn insert_char(&mut self, c: char) {
        if self.focus == FormField::Location && !c.is_ascii_digit() {
            return;
        }

        let (buffer, cursor) = self.field_mut();
        let byte_idx = byte_index(buffer, *cursor);
        buffer.insert(byte_idx, c);
        *cursor += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        let (buffer, cursor) = self.field_mut();
        if *cursor > 0 {
            let byte_idx = byte_index(buffer, *cursor);
            let prev_byte_idx = buffer[..byte_idx]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            buffer.remove(prev_byte_idx);
            *cursor -= 1;
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete(&mut self) {
        let (buffer, cursor) = self.field_mut();
        let byte_idx = byte_index(buffer, *cursor);
        if byte_idx < buffer.len() {
            buffer.remove(byte_idx);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        let (_, cursor) = self.field_mut();
        if *cursor > 0 {
            *cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        let (buffer, cursor) = self.field_mut();
        let char_count = buffer.chars().count();
        if *cursor < char_count {
            *cursor += 1;
        }
    }

    /// Move cursor to start of the focused field
    pub fn cursor_home(&mut self) {
        let (_, cursor) = self.field_mut();
        *cursor = 0;
    }

    /// Move cursor to end of the focused field
    pub fn cursor_end(&mut self) {
        let (buffer, cursor) = self.field_mut();
        *cursor = buffer.chars().count();
    }

    /// Validate the buffers into a store payload
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the title is blank or the shelf number
    /// does not parse to a positive integer.
    pub fn submit(&self) -> Result<FormSubmit, CatalogError> {
        let location: u32 = self
            .location
            .trim()
            .parse()
            .map_err(|_| CatalogError::InvalidLocation)?;

        match self.context {
            FormContext::Create => Ok(FormSubmit::Create(NewEntry::new(
                self.title.clone(),
                location,
            )?)),
            FormContext::Edit(id) => {
                let entry = CatalogEntry::new(id, self.title.clone(), location);
                entry.validate()?;
                Ok(FormSubmit::Update(entry))
            }
        }
    }
}

/// Entry form overlay widget
pub struct EntryForm<'a> {
    state: &'a EntryFormState,
    theme: &'a Theme,
}

impl<'a> EntryForm<'a> {
    /// Create a new entry form widget
    #[must_use]
    pub const fn new(state: &'a EntryFormState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Calculate centered area for the modal
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }

    /// Render one field with its own border and cursor
    fn render_field(
        &self,
        label: &str,
        buffer: &str,
        cursor: usize,
        focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let border_style = if focused {
            self.theme.cursor_style()
        } else {
            self.theme.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {label} "));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        if focused {
            let (before, after) = buffer.split_at(byte_index(buffer, cursor));
            spans.push(Span::raw(before));
            spans.push(Span::styled(
                "│",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
            spans.push(Span::raw(after));
        } else {
            spans.push(Span::raw(buffer));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

impl Widget for EntryForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 50.min(area.width.saturating_sub(4));
        let height = 10;

        let modal_area = Self::centered_rect(width, height, area);

        // Clear background
        Clear.render(modal_area, buf);

        let title = match self.state.context {
            FormContext::Create => " Add Entry ",
            FormContext::Edit(_) => " Edit Entry ",
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(title)
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Title field
            Constraint::Length(3), // Shelf number field
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Help
        ])
        .split(inner);

        self.render_field(
            "Title",
            &self.state.title,
            self.state.title_cursor,
            self.state.focus == FormField::Title,
            chunks[0],
            buf,
        );
        self.render_field(
            "Shelf number",
            &self.state.location,
            self.state.location_cursor,
            self.state.focus == FormField::Location,
            chunks[1],
            buf,
        );

        // Help text
        let help = Paragraph::new("TAB: switch field | Enter: save | ESC: cancel")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center);
        help.render(chunks[3], buf);
    }
}
