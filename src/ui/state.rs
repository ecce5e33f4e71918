//! Application state for the browse TUI
//!
//! Manages all mutable state for the live-search interface: the composed
//! session state, the debounced query controller, the result-list cursor,
//! and the modal slots for the entry form, the confirmation dialog, and
//! the passphrase prompt.

use crate::catalog::{CatalogEntry, EntryDraft};
use crate::config::ShelfrConfig;
use crate::remote;
use crate::session::{CatalogViewState, QueryController, QueryEvent, SearchOutcome};
use crate::ui::output::MessageLevel;
use crate::ui::widgets::{ConfirmDialogState, EntryFormState, PassphraseState};
use std::time::{Duration, Instant};

/// Current mode of the TUI application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal browsing mode
    #[default]
    Normal,
    /// Entry form modal is active
    Form,
    /// Passphrase prompt is active
    Passphrase,
    /// Confirmation dialog is active
    Confirm,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level (success, error, warning, info)
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Application state for the browse TUI
#[derive(Debug)]
pub struct AppState {
    /// Composed session state (results, editor slot, admin flag)
    pub view: CatalogViewState,
    /// Debounced query controller
    pub controller: QueryController,
    /// Current search query as typed
    pub query: String,
    /// Cursor position within the query string (byte index)
    pub query_cursor: usize,
    /// Current UI mode
    pub mode: Mode,
    /// Cursor position in the result list
    pub cursor: usize,
    /// Scroll offset for the result list
    pub scroll_offset: usize,
    /// Height of the visible result list area (set during render)
    pub visible_height: usize,
    /// Status messages
    pub messages: Vec<StatusMessage>,
    /// Message TTL for auto-expiry
    pub message_ttl: Duration,
    /// Whether a mutation round-trip is outstanding
    pub mutating: bool,
    /// State for the entry form modal
    pub form_state: Option<EntryFormState>,
    /// State for the confirmation dialog
    pub confirm_state: Option<ConfirmDialogState>,
    /// State for the passphrase prompt
    pub passphrase_state: Option<PassphraseState>,
    /// Passphrase that unlocks admin mode
    admin_passphrase: String,
}

impl AppState {
    /// Create new application state from the loaded configuration
    #[must_use]
    pub fn new(config: &ShelfrConfig) -> Self {
        Self {
            view: CatalogViewState::new(),
            controller: QueryController::new(config.debounce()),
            query: String::new(),
            query_cursor: 0,
            mode: Mode::Normal,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20, // Default, updated during render
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            mutating: false,
            form_state: None,
            confirm_state: None,
            passphrase_state: None,
            admin_passphrase: config.admin_passphrase.clone(),
        }
    }

    /// Move cursor up
    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.view.results().len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor up by one page
    pub const fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height);
        self.adjust_scroll();
    }

    /// Move cursor down by one page
    pub fn page_down(&mut self) {
        let max_cursor = self.view.results().len().saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height).min(max_cursor);
        self.adjust_scroll();
    }

    /// Jump to first entry
    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to last entry
    pub fn jump_to_end(&mut self) {
        self.cursor = self.view.results().len().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Adjust scroll offset to keep cursor visible
    ///
    /// The viewport can collapse to zero rows on a tiny terminal; the
    /// offset then just tracks the cursor.
    const fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self
                .cursor
                .saturating_sub(self.visible_height.saturating_sub(1));
        }
    }

    /// Pull the cursor back into range after the result set shrank
    pub fn clamp_cursor(&mut self) {
        let len = self.view.results().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.adjust_scroll();
    }

    /// Get the entry under the cursor
    #[must_use]
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.view.results().get(self.cursor)
    }

    /// Add a character to the query
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove a character from the query (backspace)
    pub fn query_backspace(&mut self) {
        if self.query_cursor > 0 {
            let prev_char_boundary = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            self.query.remove(prev_char_boundary);
            self.query_cursor = prev_char_boundary;
        }
    }

    /// Delete character under cursor
    pub fn query_delete(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query.remove(self.query_cursor);
        }
    }

    /// Move query cursor left
    pub fn query_cursor_left(&mut self) {
        if self.query_cursor > 0 {
            self.query_cursor = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    /// Move query cursor right
    pub fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    /// Clear the query
    pub fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }

    /// Push the edited query into the controller
    ///
    /// A query that trims to empty clears the result list on the spot;
    /// anything else arms the debounce window.
    pub fn sync_query(&mut self, now: Instant) {
        if self.controller.set_query(&self.query, now) == QueryEvent::Cleared {
            self.view.clear_results();
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }

    /// Apply a finished search round to the view
    ///
    /// Stale rounds are dropped, fresh results replace the list wholesale,
    /// failures surface the error and leave the list empty.
    pub fn apply_search(&mut self, seq: u64, result: remote::Result<Vec<CatalogEntry>>) {
        match self.controller.apply_response(seq, result) {
            SearchOutcome::Results(entries) => {
                self.view.replace_results(entries);
                self.scroll_offset = 0;
                self.clamp_cursor();
            }
            SearchOutcome::Failed(reason) => {
                self.view.clear_results();
                self.cursor = 0;
                self.scroll_offset = 0;
                self.add_message(MessageLevel::Error, reason);
            }
            SearchOutcome::Stale => {}
        }
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: String) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Get non-expired messages
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Clean up expired messages
    pub fn cleanup_messages(&mut self) {
        self.messages.retain(|m| !m.is_expired(self.message_ttl));
    }

    /// Open the edit form for the entry under the cursor
    pub fn open_edit_form(&mut self) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };
        self.form_state = Some(EntryFormState::edit(&entry));
        self.view.open_edit(entry);
        self.mode = Mode::Form;
    }

    /// Open the add-new form seeded from the current query
    ///
    /// Only applies when the query produced no matches and admin mode is
    /// active; otherwise this is a no-op.
    pub fn open_draft_form(&mut self) {
        if !self.view.can_add(&self.query) {
            return;
        }
        let draft = EntryDraft::from_title(self.query.trim());
        self.form_state = Some(EntryFormState::create(&draft));
        self.view.open_draft(draft);
        self.mode = Mode::Form;
    }

    /// Close the form after a confirmed mutation
    ///
    /// The editor slot is already cleared by the reconciliation call.
    pub fn close_form(&mut self) {
        self.form_state = None;
        self.mode = Mode::Normal;
    }

    /// Cancel the form without saving
    pub fn cancel_form(&mut self) {
        self.form_state = None;
        self.view.close_editor();
        self.mode = Mode::Normal;
    }

    /// Open the delete confirmation for the entry under the cursor
    pub fn enter_confirm(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        self.confirm_state = Some(ConfirmDialogState::new(
            "Remove Entry",
            format!("Delete \"{}\" (shelf {})?", entry.title, entry.location),
            entry.id,
        ));
        self.mode = Mode::Confirm;
    }

    /// Accept the confirmation dialog and return its state
    #[must_use]
    pub const fn exit_confirm(&mut self) -> Option<ConfirmDialogState> {
        self.mode = Mode::Normal;
        self.confirm_state.take()
    }

    /// Dismiss the confirmation dialog without acting
    pub fn cancel_confirm(&mut self) {
        self.confirm_state = None;
        self.mode = Mode::Normal;
    }

    /// Open the admin passphrase prompt
    pub fn enter_passphrase(&mut self) {
        self.passphrase_state = Some(PassphraseState::new());
        self.mode = Mode::Passphrase;
    }

    /// Dismiss the passphrase prompt without unlocking
    pub fn cancel_passphrase(&mut self) {
        self.passphrase_state = None;
        self.mode = Mode::Normal;
    }

    /// Check the typed passphrase and unlock admin mode on a match
    ///
    /// Returns whether admin mode was unlocked. The prompt closes either
    /// way; the typed buffer is discarded.
    pub fn submit_passphrase(&mut self) -> bool {
        let prompt = self.passphrase_state.take();
        self.mode = Mode::Normal;

        let unlocked = prompt.is_some_and(|p| p.buffer == self.admin_passphrase);
        if unlocked {
            self.view.set_admin_mode(true);
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RemoteError;

    fn make_state() -> AppState {
        AppState::new(&ShelfrConfig::default())
    }

    fn sample_results() -> Vec<CatalogEntry> {
        (1..=10)
            .map(|i| CatalogEntry::new(i, format!("Book {i}"), u32::try_from(i).unwrap()))
            .collect()
    }

    #[test]
    fn test_cursor_navigation_stays_in_bounds() {
        let mut state = make_state();
        state.view.replace_results(sample_results());

        state.cursor_up();
        assert_eq!(state.cursor, 0);

        for _ in 0..20 {
            state.cursor_down();
        }
        assert_eq!(state.cursor, 9);

        state.jump_to_start();
        assert_eq!(state.cursor, 0);
        state.jump_to_end();
        assert_eq!(state.cursor, 9);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut state = make_state();
        state.view.replace_results(sample_results());
        state.visible_height = 3;

        for _ in 0..5 {
            state.cursor_down();
        }
        assert_eq!(state.cursor, 5);
        assert_eq!(state.scroll_offset, 3);

        state.jump_to_start();
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_survives_zero_height_viewport() {
        let mut state = make_state();
        state.visible_height = 0;
        state.view.replace_results(sample_results());

        state.clamp_cursor();
        assert_eq!(state.scroll_offset, 0);

        state.cursor_down();
        state.page_down();
        assert_eq!(state.cursor, 1);
        assert_eq!(state.scroll_offset, state.cursor);
    }

    #[test]
    fn test_query_editing_multibyte() {
        let mut state = make_state();

        state.query_push('해');
        state.query_push('리');
        assert_eq!(state.query, "해리");
        assert_eq!(state.query_cursor, 6);

        state.query_cursor_left();
        assert_eq!(state.query_cursor, 3);
        state.query_push('븐');
        assert_eq!(state.query, "해븐리");

        state.query_backspace();
        assert_eq!(state.query, "해리");
        assert_eq!(state.query_cursor, 3);
    }

    #[test]
    fn test_sync_query_clears_results_for_blank_query() {
        let mut state = make_state();
        state.view.replace_results(sample_results());
        state.cursor = 4;

        state.query_push(' ');
        state.sync_query(Instant::now());

        assert!(state.view.results().is_empty());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_apply_search_replaces_results_and_clamps_cursor() {
        let mut state = make_state();
        state.view.replace_results(sample_results());
        state.cursor = 9;

        let now = Instant::now();
        state.query_push('b');
        state.sync_query(now);
        let request = state
            .controller
            .poll_due(now + Duration::from_millis(400))
            .unwrap();

        state.apply_search(request.seq, Ok(vec![CatalogEntry::new(1, "Book 1", 1)]));

        assert_eq!(state.view.results().len(), 1);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_apply_search_failure_empties_list_and_reports() {
        let mut state = make_state();
        state.view.replace_results(sample_results());

        let now = Instant::now();
        state.query_push('b');
        state.sync_query(now);
        let request = state
            .controller
            .poll_due(now + Duration::from_millis(400))
            .unwrap();

        state.apply_search(
            request.seq,
            Err(RemoteError::Rejected("boom".to_string())),
        );

        assert!(state.view.results().is_empty());
        assert_eq!(state.active_messages().len(), 1);
        assert_eq!(state.active_messages()[0].level, MessageLevel::Error);
    }

    #[test]
    fn test_open_draft_form_requires_add_affordance() {
        let mut state = make_state();
        state.query_push('x');

        // Not admin yet
        state.open_draft_form();
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.form_state.is_none());

        state.view.set_admin_mode(true);
        state.open_draft_form();
        assert_eq!(state.mode, Mode::Form);
        assert!(state.form_state.is_some());
        assert!(!state.view.editor().is_idle());
    }

    #[test]
    fn test_cancel_form_releases_editor_slot() {
        let mut state = make_state();
        state.view.set_admin_mode(true);
        state.query_push('x');
        state.open_draft_form();

        state.cancel_form();
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.view.editor().is_idle());
    }

    #[test]
    fn test_passphrase_unlocks_admin_mode() {
        let mut state = make_state();

        state.enter_passphrase();
        assert_eq!(state.mode, Mode::Passphrase);
        for c in "wrong".chars() {
            state.passphrase_state.as_mut().unwrap().push(c);
        }
        assert!(!state.submit_passphrase());
        assert!(!state.view.admin_mode());

        state.enter_passphrase();
        for c in ShelfrConfig::default().admin_passphrase.chars() {
            state.passphrase_state.as_mut().unwrap().push(c);
        }
        assert!(state.submit_passphrase());
        assert!(state.view.admin_mode());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_message_expiry() {
        let mut state = make_state();
        state.message_ttl = Duration::from_millis(10);

        state.add_message(MessageLevel::Info, "hello".to_string());
        assert_eq!(state.active_messages().len(), 1);

        std::thread::sleep(Duration::from_millis(30));
        assert!(state.active_messages().is_empty());

        state.cleanup_messages();
        assert!(state.messages.is_empty());
    }
}
