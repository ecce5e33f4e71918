//! Event handling for the browse TUI
//!
//! Handles keyboard and mouse events, mapping them to application actions.
//! Each mode gets its own handler; `poll_and_handle` dispatches on the
//! current mode.

use crate::ui::output::MessageLevel;
use crate::ui::state::{AppState, Mode};
use crate::ui::widgets::FormSubmit;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Exit the browser
    Quit,
    /// Query changed, needs a controller sync
    QueryChanged,
    /// Entry form submitted with a validated payload
    SubmitForm(FormSubmit),
    /// Deletion confirmed for the entry with this id
    ConfirmDelete(u64),
    /// No action taken
    Ignored,
}

/// Handle events in normal browsing mode
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,

        // Open the edit form for the selected entry (admin only)
        (KeyCode::Enter, _) => {
            if state.view.admin_mode() && !state.mutating && state.selected_entry().is_some() {
                state.open_edit_form();
            }
            EventResult::Continue
        }

        // Navigation
        (KeyCode::Up, _) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) => {
            state.cursor_down();
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }

        // Admin mode toggle
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            if state.view.admin_mode() {
                state.view.set_admin_mode(false);
                state.add_message(MessageLevel::Info, "Admin mode disabled".to_string());
            } else {
                state.enter_passphrase();
            }
            EventResult::Continue
        }

        // Add a new entry when the query found nothing (admin only)
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
            if !state.mutating {
                state.open_draft_form();
            }
            EventResult::Continue
        }

        // Remove the selected entry after confirmation (admin only)
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            if state.view.admin_mode() && !state.mutating {
                state.enter_confirm();
            }
            EventResult::Continue
        }

        // Query editing
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::QueryChanged
        }
        (KeyCode::Backspace, _) => {
            if state.query.is_empty() {
                EventResult::Ignored
            } else {
                state.query_backspace();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Delete, _) => {
            if state.query_cursor >= state.query.len() {
                EventResult::Ignored
            } else {
                state.query_delete();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            state.query_clear();
            EventResult::QueryChanged
        }
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
            // Delete word backwards
            let trimmed = state.query[..state.query_cursor].trim_end();
            if let Some(last_space) = trimmed.rfind(' ') {
                state.query.drain(last_space + 1..state.query_cursor);
                state.query_cursor = last_space + 1;
            } else {
                state.query.drain(..state.query_cursor);
                state.query_cursor = 0;
            }
            EventResult::QueryChanged
        }

        _ => EventResult::Ignored,
    }
}

/// Handle events while the entry form is open
fn handle_form_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    if key.code == KeyCode::Esc {
        state.cancel_form();
        return EventResult::Continue;
    }
    if key.code == KeyCode::Enter {
        // A save round-trip is already outstanding; wait for its outcome
        if state.mutating {
            return EventResult::Ignored;
        }
        let Some(form) = state.form_state.as_ref() else {
            return EventResult::Ignored;
        };
        return match form.submit() {
            Ok(payload) => EventResult::SubmitForm(payload),
            Err(e) => {
                state.add_message(MessageLevel::Warning, e.to_string());
                EventResult::Continue
            }
        };
    }

    let Some(form) = state.form_state.as_mut() else {
        return EventResult::Ignored;
    };
    match (key.code, key.modifiers) {
        (KeyCode::Tab | KeyCode::BackTab, _) => {
            form.toggle_focus();
            EventResult::Continue
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            form.insert_char(c);
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            form.backspace();
            EventResult::Continue
        }
        (KeyCode::Delete, _) => {
            form.delete();
            EventResult::Continue
        }
        (KeyCode::Left, _) => {
            form.cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            form.cursor_right();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            form.cursor_home();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            form.cursor_end();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle events while the delete confirmation is open
fn handle_confirm_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => state
            .exit_confirm()
            .map_or(EventResult::Ignored, |dialog| {
                EventResult::ConfirmDelete(dialog.entry_id)
            }),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            state.cancel_confirm();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle events while the admin passphrase prompt is open
fn handle_passphrase_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            state.cancel_passphrase();
            EventResult::Continue
        }
        (KeyCode::Enter, _) => {
            if state.submit_passphrase() {
                state.add_message(MessageLevel::Success, "Admin mode enabled".to_string());
            } else {
                state.add_message(MessageLevel::Error, "Wrong passphrase".to_string());
            }
            EventResult::Continue
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            if let Some(prompt) = state.passphrase_state.as_mut() {
                prompt.push(c);
            }
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            if let Some(prompt) = state.passphrase_state.as_mut() {
                prompt.backspace();
            }
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle mouse events
fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => match state.mode {
            Mode::Normal => handle_normal_mode(state, key),
            Mode::Form => handle_form_mode(state, key),
            Mode::Passphrase => handle_passphrase_mode(state, key),
            Mode::Confirm => handle_confirm_mode(state, key),
        },
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
