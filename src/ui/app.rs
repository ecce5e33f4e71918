//! Ratatui-based catalog browser
//!
//! Owns the terminal lifecycle and the event loop. Store calls never run on
//! the UI thread: searches and mutations are handed to worker threads that
//! report their outcome back over a channel, and local state only changes
//! when a confirmation comes back.

use crate::catalog::{CatalogEntry, NewEntry};
use crate::config::ShelfrConfig;
use crate::remote::{self, CatalogStore, Confirmation, RemoteError};
use crate::session::SearchRequest;
use crate::ui::error::Result;
use crate::ui::events::{EventResult, poll_and_handle};
use crate::ui::output::MessageLevel;
use crate::ui::state::{AppState, Mode};
use crate::ui::theme::Theme;
use crate::ui::widgets::{
    ConfirmDialog, EntryForm, EntryList, FormSubmit, HelpBar, PassphrasePrompt, QueryPhase,
    SearchBar, StatusBar,
};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of a store call, delivered back to the event loop
enum StoreEvent {
    /// A search round finished
    SearchDone {
        seq: u64,
        result: remote::Result<Vec<CatalogEntry>>,
    },
    /// A create call finished
    CreateDone(remote::Result<CatalogEntry>),
    /// An update call finished; `entry` is the state the store was asked for
    UpdateDone {
        entry: CatalogEntry,
        result: remote::Result<Confirmation>,
    },
    /// A delete call finished
    DeleteDone {
        id: u64,
        result: remote::Result<Confirmation>,
    },
}

/// Interactive catalog browser
pub struct BrowseApp {
    store: Arc<dyn CatalogStore>,
    theme: Theme,
}

impl BrowseApp {
    /// Create a browser backed by the given store
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            theme: Theme::dark(),
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run the browser until the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or event polling
    /// fails.
    pub fn run(&self, config: &ShelfrConfig) -> Result<()> {
        // Setup terminal
        let mut terminal = Self::setup_terminal()?;

        // Run the event loop, ensuring cleanup happens
        let result = self.run_loop(&mut terminal, config);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            // Log cleanup error but prioritize the main result
            eprintln!("Warning: terminal cleanup failed: {e}");
        }

        result
    }

    /// Run the browser event loop
    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        config: &ShelfrConfig,
    ) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut state = AppState::new(config);

        loop {
            state.cleanup_messages();

            // Absorb finished store calls before rendering
            while let Ok(event) = rx.try_recv() {
                Self::absorb_store_event(&mut state, event);
            }

            // Fire a search once the debounce window elapsed
            if let Some(request) = state.controller.poll_due(Instant::now()) {
                self.spawn_search(request, &tx);
            }

            // Render
            terminal.draw(|frame| {
                Self::render(frame, &mut state, &self.theme);
                Self::render_overlays(frame, &state, &self.theme);
            })?;

            // Handle events
            match poll_and_handle(&mut state, Duration::from_millis(50))? {
                EventResult::Quit => return Ok(()),
                EventResult::QueryChanged => state.sync_query(Instant::now()),
                EventResult::SubmitForm(FormSubmit::Create(payload)) => {
                    state.mutating = true;
                    self.spawn_create(payload, &tx);
                }
                EventResult::SubmitForm(FormSubmit::Update(entry)) => {
                    state.mutating = true;
                    self.spawn_update(entry, &tx);
                }
                EventResult::ConfirmDelete(id) => {
                    state.mutating = true;
                    self.spawn_delete(id, &tx);
                }
                EventResult::Continue | EventResult::Ignored => {}
            }
        }
    }

    /// Fold a finished store call into application state
    ///
    /// Confirmations apply exactly one local transformation; failures leave
    /// the result set untouched and surface the store's message. The form
    /// stays open on a failed save so the typed input survives for retry.
    fn absorb_store_event(state: &mut AppState, event: StoreEvent) {
        match event {
            StoreEvent::SearchDone { seq, result } => state.apply_search(seq, result),
            StoreEvent::CreateDone(result) => {
                state.mutating = false;
                match result {
                    Ok(entry) => {
                        let note = format!("Added \"{}\" (shelf {})", entry.title, entry.location);
                        state.view.apply_created(entry);
                        state.close_form();
                        state.add_message(MessageLevel::Success, note);
                    }
                    Err(e) => state.add_message(MessageLevel::Error, e.to_string()),
                }
            }
            StoreEvent::UpdateDone { entry, result } => {
                state.mutating = false;
                match result {
                    Ok(confirmation) => {
                        state.view.apply_updated(entry);
                        state.close_form();
                        state.add_message(MessageLevel::Success, confirmation.message);
                    }
                    Err(e) => state.add_message(MessageLevel::Error, e.to_string()),
                }
            }
            StoreEvent::DeleteDone { id, result } => {
                state.mutating = false;
                match result {
                    Ok(confirmation) => {
                        state.view.apply_deleted(id);
                        state.clamp_cursor();
                        state.add_message(MessageLevel::Success, confirmation.message);
                    }
                    Err(e) => state.add_message(MessageLevel::Error, e.to_string()),
                }
            }
        }
    }

    /// Run a search round on a worker thread
    fn spawn_search(&self, request: SearchRequest, tx: &Sender<StoreEvent>) {
        let store = Arc::clone(&self.store);
        let tx = tx.clone();
        thread::spawn(move || {
            let result = store.search(&request.query);
            let _ = tx.send(StoreEvent::SearchDone {
                seq: request.seq,
                result,
            });
        });
    }

    /// Run a create call on a worker thread
    fn spawn_create(&self, payload: NewEntry, tx: &Sender<StoreEvent>) {
        let store = Arc::clone(&self.store);
        let tx = tx.clone();
        thread::spawn(move || {
            let result = store.create(&payload);
            let _ = tx.send(StoreEvent::CreateDone(result));
        });
    }

    /// Run an update call on a worker thread
    fn spawn_update(&self, entry: CatalogEntry, tx: &Sender<StoreEvent>) {
        let store = Arc::clone(&self.store);
        let tx = tx.clone();
        thread::spawn(move || {
            // The form validated these fields already
            let result = NewEntry::new(entry.title.clone(), entry.location)
                .map_err(|e| RemoteError::Rejected(e.to_string()))
                .and_then(|fields| store.update(entry.id, &fields));
            let _ = tx.send(StoreEvent::UpdateDone { entry, result });
        });
    }

    /// Run a delete call on a worker thread
    fn spawn_delete(&self, id: u64, tx: &Sender<StoreEvent>) {
        let store = Arc::clone(&self.store);
        let tx = tx.clone();
        thread::spawn(move || {
            let result = store.delete(id);
            let _ = tx.send(StoreEvent::DeleteDone { id, result });
        });
    }

    /// Render the UI
    fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
        let area = frame.area();

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // Result list
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        state.visible_height = main_layout[1].height.saturating_sub(2) as usize;

        // Render search bar; its title tracks the query round trip
        let phase = if state.controller.pending() {
            QueryPhase::Typing
        } else if state.controller.in_flight() {
            QueryPhase::Waiting
        } else {
            QueryPhase::Idle
        };
        let search_bar = SearchBar::new(&state.query, state.query_cursor, theme)
            .phase(phase)
            .focused(state.mode == Mode::Normal);
        frame.render_widget(search_bar, main_layout[0]);

        // Render result list
        let list = EntryList::new(state, theme);
        frame.render_widget(list, main_layout[1]);

        // Render status bar; mutations are the one busy state left to it
        let messages: Vec<_> = state.active_messages();
        let busy = state.mutating.then_some("Saving…");
        let status_bar =
            StatusBar::new(&messages, theme, state.view.admin_mode()).with_busy(busy);
        frame.render_widget(status_bar, main_layout[2]);

        // Render help bar
        let hints =
            HelpBar::browse_hints(state.view.admin_mode(), state.view.can_add(&state.query));
        let help_bar = HelpBar::new(&hints, theme);
        frame.render_widget(help_bar, main_layout[3]);
    }

    /// Render the active modal, if any
    fn render_overlays(frame: &mut Frame, state: &AppState, theme: &Theme) {
        match state.mode {
            Mode::Form => {
                if let Some(form_state) = &state.form_state {
                    let form = EntryForm::new(form_state, theme);
                    frame.render_widget(form, frame.area());
                }
            }
            Mode::Confirm => {
                if let Some(confirm_state) = &state.confirm_state {
                    let dialog = ConfirmDialog::new(confirm_state, theme);
                    frame.render_widget(dialog, frame.area());
                }
            }
            Mode::Passphrase => {
                if let Some(prompt_state) = &state.passphrase_state {
                    let prompt = PassphrasePrompt::new(prompt_state, theme);
                    frame.render_widget(prompt, frame.area());
                }
            }
            Mode::Normal => {}
        }
    }
}
