//! Ratatui widgets for the browse TUI
//!
//! Custom widgets for rendering the live-search interface.

mod confirm_dialog;
mod entry_form;
mod entry_list;
mod help_bar;
mod passphrase_prompt;
mod search_bar;
mod status_bar;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogState};
pub use entry_form::{EntryForm, EntryFormState, FormContext, FormField, FormSubmit};
pub use entry_list::EntryList;
pub use help_bar::{HelpBar, KeyHint};
pub use passphrase_prompt::{PassphrasePrompt, PassphraseState};
pub use search_bar::{QueryPhase, SearchBar};
pub use status_bar::StatusBar;
