//! Composed view state for a catalog session
//!
//! `CatalogViewState` owns everything the UI renders: the result set from
//! the latest completed search, the editor slot, and the admin-mode flag.
//! The editor slot is a tagged state rather than two nullable fields, so "at
//! most one edit target or draft at a time" holds at the type level.
//!
//! Result-set transformations come in two groups:
//!
//! - search replacements (`replace_results`, `clear_results`), driven by the
//!   query controller
//! - mutation reconciliation (`apply_created`, `apply_updated`,
//!   `apply_deleted`), called only after the store confirmed the operation

use crate::catalog::{CatalogEntry, EntryDraft};

/// What the user is composing right now, if anything
///
/// Opening an edit or draft while another is active replaces it
/// (last-intent-wins, single-operator UI).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorSlot {
    /// No entry open for editing
    #[default]
    Idle,
    /// An existing entry open in the edit form
    Editing(CatalogEntry),
    /// A new entry under composition
    Drafting(EntryDraft),
}

impl EditorSlot {
    /// Whether the slot is unoccupied
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Session state composed from results, editor slot, and admin flag
#[derive(Debug, Default)]
pub struct CatalogViewState {
    results: Vec<CatalogEntry>,
    editor: EditorSlot,
    admin_mode: bool,
}

impl CatalogViewState {
    /// Create an empty session state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries from the latest completed search, in store order
    #[must_use]
    pub fn results(&self) -> &[CatalogEntry] {
        &self.results
    }

    /// Current editor slot
    #[must_use]
    pub const fn editor(&self) -> &EditorSlot {
        &self.editor
    }

    /// Whether admin affordances are visible
    #[must_use]
    pub const fn admin_mode(&self) -> bool {
        self.admin_mode
    }

    /// Toggle admin affordances on or off
    pub fn set_admin_mode(&mut self, on: bool) {
        self.admin_mode = on;
    }

    /// Replace the result set wholesale with a new search round
    pub fn replace_results(&mut self, entries: Vec<CatalogEntry>) {
        self.results = entries;
    }

    /// Drop all results (empty query or failed search)
    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    /// Whether the add-new affordance applies
    ///
    /// Adding is a response to "no match found": it needs admin mode, a
    /// non-empty query, and zero results.
    #[must_use]
    pub fn can_add(&self, query: &str) -> bool {
        self.admin_mode && !query.trim().is_empty() && self.results.is_empty()
    }

    /// Open an entry in the edit form, replacing any current occupant
    pub fn open_edit(&mut self, entry: CatalogEntry) {
        self.editor = EditorSlot::Editing(entry);
    }

    /// Open an add-new draft, replacing any current occupant
    pub fn open_draft(&mut self, draft: EntryDraft) {
        self.editor = EditorSlot::Drafting(draft);
    }

    /// Close the editor without saving (cancel)
    pub fn close_editor(&mut self) {
        self.editor = EditorSlot::Idle;
    }

    /// Record a store-confirmed create: append and clear the draft
    pub fn apply_created(&mut self, entry: CatalogEntry) {
        self.results.push(entry);
        self.editor = EditorSlot::Idle;
    }

    /// Record a store-confirmed update: replace in place, keep position
    ///
    /// Returns whether a result with the entry's id was present. The editor
    /// closes either way; the set may have been replaced by a newer search
    /// while the edit was open.
    pub fn apply_updated(&mut self, entry: CatalogEntry) -> bool {
        self.editor = EditorSlot::Idle;
        match self.results.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Record a store-confirmed delete: drop the entry, close the editor
    ///
    /// Returns whether a result with that id was present.
    pub fn apply_deleted(&mut self, id: u64) -> bool {
        self.editor = EditorSlot::Idle;
        let before = self.results.len();
        self.results.retain(|e| e.id != id);
        self.results.len() != before
    }
}
