//! Mutation coordination against the remote store
//!
//! Every operation follows the same contract: attempt the store call first,
//! and only on confirmation apply exactly one local result-set
//! transformation. A failed call leaves `CatalogViewState` untouched (the
//! editor slot stays open for retry) and the error carries the store's
//! message for the user.
//!
//! There is deliberately no optimistic path: nothing the user sees is ever
//! ahead of what the store acknowledged.
//!
//! Deleting is expected to be confirmed by the caller beforehand (the UI
//! runs a request/confirm/cancel step); these functions perform no prompting
//! themselves.

use crate::catalog::{CatalogEntry, NewEntry};
use crate::remote::{CatalogStore, Confirmation};
use crate::session::SessionError;
use crate::session::error::Result;
use crate::session::state::{CatalogViewState, EditorSlot};

/// Create a new entry and reconcile local state on confirmation
///
/// # Arguments
/// * `store` - Remote catalog store
/// * `state` - Session state to reconcile
/// * `payload` - Validated entry to persist
///
/// # Returns
/// The stored entry, now carrying its server-assigned id.
///
/// # Errors
/// Returns `SessionError` if the store rejects the create or cannot be
/// reached; local state is unchanged in that case.
pub fn create(
    store: &dyn CatalogStore,
    state: &mut CatalogViewState,
    payload: &NewEntry,
) -> Result<CatalogEntry> {
    let entry = store.create(payload)?;
    state.apply_created(entry.clone());
    Ok(entry)
}

/// Create the entry currently drafted in the editor slot
///
/// Completes the open draft into a payload and delegates to [`create`]. The
/// draft stays open on any failure, including validation.
///
/// # Errors
/// Returns `SessionError::NoEditor` if no draft is open,
/// `SessionError::Invalid` if the draft is incomplete, or the store error.
pub fn create_from_draft(
    store: &dyn CatalogStore,
    state: &mut CatalogViewState,
) -> Result<CatalogEntry> {
    let EditorSlot::Drafting(draft) = state.editor() else {
        return Err(SessionError::NoEditor);
    };
    let payload = draft.complete()?;
    create(store, state, &payload)
}

/// Update an existing entry and reconcile local state on confirmation
///
/// On success the matching result is replaced in place (position kept) and
/// the editor closes.
///
/// # Errors
/// Returns `SessionError::Invalid` if the fields fail validation, or the
/// store error; local state is unchanged in that case.
pub fn update(
    store: &dyn CatalogStore,
    state: &mut CatalogViewState,
    entry: &CatalogEntry,
) -> Result<Confirmation> {
    entry.validate()?;
    let fields = NewEntry::new(entry.title.clone(), entry.location)?;
    let confirmation = store.update(entry.id, &fields)?;
    state.apply_updated(entry.clone());
    Ok(confirmation)
}

/// Delete an entry and reconcile local state on confirmation
///
/// # Errors
/// Returns the store error if the id is unknown or the store cannot be
/// reached; local state is unchanged in that case.
pub fn delete(
    store: &dyn CatalogStore,
    state: &mut CatalogViewState,
    id: u64,
) -> Result<Confirmation> {
    let confirmation = store.delete(id)?;
    state.apply_deleted(id);
    Ok(confirmation)
}
