//! Core catalog data types
//!
//! This module defines the records exchanged with the remote store and the
//! transient draft used while composing a new entry.
//!
//! # Types
//!
//! - **`CatalogEntry`**: one persisted book (`id`, `title`, shelf `location`)
//! - **`NewEntry`**: a validated entry without an id, ready for `create`
//! - **`EntryDraft`**: a partial entry under composition in the add-new form
//!
//! # Design Rationale
//!
//! `id == 0` is reserved as the "not yet persisted" sentinel; the store
//! assigns real ids starting from 1. Validation happens when a draft is
//! completed into a `NewEntry`, so the store layer only ever sees entries
//! that satisfy the title/location invariants. Wire field names follow the
//! remote service's JSON (`shelfNumber`), handled via serde renames.
//!
//! # Examples
//!
//! ```
//! use shelfr::catalog::EntryDraft;
//!
//! let mut draft = EntryDraft::from_title("Dune");
//! draft.location = Some(12);
//! let entry = draft.complete().unwrap();
//! assert_eq!(entry.title, "Dune");
//! assert_eq!(entry.location, 12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sentinel id for entries that have not been persisted yet
pub const UNSAVED_ID: u64 = 0;

/// Validation errors for catalog records
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Title is empty or whitespace-only
    #[error("title must not be empty")]
    EmptyTitle,

    /// Shelf location is missing or not a positive number
    #[error("shelf location must be a positive number")]
    InvalidLocation,
}

/// One book in the catalog
///
/// Every entry shown to the user carries a server-assigned `id > 0`; the only
/// exception is the transient draft entry during creation, which uses
/// [`UNSAVED_ID`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Server-assigned identifier, unique across the catalog
    pub id: u64,
    /// Book title as entered
    pub title: String,
    /// Physical shelf number the book lives on
    #[serde(rename = "shelfNumber")]
    pub location: u32,
}

impl CatalogEntry {
    /// Create an entry from its parts
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, location: u32) -> Self {
        Self {
            id,
            title: title.into(),
            location,
        }
    }

    /// Whether this entry has been acknowledged by the store
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }

    /// Validate the entry's fields against the catalog invariants
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the title is blank or the location is zero.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if self.location == 0 {
            return Err(CatalogError::InvalidLocation);
        }
        Ok(())
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (shelf {})", self.title, self.location)
    }
}

/// A validated entry without an id, the payload for `create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEntry {
    /// Book title, non-empty
    pub title: String,
    /// Positive shelf number
    #[serde(rename = "shelfNumber")]
    pub location: u32,
}

impl NewEntry {
    /// Build a create payload, enforcing the catalog invariants
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the title is blank or the location is zero.
    pub fn new(title: impl Into<String>, location: u32) -> Result<Self, CatalogError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if location == 0 {
            return Err(CatalogError::InvalidLocation);
        }
        Ok(Self { title, location })
    }
}

/// A partial entry being composed in the add-new flow
///
/// Pre-populated from the current query text when the admin starts an add,
/// completed into a [`NewEntry`] once both fields are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    /// Title under composition
    pub title: String,
    /// Shelf number, if one has been entered
    pub location: Option<u32>,
}

impl EntryDraft {
    /// Start a draft with a pre-filled title
    #[must_use]
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: None,
        }
    }

    /// Complete the draft into a create payload
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the title is blank or no positive location
    /// has been entered.
    pub fn complete(&self) -> Result<NewEntry, CatalogError> {
        let location = self.location.ok_or(CatalogError::InvalidLocation)?;
        NewEntry::new(self.title.clone(), location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsaved_sentinel() {
        let draft = CatalogEntry::new(UNSAVED_ID, "Dune", 3);
        assert!(!draft.is_persisted());

        let saved = CatalogEntry::new(7, "Dune", 3);
        assert!(saved.is_persisted());
    }

    #[test]
    fn test_entry_validation() {
        assert!(CatalogEntry::new(1, "Dune", 3).validate().is_ok());
        assert_eq!(
            CatalogEntry::new(1, "   ", 3).validate(),
            Err(CatalogError::EmptyTitle)
        );
        assert_eq!(
            CatalogEntry::new(1, "Dune", 0).validate(),
            Err(CatalogError::InvalidLocation)
        );
    }

    #[test]
    fn test_new_entry_rejects_blank_title() {
        assert_eq!(NewEntry::new("", 5), Err(CatalogError::EmptyTitle));
        assert_eq!(NewEntry::new("  \t ", 5), Err(CatalogError::EmptyTitle));
    }

    #[test]
    fn test_draft_completion() {
        let mut draft = EntryDraft::from_title("해리포터");
        assert_eq!(draft.complete(), Err(CatalogError::InvalidLocation));

        draft.location = Some(0);
        assert_eq!(draft.complete(), Err(CatalogError::InvalidLocation));

        draft.location = Some(4);
        let entry = draft.complete().unwrap();
        assert_eq!(entry.title, "해리포터");
        assert_eq!(entry.location, 4);
    }

    #[test]
    fn test_wire_field_names() {
        let entry = CatalogEntry::new(2, "Dune", 9);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"shelfNumber\":9"));

        let parsed: CatalogEntry =
            serde_json::from_str(r#"{"id":2,"title":"Dune","shelfNumber":9}"#).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_display_shows_shelf() {
        let entry = CatalogEntry::new(1, "Dune", 12);
        assert_eq!(entry.to_string(), "Dune (shelf 12)");
    }
}
