//! Session-level error types
//!
//! Mutations can fail before the store is reached (local validation) or at
//! the store boundary. Both are recoverable: the editor slot stays open and
//! the message is surfaced to the user.

use crate::catalog::CatalogError;
use crate::remote::RemoteError;
use thiserror::Error;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Entry fields failed validation before any store call was made
    #[error("Invalid entry: {0}")]
    Invalid(#[from] CatalogError),

    /// The store call failed; carries the user-facing message
    #[error(transparent)]
    Store(#[from] RemoteError),

    /// An operation needed an open editor slot and found none
    #[error("Nothing is being edited")]
    NoEditor,
}

pub type Result<T> = std::result::Result<T, SessionError>;
