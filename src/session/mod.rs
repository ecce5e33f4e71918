//! Catalog session logic
//!
//! The state machine between the UI and the remote store. It is
//! UI-agnostic: the TUI event loop and the one-shot CLI commands both drive
//! these types.
//!
//! # Architecture
//!
//! - `query`: debounced query control, request sequencing, stale suppression
//! - `mutation`: remote-confirmed create/update/delete reconciliation
//! - `state`: composed view state (results, editor slot, admin flag)
//! - `error`: session error taxonomy
//!
//! The flow for searches: edits go to `QueryController::set_query`; the
//! event loop calls `poll_due` each tick and dispatches any returned
//! request; responses come back through `apply_response`, whose outcome
//! tells the caller how to update `CatalogViewState`. Mutations call the
//! store first and touch state only on confirmation.

pub mod error;
pub mod mutation;
pub mod query;
pub mod state;

pub use error::{Result, SessionError};
pub use query::{QueryController, QueryEvent, SearchOutcome, SearchRequest};
pub use state::{CatalogViewState, EditorSlot};
