//! Remote catalog store boundary
//!
//! Everything the client knows about persistence lives behind the
//! `CatalogStore` trait: search, create, update, delete. The one production
//! implementation speaks the catalog service's REST interface over blocking
//! HTTP; tests swap in a scripted mock.
//!
//! # Architecture
//!
//! - `store`: the `CatalogStore` trait and `HttpStore`
//! - `types`: confirmation and rejection wire envelopes
//! - `error`: transport vs rejection taxonomy
//! - `mock`: scripted store double (test builds only)

pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod mock;

pub use error::{RemoteError, Result};
pub use store::{CatalogStore, HttpStore};
pub use types::{Confirmation, Rejection};
