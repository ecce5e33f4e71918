//! Catalog store boundary and its HTTP implementation
//!
//! `CatalogStore` is the seam the rest of the crate talks through; tests
//! substitute a scripted implementation, production wires up `HttpStore`
//! against the catalog service's REST surface:
//!
//! - `GET  /api/search?q={query}`: title search, empty array for no matches
//! - `POST /api/books`: create, answers the stored entry with its id
//! - `PUT  /api/books/{id}`: update title/location
//! - `DELETE /api/books/{id}`: remove
//!
//! Non-success statuses are decoded into the service's rejection payload and
//! surfaced as `RemoteError::Rejected` with the carried message.

use crate::catalog::{CatalogEntry, NewEntry};
use crate::remote::error::{RemoteError, Result};
use crate::remote::types::{Confirmation, Rejection};
use reqwest::blocking::{Client, Response};
use std::fmt;
use std::time::Duration;

/// The four operations the remote catalog service exposes
///
/// `Send + Sync` so a shared store handle can serve worker threads issuing
/// requests off the UI loop.
pub trait CatalogStore: Send + Sync {
    /// Search entries by title; empty result is not an error
    fn search(&self, query: &str) -> Result<Vec<CatalogEntry>>;

    /// Persist a new entry; the response carries the assigned id
    fn create(&self, entry: &NewEntry) -> Result<CatalogEntry>;

    /// Overwrite the fields of an existing entry
    fn update(&self, id: u64, fields: &NewEntry) -> Result<Confirmation>;

    /// Remove an entry
    fn delete(&self, id: u64) -> Result<Confirmation>;
}

/// Blocking HTTP client for the catalog service
#[derive(Clone)]
pub struct HttpStore {
    base_url: String,
    http: Client,
}

impl HttpStore {
    /// Build a client for the service at `base_url` with a request timeout
    ///
    /// A trailing slash on the base URL is tolerated.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Transport` if the underlying client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    /// The service root this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn entry_url(&self, id: u64) -> String {
        format!("{}/api/books/{id}", self.base_url)
    }

    fn rejection(resp: Response) -> RemoteError {
        let status = resp.status();
        let body = resp.json::<Rejection>().unwrap_or_default();
        RemoteError::Rejected(body.into_message(status))
    }
}

impl CatalogStore for HttpStore {
    fn search(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        let url = format!("{}/api/search", self.base_url);
        let resp = self.http.get(url).query(&[("q", query)]).send()?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp));
        }
        Ok(resp.json::<Vec<CatalogEntry>>()?)
    }

    fn create(&self, entry: &NewEntry) -> Result<CatalogEntry> {
        let url = format!("{}/api/books", self.base_url);
        let resp = self.http.post(url).json(entry).send()?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp));
        }
        Ok(resp.json::<CatalogEntry>()?)
    }

    fn update(&self, id: u64, fields: &NewEntry) -> Result<Confirmation> {
        let resp = self.http.put(self.entry_url(id)).json(fields).send()?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp));
        }
        Ok(resp.json::<Confirmation>()?)
    }

    fn delete(&self, id: u64) -> Result<Confirmation> {
        let resp = self.http.delete(self.entry_url(id)).send()?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp));
        }
        Ok(resp.json::<Confirmation>()?)
    }
}

impl fmt::Debug for HttpStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
