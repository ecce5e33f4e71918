//! Mock catalog store for testing
//!
//! `MockStore` answers each operation from a pre-loaded script and records
//! every call, so session logic can be tested without a running service.

use crate::catalog::{CatalogEntry, NewEntry};
use crate::remote::error::Result;
use crate::remote::store::CatalogStore;
use crate::remote::types::Confirmation;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Search(String),
    Create(NewEntry),
    Update(u64, NewEntry),
    Delete(u64),
}

/// Store double answering from scripted outcomes
///
/// Each operation pops the next scripted outcome of its kind. An exhausted
/// script answers a benign default: empty search results, the created entry
/// echoed back with id 1, an "ok" confirmation for update/delete.
#[derive(Default)]
pub struct MockStore {
    search_script: Mutex<VecDeque<Result<Vec<CatalogEntry>>>>,
    create_script: Mutex<VecDeque<Result<CatalogEntry>>>,
    update_script: Mutex<VecDeque<Result<Confirmation>>>,
    delete_script: Mutex<VecDeque<Result<Confirmation>>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl MockStore {
    /// Create a mock with empty scripts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next unscripted `search`
    #[must_use]
    pub fn script_search(mut self, outcome: Result<Vec<CatalogEntry>>) -> Self {
        self.search_script.get_mut().unwrap().push_back(outcome);
        self
    }

    /// Queue an outcome for the next unscripted `create`
    #[must_use]
    pub fn script_create(mut self, outcome: Result<CatalogEntry>) -> Self {
        self.create_script.get_mut().unwrap().push_back(outcome);
        self
    }

    /// Queue an outcome for the next unscripted `update`
    #[must_use]
    pub fn script_update(mut self, outcome: Result<Confirmation>) -> Self {
        self.update_script.get_mut().unwrap().push_back(outcome);
        self
    }

    /// Queue an outcome for the next unscripted `delete`
    #[must_use]
    pub fn script_delete(mut self, outcome: Result<Confirmation>) -> Self {
        self.delete_script.get_mut().unwrap().push_back(outcome);
        self
    }

    /// Everything the code under test asked the store to do, in order
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Just the search queries, in order
    #[must_use]
    pub fn search_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Search(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn ok_confirmation() -> Confirmation {
        Confirmation {
            message: "ok".to_string(),
        }
    }
}

impl CatalogStore for MockStore {
    fn search(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Search(query.to_string()));
        self.search_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn create(&self, entry: &NewEntry) -> Result<CatalogEntry> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Create(entry.clone()));
        self.create_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CatalogEntry::new(1, entry.title.clone(), entry.location)))
    }

    fn update(&self, id: u64, fields: &NewEntry) -> Result<Confirmation> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Update(id, fields.clone()));
        self.update_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::ok_confirmation()))
    }

    fn delete(&self, id: u64) -> Result<Confirmation> {
        self.calls.lock().unwrap().push(StoreCall::Delete(id));
        self.delete_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::ok_confirmation()))
    }
}
