//! Shelfr - a live-search client for a shared book catalog
//!
//! This library provides debounced catalog search with subsequence matching
//! and highlighted results, plus store-confirmed create, update, and delete
//! reconciliation against a remote catalog store.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod remote;
pub mod search;
pub mod session;
pub mod ui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ShelfrError {
    /// Catalog entry validation error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Remote store error
    #[error("Store error: {0}")]
    StoreError(#[from] remote::RemoteError),
    /// Session error
    #[error("Session error: {0}")]
    SessionError(#[from] session::SessionError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
