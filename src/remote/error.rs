//! Remote-store error types
//!
//! Failures at the store boundary fall into two groups:
//!
//! - **`Transport`**: no usable response (connection refused, timeout,
//!   unparseable body); wraps the underlying `reqwest` error
//! - **`Rejected`**: the store answered with a non-success status and a
//!   structured payload; the human-readable message is carried verbatim so
//!   the UI can surface it
//!
//! Both are recoverable: callers report the message and leave local state
//! untouched.

use thiserror::Error;

/// Errors returned by catalog store operations
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure, no structured response received
    #[error("Store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store rejected the request and said why
    #[error("{0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;
