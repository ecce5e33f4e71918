//! UI error types

use thiserror::Error;

/// Errors that can occur while driving the terminal interface
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal setup, drawing, or event polling failed
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
