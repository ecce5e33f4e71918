//! Wire types for the catalog HTTP service
//!
//! The service speaks camelCase JSON. Entry payloads reuse the catalog
//! types directly (`CatalogEntry` for responses, `NewEntry` for request
//! bodies); this module adds the confirmation and rejection envelopes.

use reqwest::StatusCode;
use serde::Deserialize;

/// Success body for update and delete operations
#[derive(Debug, Clone, Deserialize)]
pub struct Confirmation {
    /// Human-readable confirmation, e.g. "Book updated successfully"
    pub message: String,
}

/// Error body variants the service produces
///
/// Validation and not-found rejections arrive as `{"error": …}` with an
/// optional `"details"` string; some handlers answer `{"message": …}`
/// instead. All fields are optional so any of the shapes decodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rejection {
    pub error: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl Rejection {
    /// Collapse the payload into one user-facing message
    ///
    /// Falls back to the HTTP status when the body carried no text.
    #[must_use]
    pub fn into_message(self, status: StatusCode) -> String {
        let base = self
            .error
            .or(self.message)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        match self.details {
            Some(details) if !details.is_empty() => format!("{base}: {details}"),
            _ => base,
        }
    }
}
