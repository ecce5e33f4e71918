//! Terminal UI layer
//!
//! Provides the interactive catalog browser (ratatui event loop, widgets,
//! application state) and the decorated stdout writer used by the one-shot
//! commands.
//!
//! The browser never mutates catalog state on its own: every search and
//! every save runs against the remote store on a worker thread, and the
//! visible state only changes once the store's answer comes back.

pub mod app;
pub mod error;
pub mod events;
pub mod output;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::BrowseApp;
pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StdoutWriter};
pub use theme::Theme;
