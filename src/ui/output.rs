//! Output abstraction layer
//!
//! This module provides a backend-agnostic interface for output operations,
//! allowing the CLI handlers to print decorated messages without each one
//! reaching for `colored` directly.

use colored::Colorize;

/// Trait for output operations
///
/// Abstracts away the output mechanism so command handlers stay testable.
///
/// # Examples
///
/// ```no_run
/// use shelfr::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("Normal message");
/// output.success("Operation completed!");
/// output.error("Something went wrong");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// CLI implementation - writes to stdout/stderr
///
/// Uses colored output to stdout/stderr for a traditional command-line
/// interface.
///
/// # Examples
///
/// ```
/// use shelfr::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.success("Entry saved");
/// output.error("Store unreachable");
/// ```
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "⚠️".yellow(), message);
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}
