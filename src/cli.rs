//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for shelfr using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive live-search browser (default)
//! - **search**: One-shot title search
//! - **add**: Add an entry to the catalog
//! - **update**: Replace an entry's title and shelf
//! - **remove**: Delete an entry after confirmation
//! - **config**: Inspect or initialize the configuration file
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--url` flag to target a different store
//! - Command aliases (e.g., `b` for `browse`, `rm` for `remove`)
//!
//! # Examples
//!
//! ```
//! use shelfr::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["shelfr", "search", "harry"]);
//! match cli.get_command() {
//!     Commands::Search { query } => assert_eq!(query, "harry"),
//!     _ => panic!("expected search"),
//! }
//! ```

use clap::{Parser, Subcommand};

/// Command-line interface for shelfr
#[derive(Parser, Debug)]
#[command(name = "shelfr")]
#[command(about = "A live-search client for a shared book catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress decorated output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Store base URL (overrides config)
    #[arg(long = "url", value_name = "URL", global = true)]
    pub url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive catalog browser (default)
    #[command(visible_alias = "b")]
    Browse,

    /// Search the catalog once and print matching entries
    #[command(visible_alias = "s")]
    Search {
        /// Query text matched against titles
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Add an entry to the catalog
    #[command(visible_alias = "a")]
    Add {
        /// Book title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Shelf location number
        #[arg(value_name = "SHELF")]
        location: u32,
    },

    /// Replace an entry's title and shelf location
    Update {
        /// Entry id to update
        #[arg(value_name = "ID")]
        id: u64,

        /// New book title
        #[arg(value_name = "TITLE")]
        title: String,

        /// New shelf location number
        #[arg(value_name = "SHELF")]
        location: u32,
    },

    /// Remove an entry from the catalog
    #[command(visible_alias = "rm")]
    Remove {
        /// Entry id to remove
        #[arg(value_name = "ID")]
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Inspect or initialize the configuration file
    Config {
        /// Write a default configuration file if none exists
        #[arg(long = "init")]
        init: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["shelfr"]);
        assert_eq!(cli.get_command(), Commands::Browse);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["shelfr", "search", "harry potter"]);
        assert_eq!(
            cli.get_command(),
            Commands::Search {
                query: "harry potter".to_string()
            }
        );
    }

    #[test]
    fn test_parse_add_with_shelf_number() {
        let cli = Cli::parse_from(["shelfr", "add", "Dune", "5"]);
        assert_eq!(
            cli.get_command(),
            Commands::Add {
                title: "Dune".to_string(),
                location: 5
            }
        );
    }

    #[test]
    fn test_add_rejects_non_numeric_shelf() {
        let result = Cli::try_parse_from(["shelfr", "add", "Dune", "five"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::parse_from(["shelfr", "update", "7", "Dune Messiah", "6"]);
        assert_eq!(
            cli.get_command(),
            Commands::Update {
                id: 7,
                title: "Dune Messiah".to_string(),
                location: 6
            }
        );
    }

    #[test]
    fn test_parse_remove_with_yes() {
        let cli = Cli::parse_from(["shelfr", "rm", "7", "--yes"]);
        assert_eq!(cli.get_command(), Commands::Remove { id: 7, yes: true });
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["shelfr", "b"]);
        assert_eq!(cli.get_command(), Commands::Browse);

        let cli = Cli::parse_from(["shelfr", "s", "dune"]);
        assert!(matches!(cli.get_command(), Commands::Search { .. }));

        let cli = Cli::parse_from(["shelfr", "a", "Dune", "5"]);
        assert!(matches!(cli.get_command(), Commands::Add { .. }));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["shelfr", "search", "dune", "--quiet"]);
        assert!(cli.quiet);

        let cli = Cli::parse_from(["shelfr", "--url", "http://localhost:9200", "browse"]);
        assert_eq!(cli.url.as_deref(), Some("http://localhost:9200"));
    }

    #[test]
    fn test_config_init_flag() {
        let cli = Cli::parse_from(["shelfr", "config", "--init"]);
        assert_eq!(cli.get_command(), Commands::Config { init: true });

        let cli = Cli::parse_from(["shelfr", "config"]);
        assert_eq!(cli.get_command(), Commands::Config { init: false });
    }
}
