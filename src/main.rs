//! Shelfr CLI application entry point
//!
//! This is the main executable for the shelfr catalog client. It provides an
//! interactive live-search browser plus one-shot commands for scripting.
//!
//! # Features
//!
//! - **Browse Mode**: Debounced live search with highlighted matches
//! - **Admin Mode**: Passphrase-gated add, edit, and remove
//! - **One-shot Commands**: search, add, update, remove for scripting
//! - **Quiet Mode**: Suppress decorated output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog interactively (default command)
//! shelfr
//! shelfr browse
//!
//! # Search once and print matches
//! shelfr search harry
//! shelfr search 해리 --quiet
//!
//! # Add an entry
//! shelfr add "Dune" 5
//!
//! # Replace an entry's title and shelf
//! shelfr update 7 "Dune Messiah" 6
//!
//! # Remove an entry (prompts unless --yes)
//! shelfr remove 7 --yes
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/shelfr/config.toml` on Linux) and created with defaults on
//! first run. The store base URL can be overridden per invocation with
//! `--url`.

use colored::Colorize;
use shelfr::{
    ShelfrError,
    catalog::{CatalogEntry, NewEntry},
    cli::{Cli, Commands},
    config::ShelfrConfig,
    remote::{CatalogStore, HttpStore},
    search,
    session::{self, CatalogViewState},
    ui::{BrowseApp, OutputWriter, StdoutWriter},
};
use std::io;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ShelfrError>;

/// Prompt user for yes/no confirmation
///
/// # Arguments
/// * `prompt` - Question to ask the user
/// * `assume_yes` - If true, auto-confirms without prompting
///
/// # Returns
/// * `Ok(true)` if the user confirmed or the prompt was skipped
/// * `Ok(false)` if the user declined
///
/// # Errors
/// Returns `ShelfrError` if the prompt cannot be shown.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ShelfrError::IoError(io::Error::other(e)))
}

/// Render a title with the query's matched characters emphasized
fn highlight_title(title: &str, query: &str) -> String {
    search::spans(title, query)
        .into_iter()
        .map(|span| {
            if span.matched {
                span.text.yellow().bold().to_string()
            } else {
                span.text.to_string()
            }
        })
        .collect()
}

/// Open the interactive browser
///
/// # Arguments
/// * `store` - Remote catalog store
/// * `config` - Loaded configuration
///
/// # Errors
/// Returns `ShelfrError` if the terminal cannot be driven.
fn handle_browse_command(store: Arc<HttpStore>, config: &ShelfrConfig) -> Result<()> {
    let app = BrowseApp::new(store);
    app.run(config)?;
    Ok(())
}

/// Run a one-shot search and print matching entries
///
/// The store's answer is narrowed to titles that contain the query as a
/// subsequence, the same contract the browser applies.
///
/// # Arguments
/// * `store` - Remote catalog store
/// * `query` - Query text matched against titles
/// * `output` - Writer for decorated output
/// * `quiet` - If true, print bare tab-separated rows only
///
/// # Errors
/// Returns `ShelfrError` if the store cannot be reached.
fn handle_search_command(
    store: &dyn CatalogStore,
    query: &str,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    if query.trim().is_empty() {
        if !quiet {
            output.info("Empty query, nothing to search");
        }
        return Ok(());
    }

    let candidates = store.search(query)?;
    let matches: Vec<CatalogEntry> = candidates
        .into_iter()
        .filter(|e| search::matches(&e.title, query))
        .collect();

    if quiet {
        for entry in &matches {
            println!("{}\t{}\t{}", entry.id, entry.title, entry.location);
        }
        return Ok(());
    }

    if matches.is_empty() {
        output.warning(&format!("No matches for \"{query}\""));
        return Ok(());
    }

    output.success(&format!(
        "Found {} matching entr{} for \"{query}\"",
        matches.len(),
        if matches.len() == 1 { "y" } else { "ies" }
    ));
    for entry in &matches {
        println!(
            "  [{}] {} {}",
            entry.id,
            highlight_title(&entry.title, query),
            format!("(shelf {})", entry.location).dimmed()
        );
    }
    Ok(())
}

/// Add an entry to the catalog
///
/// # Arguments
/// * `store` - Remote catalog store
/// * `title` - Book title
/// * `location` - Shelf location number
/// * `output` - Writer for decorated output
/// * `quiet` - If true, print only the new entry's id
///
/// # Errors
/// Returns `ShelfrError` if the fields fail validation or the store rejects
/// the create.
fn handle_add_command(
    store: &dyn CatalogStore,
    title: &str,
    location: u32,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let payload = NewEntry::new(title, location)?;
    let mut view = CatalogViewState::new();
    let entry = session::mutation::create(store, &mut view, &payload)?;

    if quiet {
        println!("{}", entry.id);
    } else {
        output.success(&format!(
            "Added \"{}\" (shelf {}) with id {}",
            entry.title, entry.location, entry.id
        ));
    }
    Ok(())
}

/// Replace an entry's title and shelf location
///
/// # Arguments
/// * `store` - Remote catalog store
/// * `id` - Entry id to update
/// * `title` - New book title
/// * `location` - New shelf location number
/// * `output` - Writer for decorated output
/// * `quiet` - If true, suppress the confirmation message
///
/// # Errors
/// Returns `ShelfrError` if the fields fail validation, the id is unknown,
/// or the store rejects the update.
fn handle_update_command(
    store: &dyn CatalogStore,
    id: u64,
    title: &str,
    location: u32,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let entry = CatalogEntry::new(id, title, location);
    let mut view = CatalogViewState::new();
    let confirmation = session::mutation::update(store, &mut view, &entry)?;

    if !quiet {
        output.success(&confirmation.message);
    }
    Ok(())
}

/// Remove an entry from the catalog after confirmation
///
/// # Arguments
/// * `store` - Remote catalog store
/// * `id` - Entry id to remove
/// * `assume_yes` - If true, skip the confirmation prompt
/// * `output` - Writer for decorated output
/// * `quiet` - If true, auto-confirm and suppress messages
///
/// # Errors
/// Returns `ShelfrError` if the id is unknown or the store rejects the
/// delete.
fn handle_remove_command(
    store: &dyn CatalogStore,
    id: u64,
    assume_yes: bool,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let prompt = format!("Remove entry {id} from the catalog?");
    if !confirm(&prompt, assume_yes || quiet)? {
        if !quiet {
            output.info("Cancelled");
        }
        return Ok(());
    }

    let mut view = CatalogViewState::new();
    let confirmation = session::mutation::delete(store, &mut view, id)?;

    if !quiet {
        output.success(&confirmation.message);
    }
    Ok(())
}

/// Inspect or initialize the configuration file
///
/// # Arguments
/// * `init` - If true, write a default configuration file
/// * `output` - Writer for decorated output
/// * `quiet` - If true, print only the config file path
///
/// # Errors
/// Returns `ShelfrError` if the config file cannot be read or written.
fn handle_config_command(init: bool, output: &dyn OutputWriter, quiet: bool) -> Result<()> {
    let path = ShelfrConfig::config_path()?;

    if init {
        if path.exists() {
            output.warning(&format!("Config already exists at {}", path.display()));
            return Ok(());
        }
        ShelfrConfig::default().save()?;
        if !quiet {
            output.success(&format!("Wrote default config to {}", path.display()));
        }
        return Ok(());
    }

    let config = ShelfrConfig::load()?;
    if quiet {
        println!("{}", path.display());
        return Ok(());
    }

    output.info(&format!("Config file: {}", path.display()));
    output.write(&format!("base_url    = {}", config.base_url));
    output.write(&format!("timeout_ms  = {}", config.timeout_ms));
    output.write(&format!("debounce_ms = {}", config.debounce_ms));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let quiet = cli.quiet;
    let output = StdoutWriter::new();

    let command = cli.get_command();

    if let Commands::Config { init } = command {
        return handle_config_command(init, &output, quiet);
    }

    let mut config = ShelfrConfig::load()?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }

    let store = Arc::new(HttpStore::new(&config.base_url, config.timeout())?);

    match command {
        Commands::Browse => handle_browse_command(store, &config),
        Commands::Search { query } => {
            handle_search_command(store.as_ref(), &query, &output, quiet)
        }
        Commands::Add { title, location } => {
            handle_add_command(store.as_ref(), &title, location, &output, quiet)
        }
        Commands::Update {
            id,
            title,
            location,
        } => handle_update_command(store.as_ref(), id, &title, location, &output, quiet),
        Commands::Remove { id, yes } => {
            handle_remove_command(store.as_ref(), id, yes, &output, quiet)
        }
        Commands::Config { .. } => unreachable!(),
    }
}
