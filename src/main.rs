//! Contact Book - Main entry point
//!
//! Loads the address book, runs the interactive assistant on stdin/stdout,
//! and saves the book when the session ends.

use anyhow::Result;
use contact_book::{Config, JsonFileStore, Repl};
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize logging (stderr only, stdout is the conversation with the user)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("Using address book at {}", config.book_path.display());

    let store = JsonFileStore::new(&config.book_path);
    let repl = Repl::new(&store).with_birthday_window(config.birthday_window_days);

    let stdin = io::stdin();
    if let Err(e) = repl.run(stdin.lock(), io::stdout()) {
        error!("Failed to finish session: {}", e);
        return Err(e.into());
    }

    info!("Contact book shutdown complete");
    Ok(())
}
