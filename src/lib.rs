//! Contact Book - an interactive command-line address book.
//!
//! Keeps names, phone numbers, and birthdays, and tells you whose birthday
//! is coming up in the next week.
//!
//! # Architecture
//!
//! - **domain**: Validated values (`Name`, `Phone`, `Birthday`)
//! - **models**: `Record` (one contact) and `AddressBook` (all contacts)
//! - **commands**: Input parsing and the command handlers
//! - **repl**: The read-eval-print loop
//! - **storage**: Loading and saving the address book
//! - **config**: Configuration from environment variables
//! - **error**: Custom error types for precise error handling

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repl;
pub mod storage;

pub use commands::{execute, Command, CommandContext, Outcome};
pub use config::Config;
pub use domain::{Birthday, Field, Name, Phone, ValidationError};
pub use error::{BookError, ConfigError, SessionError, StorageError};
pub use models::{AddressBook, PhoneEdit, Record};
pub use repl::Repl;
pub use storage::{AddressBookStore, JsonFileStore};
