//! JSON file storage for the address book.
//!
//! File layout:
//!
//! ```text
//! {
//!   "version": 1,
//!   "contacts": [
//!     { "name": "John", "phones": ["1234567890"], "birthday": "12.06.1990" }
//!   ]
//! }
//! ```
//!
//! Contacts are written in address book order and re-validated on load.

use super::traits::AddressBookStore;
use crate::error::{StorageError, StorageResult};
use crate::models::{AddressBook, Record};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct StoredBookRef<'a> {
    version: u32,
    contacts: Vec<&'a Record>,
}

#[derive(Deserialize)]
struct StoredBook {
    version: u32,
    #[serde(default)]
    contacts: Vec<Record>,
}

/// Address book stored as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the book, `None` when there is nothing stored yet.
    pub fn read(&self) -> StorageResult<Option<AddressBook>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredBook = serde_json::from_str(&text)?;
        if stored.version > FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion(stored.version));
        }

        Ok(Some(stored.contacts.into_iter().collect()))
    }

    /// Atomically write `data` to the store path via a `.tmp` sibling.
    fn atomic_write(&self, data: &[u8]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl AddressBookStore for JsonFileStore {
    fn load(&self) -> AddressBook {
        match self.read() {
            Ok(Some(book)) => {
                info!(path = %self.path.display(), contacts = book.len(), "Address book loaded");
                book
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No saved address book, starting empty");
                AddressBook::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable address book, starting empty");
                AddressBook::new()
            }
        }
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        let stored = StoredBookRef {
            version: FORMAT_VERSION,
            contacts: book.iter().collect(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        self.atomic_write(json.as_bytes())?;

        info!(path = %self.path.display(), contacts = book.len(), "Address book saved");
        Ok(())
    }
}
