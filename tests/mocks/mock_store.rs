use contact_book::error::{StorageError, StorageResult};
use contact_book::models::AddressBook;
use contact_book::storage::AddressBookStore;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Mock address book store for testing.
///
/// Keeps the "stored" book in memory, tracks method calls for verification,
/// and can be told to fail on save.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockStore {
    stored: RefCell<Option<AddressBook>>,
    call_counts: RefCell<HashMap<String, usize>>,
    fail_saves: Cell<bool>,
}

#[allow(dead_code)]
impl MockStore {
    /// Create a new empty MockStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MockStore that already holds `book`.
    pub fn with_book(book: AddressBook) -> Self {
        let store = Self::default();
        *store.stored.borrow_mut() = Some(book);
        store
    }

    /// The book from the last successful save (or the seeded one).
    pub fn stored(&self) -> Option<AddressBook> {
        self.stored.borrow().clone()
    }

    /// Make every following save fail with an I/O error.
    pub fn fail_saves(&self) {
        self.fail_saves.set(true);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        *self.call_counts.borrow().get(method).unwrap_or(&0)
    }

    fn record_call(&self, method: &str) {
        *self
            .call_counts
            .borrow_mut()
            .entry(method.to_string())
            .or_insert(0) += 1;
    }
}

impl AddressBookStore for MockStore {
    fn load(&self) -> AddressBook {
        self.record_call("load");
        self.stored().unwrap_or_default()
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        self.record_call("save");
        if self.fail_saves.get() {
            return Err(StorageError::Io(std::io::Error::other("mock save failure")));
        }
        *self.stored.borrow_mut() = Some(book.clone());
        Ok(())
    }
}
