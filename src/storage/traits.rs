use crate::error::StorageResult;
use crate::models::AddressBook;

/// Durable storage for the address book.
///
/// Abstracts over where the book lives, enabling different
/// implementations (JSON file, in-memory mock).
pub trait AddressBookStore {
    /// Load the stored book.
    ///
    /// Never fails: a missing, empty, or unreadable store yields an empty book.
    fn load(&self) -> AddressBook;

    /// Replace the stored book with `book`.
    fn save(&self, book: &AddressBook) -> StorageResult<()>;
}
