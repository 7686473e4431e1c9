//! Persistence for the address book.
//!
//! The command loop only sees the [`AddressBookStore`] trait; the binary
//! wires in a [`JsonFileStore`].

pub mod json_file_store;
pub mod traits;

pub use json_file_store::{JsonFileStore, FORMAT_VERSION};
pub use traits::AddressBookStore;
