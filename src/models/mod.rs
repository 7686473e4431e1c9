//! Data models for the contact book.
//!
//! This module contains the core data structures:
//! - `Record`: one contact with its phones and birthday
//! - `AddressBook`: all contacts keyed by name

pub mod address_book;
pub mod record;

pub use address_book::{AddressBook, UPCOMING_BIRTHDAY_DAYS};
pub use record::{PhoneEdit, Record};
