//! The address book: every contact, keyed by name.

use super::record::Record;
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, info};

/// Default look-ahead window for [`AddressBook::upcoming_birthdays`].
pub const UPCOMING_BIRTHDAY_DAYS: i64 = 7;

/// All contacts, in the order they were first added.
///
/// `add` overwrites an existing entry with the same name; callers that must
/// not clobber a contact check [`AddressBook::contains`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: IndexMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under its name, replacing any previous entry.
    pub fn add(&mut self, record: Record) {
        self.records.insert(record.name().as_str().to_string(), record);
    }

    /// Look up a contact by name.
    pub fn find(&self, name: &str) -> Option<&Record> {
        let record = self.records.get(name);
        if record.is_none() {
            debug!(name, "Contact not found");
        }
        record
    }

    /// Look up a contact by name for modification.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        let record = self.records.get_mut(name);
        if record.is_none() {
            debug!(name, "Contact not found");
        }
        record
    }

    /// Remove a contact, returning it. The order of the others is kept.
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        let removed = self.records.shift_remove(name);
        if removed.is_none() {
            debug!(name, "Contact not found");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Contacts whose birthday falls today or within the next seven days.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<&Record> {
        self.upcoming_birthdays_within(today, UPCOMING_BIRTHDAY_DAYS)
    }

    /// Contacts whose birthday is between 0 and `days` days after `today`,
    /// inclusive, in insertion order. Contacts without a birthday are skipped.
    pub fn upcoming_birthdays_within(&self, today: NaiveDate, days: i64) -> Vec<&Record> {
        let upcoming: Vec<&Record> = self
            .iter()
            .filter(|record| {
                record
                    .birthday()
                    .map(|b| (0..=days).contains(&b.days_until(today)))
                    .unwrap_or(false)
            })
            .collect();

        if upcoming.is_empty() {
            info!(%today, days, "No upcoming birthdays found");
        }
        upcoming
    }
}

impl FromIterator<Record> for AddressBook {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut book = AddressBook::new();
        for record in iter {
            book.add(record);
        }
        book
    }
}

impl fmt::Display for AddressBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.iter().map(Record::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
