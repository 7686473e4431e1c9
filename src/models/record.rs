//! A single contact: a name, its phone numbers and an optional birthday.

use crate::domain::{field, Birthday, Name, Phone, ValidationError};
use crate::error::{BookError, BookResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Outcome of [`Record::edit_phone`].
///
/// Editing never fails hard: a missing old number or an invalid new one is
/// reported back and the phone list is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneEdit {
    /// The first matching phone was replaced in place.
    Replaced,
    /// No stored phone matched the old number.
    NotFound,
    /// The new number failed validation.
    Rejected(ValidationError),
}

/// One contact in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,

    #[serde(default)]
    phones: Vec<Phone>,

    #[serde(default)]
    birthday: Option<Birthday>,
}

impl Record {
    /// Create a contact with no phones and no birthday.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
        }
    }

    /// Create a contact from a raw name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for blank names.
    pub fn with_name(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::new(Name::new(name)?))
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validate `raw` and append it to the phone list.
    ///
    /// An invalid number is logged and skipped rather than returned as an
    /// error. Returns whether the phone was added. Duplicates are allowed.
    pub fn add_phone(&mut self, raw: &str) -> bool {
        match Phone::new(raw) {
            Ok(phone) => {
                self.phones.push(phone);
                true
            }
            Err(e) => {
                warn!(contact = %self.name, error = %e, "Phone not added");
                false
            }
        }
    }

    /// Remove every stored phone equal to `raw`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `BookError::PhoneNotFound` if no stored phone matches.
    pub fn remove_phone(&mut self, raw: &str) -> BookResult<usize> {
        let before = self.phones.len();
        self.phones.retain(|p| p.as_str() != raw);
        let removed = before - self.phones.len();

        if removed == 0 {
            return Err(BookError::PhoneNotFound {
                name: self.name.to_string(),
                phone: raw.to_string(),
            });
        }
        Ok(removed)
    }

    /// Replace the first phone equal to `old_raw` with `new_raw`, keeping its position.
    pub fn edit_phone(&mut self, old_raw: &str, new_raw: &str) -> PhoneEdit {
        let Some(index) = self.phones.iter().position(|p| p.as_str() == old_raw) else {
            debug!(contact = %self.name, phone = old_raw, "No such phone number found");
            return PhoneEdit::NotFound;
        };

        match Phone::new(new_raw) {
            Ok(phone) => {
                self.phones[index] = phone;
                PhoneEdit::Replaced
            }
            Err(e) => {
                warn!(contact = %self.name, error = %e, "Phone not changed");
                PhoneEdit::Rejected(e)
            }
        }
    }

    /// Look up a stored phone equal to `raw`.
    ///
    /// Malformed input can never be stored, so it simply yields `None`.
    pub fn find_phone(&self, raw: &str) -> Option<&Phone> {
        let wanted = Phone::new(raw).ok()?;
        self.phones.iter().find(|p| **p == wanted)
    }

    /// Parse and set the birthday, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Unlike phone edits, a malformed birthday is returned to the caller.
    pub fn add_birthday(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.birthday = Some(Birthday::new(raw)?);
        Ok(())
    }

    /// The phones joined with `", "`.
    pub fn phones_display(&self) -> String {
        field::join(&self.phones, ", ")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = if self.phones.is_empty() {
            "-".to_string()
        } else {
            self.phones_display()
        };
        let birthday = self.birthday.as_ref().map_or("-", |b| b.as_str());

        write!(
            f,
            "Contact name: {}, phones: {}, birthday: {}",
            self.name, phones, birthday
        )
    }
}
