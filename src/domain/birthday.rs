//! Birthday value object.

use super::errors::ValidationError;
use super::field::Field;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Input and display format of birthdays.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// A contact's birthday.
///
/// The full date is kept for display and storage, but birthdays compare by
/// month and day only. "How far away is it" questions are answered by
/// anchoring the month and day onto the year of the reference date at query
/// time, so the answer stays correct when the calendar year rolls over.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use contact_book::domain::Birthday;
///
/// let birthday = Birthday::new("12.06.1990").unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert_eq!(birthday.days_until(today), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Birthday {
    date: NaiveDate,
    text: String,
}

impl Birthday {
    /// Parse a birthday written as `DD.MM.YYYY`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBirthday` if the input does not match
    /// the format or does not name a real calendar date.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        let date = NaiveDate::parse_from_str(value.trim(), BIRTHDAY_FORMAT)
            .map_err(|_| ValidationError::InvalidBirthday(value.to_string()))?;
        Ok(Self::from_date(date))
    }

    /// Build a birthday from an already validated date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            text: date.format(BIRTHDAY_FORMAT).to_string(),
        }
    }

    /// The date as originally entered (including the birth year).
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Get the birthday as `DD.MM.YYYY`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The birthday's month and day placed in `year`.
    ///
    /// 29 February falls on 28 February in non-leap years.
    pub fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .expect("28 February exists in every year")
    }

    /// The first date on or after `today` on which this birthday falls.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let this_year = self.in_year(today.year());
        if this_year >= today {
            this_year
        } else {
            self.in_year(today.year() + 1)
        }
    }

    /// Number of days from `today` until the next occurrence, 0 when it is today.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_occurrence(today) - today).num_days()
    }
}

impl PartialEq for Birthday {
    fn eq(&self, other: &Self) -> bool {
        (self.month(), self.day()) == (other.month(), other.day())
    }
}

impl Eq for Birthday {}

impl Hash for Birthday {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.month(), self.day()).hash(state);
    }
}

impl Field for Birthday {
    fn as_str(&self) -> &str {
        &self.text
    }
}

// Serde support - serialize as DD.MM.YYYY
impl Serialize for Birthday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.text.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for Birthday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Birthday::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
