//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors raised while executing a command against the address book.
///
/// None of these end the session: the command loop turns every one of them
/// into a single line of text via [`BookError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Malformed name, phone, or birthday
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No contact with this name
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// The contact exists but does not have this phone
    #[error("Phone number {phone} not found for {name}")]
    PhoneNotFound { name: String, phone: String },

    /// Command called with the wrong number of arguments
    #[error("'{command}' expects {expected} argument(s), got {got}")]
    ArgumentCount {
        command: String,
        expected: usize,
        got: usize,
    },
}

impl BookError {
    /// The line printed back to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => format!(
                "You did not specify a name, phone number, or date of birth correctly: {}",
                e
            ),
            Self::NotFound(_) | Self::PhoneNotFound { .. } => self.to_string(),
            Self::ArgumentCount { .. } => format!("Wrong number of arguments: {}", self),
        }
    }
}

/// Errors that can occur while reading or writing the address book file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode the stored book
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File written by a newer, unknown format
    #[error("Unsupported address book format version: {0}")]
    UnsupportedVersion(u32),
}

/// Errors that end an interactive session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading input or writing output failed
    #[error("Terminal I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// The address book could not be saved
    #[error("Failed to save address book: {0}")]
    Storage(#[from] StorageError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with BookError
pub type BookResult<T> = Result<T, BookError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with SessionError
pub type SessionResult<T> = Result<T, SessionError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookError::NotFound("John".to_string());
        assert_eq!(err.to_string(), "Contact not found: John");

        let err = BookError::PhoneNotFound {
            name: "John".to_string(),
            phone: "1234567890".to_string(),
        };
        assert_eq!(err.to_string(), "Phone number 1234567890 not found for John");

        let err = ConfigError::InvalidValue {
            var: "BIRTHDAY_WINDOW_DAYS".to_string(),
            reason: "Must be a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for BIRTHDAY_WINDOW_DAYS: Must be a number"
        );

        let err = StorageError::UnsupportedVersion(9);
        assert!(err.to_string().contains('9'));

        let err = SessionError::from(StorageError::UnsupportedVersion(9));
        assert!(err.to_string().starts_with("Failed to save address book"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: BookError = ValidationError::EmptyName.into();
        assert_eq!(err, BookError::Validation(ValidationError::EmptyName));
        assert!(err.user_message().contains("Name cannot be empty"));
    }

    #[test]
    fn test_argument_count_message() {
        let err = BookError::ArgumentCount {
            command: "add".to_string(),
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.user_message(),
            "Wrong number of arguments: 'add' expects 2 argument(s), got 1"
        );
    }
}
