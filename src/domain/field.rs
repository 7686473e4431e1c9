//! Shared capability of the validated contact fields.

use std::fmt::Display;

/// A single validated value stored on a contact record.
pub trait Field: Display {
    /// The value as it is shown and stored.
    fn as_str(&self) -> &str;
}

/// Render a list of fields as text separated by `sep`.
pub fn join<F: Field>(fields: &[F], sep: &str) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}
