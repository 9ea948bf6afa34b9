//! Validated text fields shared by employee and task records.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for short text fields, matching the `VARCHAR(255)` columns.
const MAX_TEXT_LENGTH: usize = 255;

fn normalize(
    raw: String,
    field: &'static str,
    empty_error: TrackerDomainError,
) -> Result<String, TrackerDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty_error);
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(TrackerDomainError::TextTooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(trimmed.to_owned())
}

macro_rules! validated_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $empty:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a validated value.
            ///
            /// The input is trimmed before validation.
            ///
            /// # Errors
            ///
            /// Returns a [`TrackerDomainError`] when the value is empty after
            /// trimming or longer than 255 characters.
            pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
                normalize(value.into(), $field, $empty).map(Self)
            }

            /// Returns the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TrackerDomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_text!(
    /// Employee full name as shown in recommendations.
    FullName,
    "full name",
    TrackerDomainError::EmptyFullName
);

validated_text!(
    /// Employee job position.
    Position,
    "position",
    TrackerDomainError::EmptyPosition
);

validated_text!(
    /// Human-readable task name.
    TaskName,
    "task name",
    TrackerDomainError::EmptyTaskName
);
