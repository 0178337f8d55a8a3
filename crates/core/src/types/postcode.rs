//! Postal code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Postcode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostcodeError {
    /// The input string is empty.
    #[error("postcode cannot be empty")]
    Empty,
    /// The input is not exactly six digits.
    #[error("postcode must be exactly 6 digits")]
    NotSixDigits,
}

/// A six-digit postal code (PIN code).
///
/// A completed postcode is also the trigger for the address lookup: the
/// lookup adapter only fires once the raw input parses as a `Postcode`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Postcode(String);

impl Postcode {
    /// Parse a `Postcode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly six
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PostcodeError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PostcodeError::Empty);
        }

        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PostcodeError::NotSixDigits);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the postcode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Postcode {
    type Err = PostcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
