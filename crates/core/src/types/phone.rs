//! Phone number type.
//!
//! Checkout contact numbers arrive in many formats ("(555) 123-4567",
//! "+1 555 123 4567"). This type normalizes them to their digits and
//! validates the digit count.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string contains no digits.
    #[error("phone number cannot be empty")]
    Empty,
    /// The digit count is outside the accepted range.
    #[error("phone number must contain {min}-{max} digits, got {got}")]
    InvalidLength {
        /// Minimum accepted digit count.
        min: usize,
        /// Maximum accepted digit count.
        max: usize,
        /// Digit count of the input.
        got: usize,
    },
}

/// A phone number, stored as its digits only.
///
/// Parsing strips every non-digit character (spaces, dashes, parentheses,
/// a leading `+`) and requires 10-15 digits to remain.
///
/// ## Examples
///
/// ```
/// use juniper_goods_core::Phone;
///
/// let phone = Phone::parse("(555) 123-4567").unwrap();
/// assert_eq!(phone.as_str(), "5551234567");
///
/// assert!(Phone::parse("12345").is_err());   // too short
/// assert!(Phone::parse("no digits").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 10;
    /// Maximum number of digits (ITU-T E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string, stripping non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input contains no digits, or if the digit
    /// count falls outside 10-15.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                got: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// Returns the normalized digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner digit string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_formatting() {
        let phone = Phone::parse("+1 (555) 123-4567").expect("should parse");
        assert_eq!(phone.as_str(), "15551234567");
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(Phone::parse("5551234567").expect("valid").as_str(), "5551234567");
    }

    #[test]
    fn test_no_digits() {
        assert!(matches!(Phone::parse("call me"), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            Phone::parse("555-1234"),
            Err(PhoneError::InvalidLength { got: 7, .. })
        ));
    }

    #[test]
    fn test_too_long() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::InvalidLength { got: 16, .. })
        ));
    }

    #[test]
    fn test_boundaries() {
        assert!(Phone::parse("1234567890").is_ok()); // 10 digits
        assert!(Phone::parse("123456789012345").is_ok()); // 15 digits
    }
}
