//! Scheme type with syntax validation.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::SchemeError;

/// A validated URI scheme.
///
/// A scheme is either a token matching `[A-Za-z][A-Za-z0-9+.-]*` or the empty
/// string. The empty scheme is not part of RFC 3986; it marks a
/// scheme-relative reference such as `://host/path`, which takes its scheme
/// from the base it is composed with.
///
/// # Examples
///
/// ```
/// use uri_trail::Scheme;
///
/// let scheme = Scheme::parse("s-c+h.eme").unwrap();
/// assert_eq!(scheme.as_str(), "s-c+h.eme");
///
/// assert!(Scheme::parse("").unwrap().is_empty());
/// assert!(Scheme::parse("/test:").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Scheme(String);

impl Scheme {
    /// Parses a scheme, accepting the empty string.
    ///
    /// # Errors
    ///
    /// Returns `SchemeError` if a non-empty input does not start with a letter
    /// or contains a character other than letters, digits, `+`, `-` and `.`.
    pub fn parse(input: &str) -> Result<Self, SchemeError> {
        Self::validate(input)?;
        Ok(Self(input.to_string()))
    }

    /// The empty scheme used by scheme-relative references.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns the scheme as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty scheme.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `input` would be accepted by [`Scheme::parse`] and is
    /// not empty.
    #[must_use]
    pub fn is_valid(input: &str) -> bool {
        !input.is_empty() && Self::validate(input).is_ok()
    }

    /// Returns true if the character may follow the first letter.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
    }

    fn validate(input: &str) -> Result<(), SchemeError> {
        let mut chars = input.chars();
        let Some(first) = chars.next() else {
            return Ok(());
        };
        if !first.is_ascii_alphabetic() {
            return Err(SchemeError::MustStartWithLetter { found: first });
        }
        for (i, c) in chars.enumerate() {
            if !Self::is_valid_char(c) {
                return Err(SchemeError::InvalidChar {
                    char: c,
                    position: i + 1,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Scheme {
    type Error = SchemeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for Scheme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Scheme {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_scheme() {
        let scheme = Scheme::parse("https").unwrap();
        assert_eq!(scheme.as_str(), "https");
        assert!(!scheme.is_empty());
    }

    #[test]
    fn parse_scheme_with_symbols() {
        let scheme = Scheme::parse("s-c+h.eme").unwrap();
        assert_eq!(scheme.as_str(), "s-c+h.eme");
    }

    #[test]
    fn parse_mixed_case_keeps_case() {
        let scheme = Scheme::parse("HtTp").unwrap();
        assert_eq!(scheme.as_str(), "HtTp");
    }

    #[test]
    fn parse_empty_is_scheme_relative() {
        let scheme = Scheme::parse("").unwrap();
        assert!(scheme.is_empty());
        assert_eq!(scheme, Scheme::empty());
    }

    #[test]
    fn parse_leading_slash_fails() {
        let result = Scheme::parse("/test:");
        assert!(matches!(result, Err(SchemeError::MustStartWithLetter { found: '/' })));
    }

    #[test]
    fn parse_leading_digit_fails() {
        let result = Scheme::parse("1abc");
        assert!(matches!(result, Err(SchemeError::MustStartWithLetter { found: '1' })));
    }

    #[test]
    fn parse_invalid_char_fails() {
        let result = Scheme::parse("ab_c");
        assert!(matches!(result, Err(SchemeError::InvalidChar { char: '_', position: 2 })));
    }

    #[test]
    fn is_valid_rejects_empty() {
        assert!(!Scheme::is_valid(""));
        assert!(Scheme::is_valid("a"));
        assert!(!Scheme::is_valid("a:b"));
    }
}
