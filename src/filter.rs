//! Character filtering by allow/deny classes
//!
//! Every other transform in the crate funnels its input through [`clean`]
//! before doing positional work, so the classes here decide what counts as
//! "data" for a field.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

// =============================================================================
// CHARACTER CLASSES
// =============================================================================

/// A set of characters, tested one character at a time.
///
/// Serialized as a string: the keywords `digit`, `letter`, `alphanumeric` and
/// `any`, or otherwise a regular expression such as `[a-zA-Z0-9@._+-]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharClass {
    /// ASCII digits `0-9`
    Digit,
    /// ASCII letters `a-z`, `A-Z`
    Letter,
    /// ASCII letters and digits
    Alphanumeric,
    /// Every character
    Any,
    /// Characters matched by a regular expression
    Pattern(Regex),
}

impl CharClass {
    /// Compile a regex-backed class
    pub fn pattern(pattern: &str) -> Result<Self, FieldError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| FieldError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Check whether a single character belongs to the class
    pub fn matches(&self, c: char) -> bool {
        match self {
            Self::Digit => c.is_ascii_digit(),
            Self::Letter => c.is_ascii_alphabetic(),
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
            Self::Any => true,
            Self::Pattern(re) => {
                let mut buf = [0u8; 4];
                re.is_match(c.encode_utf8(&mut buf))
            }
        }
    }
}

impl PartialEq for CharClass {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Digit, Self::Digit)
            | (Self::Letter, Self::Letter)
            | (Self::Alphanumeric, Self::Alphanumeric)
            | (Self::Any, Self::Any) => true,
            _ => false,
        }
    }
}

impl TryFrom<String> for CharClass {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "digit" => Ok(Self::Digit),
            "letter" => Ok(Self::Letter),
            "alphanumeric" => Ok(Self::Alphanumeric),
            "any" => Ok(Self::Any),
            other => Self::pattern(other),
        }
    }
}

impl From<CharClass> for String {
    fn from(class: CharClass) -> Self {
        match class {
            CharClass::Digit => "digit".to_string(),
            CharClass::Letter => "letter".to_string(),
            CharClass::Alphanumeric => "alphanumeric".to_string(),
            CharClass::Any => "any".to_string(),
            CharClass::Pattern(re) => re.as_str().to_string(),
        }
    }
}

// =============================================================================
// FILTERING
// =============================================================================

/// Remove forbidden characters, then keep only allowed ones, preserving order.
///
/// # Examples
///
/// ```
/// use field_mask::filter::{clean, CharClass};
///
/// assert_eq!(clean("abc123", Some(&CharClass::Digit), None), "123");
/// assert_eq!(clean("abc123", None, Some(&CharClass::Letter)), "123");
/// ```
pub fn clean(value: &str, allowed: Option<&CharClass>, forbidden: Option<&CharClass>) -> String {
    value
        .chars()
        .filter(|&c| !forbidden.is_some_and(|f| f.matches(c)))
        .filter(|&c| allowed.is_none_or(|a| a.matches(c)))
        .collect()
}

/// Keep only ASCII digits
pub fn digits(value: &str) -> String {
    clean(value, Some(&CharClass::Digit), None)
}
