//! Mask pattern engine
//!
//! A mask is a template where `9` is a digit slot, `a`/`A` a letter slot and
//! `*` an any-character slot. Every other character is a literal that shows up
//! verbatim in the formatted output.
//!
//! ```
//! use field_mask::mask::{apply_mask, strip_mask};
//!
//! let masked = apply_mask("5551234567", "(999) 999 99 99");
//! assert_eq!(masked, "(555) 123 45 67");
//! assert_eq!(strip_mask(&masked, "(999) 999 99 99"), "5551234567");
//! ```

use crate::filter::{clean, CharClass};

/// The kind of data a mask slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Digit,
    Letter,
    Any,
}

impl SlotKind {
    /// Classify a mask character; `None` means the character is a literal
    pub fn from_mask_char(c: char) -> Option<Self> {
        match c {
            '9' => Some(Self::Digit),
            'a' | 'A' => Some(Self::Letter),
            '*' => Some(Self::Any),
            _ => None,
        }
    }

    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Digit => c.is_ascii_digit(),
            Self::Letter => c.is_ascii_alphabetic(),
            Self::Any => true,
        }
    }
}

/// Whether a mask character is a data slot
pub fn is_slot(c: char) -> bool {
    SlotKind::from_mask_char(c).is_some()
}

/// Number of data slots, i.e. the longest raw value the mask can hold
pub fn capacity(mask: &str) -> usize {
    mask.chars().filter(|&c| is_slot(c)).count()
}

/// The single class used when positional correspondence does not matter:
/// digits if the mask has a digit slot, else letters if it has a letter
/// slot, else alphanumerics.
pub fn dominant_class(mask: &str) -> CharClass {
    if mask.contains('9') {
        CharClass::Digit
    } else if mask.contains(['a', 'A']) {
        CharClass::Letter
    } else {
        CharClass::Alphanumeric
    }
}

/// Fill the mask's slots from `raw`.
///
/// A raw character that does not fit its slot is dropped and the same slot is
/// tried again with the next character. Literals are emitted as they come; a
/// raw character equal to the literal is consumed with it, so an already
/// formatted string can be fed back in unchanged. Output stops as soon as the
/// raw input runs out.
pub fn apply_mask(raw: &str, mask: &str) -> String {
    let mut out = String::with_capacity(mask.len());
    let mut input = raw.chars().peekable();

    'mask: for m in mask.chars() {
        match SlotKind::from_mask_char(m) {
            Some(slot) => loop {
                match input.next() {
                    None => break 'mask,
                    Some(c) if slot.accepts(c) => {
                        out.push(c);
                        break;
                    }
                    Some(_) => {}
                }
            },
            None => {
                let Some(&next) = input.peek() else {
                    break;
                };
                out.push(m);
                if next == m {
                    input.next();
                }
            }
        }
    }

    out
}

/// Recover the raw data from a string produced by [`apply_mask`].
///
/// Walks mask and display together: a slot takes the display character, a
/// matching literal is skipped, and anything else ends the walk.
pub fn strip_mask(display: &str, mask: &str) -> String {
    let mut out = String::with_capacity(display.len());
    let mut input = display.chars().peekable();

    for m in mask.chars() {
        let Some(&c) = input.peek() else {
            break;
        };
        if is_slot(m) {
            out.push(c);
            input.next();
        } else if c == m {
            input.next();
        } else {
            break;
        }
    }

    out
}

/// Loose extraction: keep only characters of the mask's dominant class
pub fn unmask(display: &str, mask: &str) -> String {
    clean(display, Some(&dominant_class(mask)), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "(999) 999 99 99";

    #[test]
    fn test_apply_phone() {
        assert_eq!(apply_mask("5551234567", PHONE), "(555) 123 45 67");
    }

    #[test]
    fn test_apply_partial() {
        assert_eq!(apply_mask("1205", "99/99/9999"), "12/05");
    }

    #[test]
    fn test_apply_letter_slots() {
        assert_eq!(apply_mask("AB12", "AA-99"), "AB-12");
        assert_eq!(apply_mask("ab12", "aa-99"), "ab-12");
    }

    #[test]
    fn test_apply_leading_literal() {
        assert_eq!(apply_mask("555", "(999)"), "(555");
    }

    #[test]
    fn test_apply_skips_invalid_chars() {
        assert_eq!(apply_mask("5x5y5", "999"), "555");
        assert_eq!(apply_mask("xyz", "999"), "");
    }

    #[test]
    fn test_apply_refeeds_formatted_text() {
        assert_eq!(apply_mask("(555) 123 45 67", PHONE), "(555) 123 45 67");
        assert_eq!(apply_mask("(555) 12", PHONE), "(555) 12");
    }

    #[test]
    fn test_apply_truncates_at_capacity() {
        assert_eq!(apply_mask("123456", "99/99"), "12/34");
    }

    #[test]
    fn test_apply_any_slot() {
        assert_eq!(apply_mask("a1!", "*-*-*"), "a-1-!");
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip_mask("(555) 123", "(999) 999"), "555123");
        assert_eq!(strip_mask("(555) 123 45 67", PHONE), "5551234567");
    }

    #[test]
    fn test_strip_letter_slots() {
        assert_eq!(strip_mask("AB-12", "AA-99"), "AB12");
    }

    #[test]
    fn test_strip_stops_on_literal_mismatch() {
        assert_eq!(strip_mask("555", PHONE), "");
        assert_eq!(strip_mask("(555)-123", PHONE), "555");
    }

    #[test]
    fn test_unmask() {
        assert_eq!(unmask("(555) 123 45 67", PHONE), "5551234567");
        assert_eq!(unmask("AB-12", "AA-AA"), "AB");
        assert_eq!(unmask("x-1_y", "*-*"), "x1y");
    }

    #[test]
    fn test_capacity_and_class() {
        assert_eq!(capacity(PHONE), 10);
        assert_eq!(capacity("AA-99"), 4);
        assert_eq!(dominant_class("AA-99"), CharClass::Digit);
        assert_eq!(dominant_class("AA-AA"), CharClass::Letter);
        assert_eq!(dominant_class("**"), CharClass::Alphanumeric);
    }
}
