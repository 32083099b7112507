//! Payment card issuer classification by BIN prefix

use serde::{Deserialize, Serialize};

use crate::filter::digits;

/// Card networks the classifier knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardIssuer {
    Visa,
    Mastercard,
    Amex,
    Troy,
    Unknown,
}

impl CardIssuer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Troy => "troy",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CardIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a (possibly formatted, possibly partial) card number.
///
/// Precedence: Visa, Mastercard, Amex, Troy.
///
/// ```
/// use field_mask::card::{classify, CardIssuer};
///
/// assert_eq!(classify("4111 1111"), CardIssuer::Visa);
/// assert_eq!(classify("2720 99"), CardIssuer::Mastercard);
/// assert_eq!(classify("3712"), CardIssuer::Amex);
/// ```
pub fn classify(number: &str) -> CardIssuer {
    let number = digits(number);

    if number.starts_with('4') {
        CardIssuer::Visa
    } else if is_mastercard(&number) {
        CardIssuer::Mastercard
    } else if number.starts_with("34") || number.starts_with("37") {
        CardIssuer::Amex
    } else if number.starts_with("9792") {
        CardIssuer::Troy
    } else {
        CardIssuer::Unknown
    }
}

/// Whether a number starts with an American Express prefix
pub fn is_amex(number: &str) -> bool {
    classify(number) == CardIssuer::Amex
}

/// `51`–`55`, or the 2-series BIN range 222100–272099
fn is_mastercard(number: &str) -> bool {
    let prefix = |len: usize| number.get(..len).and_then(|p| p.parse::<u32>().ok());

    matches!(prefix(2), Some(51..=55)) || matches!(prefix(4), Some(2221..=2720))
}
