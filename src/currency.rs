//! Fixed-precision currency formatting
//!
//! Amounts are handled as digit strings, never as floats, so nothing is ever
//! rounded. Two input shapes are supported:
//!
//! - a bare digit string, read as minor units (`"123456"` is 1234.56 at
//!   precision 2)
//! - text containing a decimal separator, where the user's own placement of
//!   the separator is trusted and the fraction is truncated to `precision`

use serde::{Deserialize, Serialize};

use crate::card::CardIssuer;
use crate::filter::digits;
use crate::processor::ProcessingResult;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Where the currency symbol is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Prefix,
    Suffix,
}

/// Locale parameters for a currency field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Number of fractional digits
    pub precision: usize,
    pub decimal_separator: char,
    /// Group separator; an empty string disables grouping
    pub thousand_separator: String,
    pub symbol: String,
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            decimal_separator: ',',
            thousand_separator: ".".to_string(),
            symbol: String::new(),
            symbol_position: SymbolPosition::Prefix,
        }
    }
}

impl CurrencyConfig {
    pub fn with_symbol(mut self, symbol: impl Into<String>, position: SymbolPosition) -> Self {
        self.symbol = symbol.into();
        self.symbol_position = position;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_separators(mut self, decimal: char, thousand: impl Into<String>) -> Self {
        self.decimal_separator = decimal;
        self.thousand_separator = thousand.into();
        self
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Format a minor-unit digit string.
///
/// # Examples
///
/// ```
/// use field_mask::currency::{format_currency, CurrencyConfig};
///
/// let config = CurrencyConfig::default();
/// assert_eq!(format_currency("123456", &config), "1.234,56");
/// assert_eq!(format_currency("5", &config), "0,05");
/// assert_eq!(format_currency("", &config), "");
/// ```
pub fn format_currency(raw: &str, config: &CurrencyConfig) -> String {
    match split_minor_units(raw, config.precision) {
        Some((integer, decimal)) => format_parts(&integer, fraction(&decimal, config), config),
        None => String::new(),
    }
}

/// Strip grouping and symbols, leaving a `.`-separated decimal string.
///
/// ```
/// use field_mask::currency::{unformat_currency, CurrencyConfig};
///
/// assert_eq!(unformat_currency("1.234,56", &CurrencyConfig::default()), "1234.56");
/// ```
pub fn unformat_currency(display: &str, config: &CurrencyConfig) -> String {
    let sep = config.decimal_separator;
    let kept: String = display
        .chars()
        .filter(|&c| c.is_ascii_digit() || c == sep)
        .collect();
    kept.replacen(sep, ".", 1)
}

/// Split minor units into integer and decimal digits. Leading zeros are
/// dropped, then the digits are left-padded until there is at least one
/// integer digit. Returns `None` when `raw` carries no digits.
fn split_minor_units(raw: &str, precision: usize) -> Option<(String, String)> {
    let all = digits(raw);
    if all.is_empty() {
        return None;
    }
    let significant = all.trim_start_matches('0');
    let padded = format!("{:0>width$}", significant, width = precision + 1);
    let (integer, decimal) = padded.split_at(padded.len() - precision);
    Some((integer.to_string(), decimal.to_string()))
}

fn fraction<'a>(decimal: &'a str, config: &CurrencyConfig) -> Option<&'a str> {
    (config.precision > 0).then_some(decimal)
}

/// Group an integer part, join the fraction and affix the symbol
pub(crate) fn format_parts(integer: &str, decimal: Option<&str>, config: &CurrencyConfig) -> String {
    let mut body = group_thousands(integer, &config.thousand_separator);
    if let Some(decimal) = decimal {
        body.push(config.decimal_separator);
        body.push_str(decimal);
    }

    if config.symbol.is_empty() {
        return body;
    }
    match config.symbol_position {
        SymbolPosition::Prefix => format!("{}{}", config.symbol, body),
        SymbolPosition::Suffix => format!("{}{}", body, config.symbol),
    }
}

fn group_thousands(integer: &str, separator: &str) -> String {
    let len = integer.chars().count();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// LIVE TYPING
// =============================================================================

/// Process one edit of a currency field.
///
/// `caret` is a character offset into `value`. The returned caret is placed
/// after the output digit that corresponds to the last digit before the
/// input caret, or right after the decimal separator when the user has just
/// typed one.
pub fn process_currency(
    value: &str,
    config: &CurrencyConfig,
    caret: Option<usize>,
    issuer: Option<CardIssuer>,
) -> ProcessingResult {
    let separator = typed_separator(value, config);

    let input_digits = digits(value);
    if input_digits.is_empty() && separator.is_none() {
        return ProcessingResult::empty(issuer);
    }

    // Digits the formatter adds (padding) or removes (leading zeros), which
    // shift the caret's digit count in the minor-unit path.
    let mut digit_shift: isize = 0;

    let (raw, display) = match separator {
        Some(sep) => {
            let mut parts = value.split(sep);
            let integer = digits(parts.next().unwrap_or_default());
            let decimal: String = digits(parts.next().unwrap_or_default())
                .chars()
                .take(config.precision)
                .collect();

            let display = format_parts(&integer, fraction(&decimal, config), config);
            let integer_raw = if integer.is_empty() { "0" } else { integer.as_str() };
            let raw = if decimal.is_empty() {
                integer_raw.to_string()
            } else {
                format!("{}.{}", integer_raw, decimal)
            };
            (raw, display)
        }
        None => {
            let (integer, decimal) =
                split_minor_units(&input_digits, config.precision).unwrap_or_default();
            let display = format_parts(&integer, fraction(&decimal, config), config);
            digit_shift = (integer.len() + decimal.len()) as isize - input_digits.len() as isize;
            let raw = if config.precision > 0 {
                format!("{}.{}", integer, decimal)
            } else {
                integer
            };
            (raw, display)
        }
    };

    let caret = match caret {
        Some(caret) => remap_caret(value, &display, caret, digit_shift, separator, config),
        None => display.chars().count(),
    };

    ProcessingResult {
        value: raw,
        display,
        caret,
        issuer,
    }
}

/// The decimal separator the user typed, if any.
///
/// A fraction longer than `precision` means a digit was appended to an
/// already formatted display, so the text is read as minor units instead.
/// A literal `.` stands in for the separator (stored raw values use it), but
/// when `.` is also the grouping character it only counts once and with a
/// fraction that fits.
fn typed_separator(value: &str, config: &CurrencyConfig) -> Option<char> {
    let fraction_fits = |sep: char| {
        value
            .split(sep)
            .nth(1)
            .is_some_and(|fraction| digits(fraction).len() <= config.precision)
    };

    if value.contains(config.decimal_separator) {
        return fraction_fits(config.decimal_separator).then_some(config.decimal_separator);
    }

    let dot_groups = config.thousand_separator == "." && config.decimal_separator != '.';
    if dot_groups && value.matches('.').count() > 1 {
        return None;
    }
    fraction_fits('.').then_some('.')
}

fn remap_caret(
    value: &str,
    display: &str,
    caret: usize,
    digit_shift: isize,
    separator: Option<char>,
    config: &CurrencyConfig,
) -> usize {
    let just_typed_separator = caret > 0
        && separator.is_some()
        && value.chars().nth(caret - 1) == separator;
    if just_typed_separator {
        if let Some(idx) = display.chars().position(|c| c == config.decimal_separator) {
            return idx + 1;
        }
    }

    let before = value.chars().take(caret).filter(char::is_ascii_digit).count();
    let target = (before as isize + digit_shift).max(0) as usize;

    if target == 0 {
        return display.chars().position(|c| c.is_ascii_digit()).unwrap_or(0);
    }

    let mut seen = 0;
    for (i, c) in display.chars().enumerate() {
        if c.is_ascii_digit() {
            seen += 1;
            if seen == target {
                return i + 1;
            }
        }
    }
    display.chars().count()
}
