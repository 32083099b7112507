//! Input processor
//!
//! One call per edit event: the UI layer passes the element's new text, the
//! caret (a character offset), and the display text it rendered last time.
//! The processor picks a mode from the field configuration and returns the
//! new display text, the raw value to store and where the caret belongs.
//!
//! Mode precedence, first match wins:
//! 1. slug (`slug_format`)
//! 2. currency (`currency` set)
//! 3. mask (`mask` set)
//! 4. generic filter + case transform
//!
//! The processor is pure: nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::card::{classify, CardIssuer};
use crate::config::FieldConfig;
use crate::currency::{process_currency, SymbolPosition};
use crate::error::{FieldError, Result};
use crate::filter::{clean, digits};
use crate::mask::{apply_mask, dominant_class, is_slot, strip_mask};
use crate::slug::slugify;

// =============================================================================
// RESULT
// =============================================================================

/// Outcome of processing one edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Canonical value to store
    pub value: String,
    /// Text to show in the input element
    pub display: String,
    /// Character offset into `display`
    pub caret: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<CardIssuer>,
}

impl ProcessingResult {
    pub fn empty(issuer: Option<CardIssuer>) -> Self {
        Self {
            issuer,
            ..Self::default()
        }
    }

    /// A result whose caret sits at the end of the display
    pub fn at_end(value: String, display: String, issuer: Option<CardIssuer>) -> Self {
        let caret = display.chars().count();
        Self {
            value,
            display,
            caret,
            issuer,
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Processing mode selected by a field configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Slug,
    Currency,
    Mask,
    Generic,
}

impl Mode {
    pub fn for_config(config: &FieldConfig) -> Self {
        if config.slug_format {
            Self::Slug
        } else if config.currency.is_some() {
            Self::Currency
        } else if config.mask.is_some() {
            Self::Mask
        } else {
            Self::Generic
        }
    }
}

/// Process one edit of a field.
///
/// # Examples
///
/// ```
/// use field_mask::config::Preset;
/// use field_mask::processor::process_input;
///
/// let result = process_input("5551234567", &Preset::Phone.config(), None, "").unwrap();
/// assert_eq!(result.display, "(555) 123 45 67");
/// assert_eq!(result.value, "5551234567");
/// ```
pub fn process_input(
    text: &str,
    config: &FieldConfig,
    caret: Option<usize>,
    previous: &str,
) -> Result<ProcessingResult> {
    let mode = Mode::for_config(config);
    let issuer = config.notify_issuer.then(|| classify(text));
    trace!(?mode, len = text.chars().count(), ?caret, "processing input");

    let result = match (mode, &config.currency) {
        (Mode::Slug, _) => process_slug(text, issuer),
        (Mode::Currency, Some(currency)) => process_currency(text, currency, caret, issuer),
        (Mode::Mask, _) => process_mask(text, config, caret, previous, issuer)?,
        _ => process_generic(text, config, caret, issuer),
    };

    debug!(
        ?mode,
        display_len = result.display.chars().count(),
        caret = result.caret,
        "processed input"
    );
    Ok(result)
}

/// Turn a stored value back into its display form, e.g. when the value is
/// set from outside the input element. The caret lands at the end.
pub fn render_stored(raw: &str, config: &FieldConfig) -> Result<ProcessingResult> {
    process_input(raw, config, None, "")
}

/// Backspace pressed with the caret at the very end of a suffix-currency
/// field. The caret would otherwise sit after the symbol and delete nothing,
/// so the last digit is dropped instead and the rest reformatted.
///
/// Returns `None` for every other kind of field; the UI layer should let the
/// key through unchanged.
pub fn backspace_at_end(display: &str, config: &FieldConfig) -> Option<ProcessingResult> {
    let currency = config
        .currency
        .as_ref()
        .filter(|c| c.symbol_position == SymbolPosition::Suffix)?;

    let mut remaining = digits(display);
    remaining.pop();
    let issuer = config.notify_issuer.then(|| classify(&remaining));
    Some(process_currency(&remaining, currency, None, issuer))
}

// =============================================================================
// SLUG
// =============================================================================

pub fn process_slug(text: &str, issuer: Option<CardIssuer>) -> ProcessingResult {
    let slug = slugify(text);
    ProcessingResult::at_end(slug.clone(), slug, issuer)
}

// =============================================================================
// MASK
// =============================================================================

/// Mask mode.
///
/// The caret is tracked as a count of data characters: the number of
/// allowed characters before it in the input text. After masking, it is
/// placed after the same number of slots in the output (and after any
/// literal that directly follows them).
///
/// When the edit shortened the text but left the data unchanged, the user
/// deleted a literal. The data character in front of the caret is removed
/// instead, so backspacing over a separator still deletes a digit.
pub fn process_mask(
    text: &str,
    config: &FieldConfig,
    caret: Option<usize>,
    previous: &str,
    issuer: Option<CardIssuer>,
) -> Result<ProcessingResult> {
    let mask = config.mask.as_deref().ok_or(FieldError::MissingMask)?;

    let fallback;
    let allowed = match &config.allowed {
        Some(class) => class,
        None => {
            fallback = dominant_class(mask);
            &fallback
        }
    };
    let forbidden = config.forbidden.as_ref();
    let filter = |s: &str| clean(s, Some(allowed), forbidden);

    let prefix = config.display_prefix.as_deref().unwrap_or_default();
    let prefix_len = prefix.chars().count();
    let (text, caret) = match text.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() => (rest, caret.map(|c| c.saturating_sub(prefix_len))),
        _ => (text, caret),
    };
    let previous = previous.strip_prefix(prefix).unwrap_or(previous);

    let mut data_before = caret.map_or(0, |c| filter(&take_chars(text, c)).chars().count());
    let mut data: Vec<char> = config.transform.apply(&filter(text)).chars().collect();

    let deleted_literal = caret.is_some()
        && !previous.is_empty()
        && text.chars().count() < previous.chars().count()
        && data.iter().copied().eq(filter(previous).chars());
    if deleted_literal && (1..=data.len()).contains(&data_before) {
        trace!(data_before, "deletion removed only a literal, dropping data char");
        data.remove(data_before - 1);
        data_before -= 1;
    }

    let data: String = data.into_iter().collect();
    let masked = apply_mask(&data, mask);
    let value = strip_mask(&masked, mask);
    let display = format!("{}{}", prefix, masked);

    let caret = match caret {
        Some(_) => prefix_len + mask_caret(&masked, mask, data_before),
        None => display.chars().count(),
    };

    Ok(ProcessingResult {
        value,
        display,
        caret,
        issuer,
    })
}

/// Caret position in `masked` after `target` data characters
fn mask_caret(masked: &str, mask: &str, target: usize) -> usize {
    let mut position = 0;
    let mut seen = 0;

    for (i, m) in mask.chars().take(masked.chars().count()).enumerate() {
        if is_slot(m) {
            seen += 1;
            if seen <= target {
                position = i + 1;
            }
        } else if seen == target {
            position = i + 1;
        }
        if seen > target {
            break;
        }
    }

    position
}

fn take_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

// =============================================================================
// GENERIC
// =============================================================================

/// Filter + case transform.
///
/// The stored value is the filtered text before the transform; the display
/// carries the transform. In alpha format, whitespace runs collapse to a
/// single space and the stored value is trimmed.
pub fn process_generic(
    text: &str,
    config: &FieldConfig,
    caret: Option<usize>,
    issuer: Option<CardIssuer>,
) -> ProcessingResult {
    let filter = |s: &str| {
        let cleaned = clean(s, config.allowed.as_ref(), config.forbidden.as_ref());
        if config.alpha_format {
            collapse_whitespace(&cleaned)
        } else {
            cleaned
        }
    };

    let cleaned = filter(text);
    let display = config.transform.apply(&cleaned);
    let display_len = display.chars().count();
    let value = if config.alpha_format {
        cleaned.trim().to_string()
    } else {
        cleaned
    };

    let caret = match caret {
        Some(c) => filter(&take_chars(text, c)).chars().count().min(display_len),
        None => display_len,
    };

    ProcessingResult {
        value,
        display,
        caret,
        issuer,
    }
}

fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_whitespace() {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}
