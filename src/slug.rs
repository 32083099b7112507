//! URL-safe slug generation for username fields
//!
//! Performs:
//! - Unicode NFD decomposition
//! - Combining mark removal (`ö` becomes `o`)
//! - Lowercase conversion
//! - Removal of anything outside `[a-z0-9]`, whitespace and `-`
//! - Whitespace runs and hyphen runs collapsed to a single `-`
//! - Hyphens trimmed from both ends

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Convert free text to a slug.
///
/// # Examples
///
/// ```
/// use field_mask::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Ömer Gülçiçek"), "omer-gulcicek");
/// ```
pub fn slugify(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .filter(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug.trim_matches('-').to_string()
}
