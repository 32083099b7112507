//! Regular-expression shape checks for email addresses and URLs

use regex::Regex;
use std::sync::LazyLock;

/// Local part, `@`, then dot-separated DNS labels
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Optional http(s) scheme, host labels, TLD, optional port and path
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(https?://)?([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}(:\d{1,5})?(/.*)?$",
    )
    .unwrap()
});

pub fn email(value: &str) -> bool {
    value.len() >= 5 && EMAIL_RE.is_match(value)
}

pub fn url(value: &str) -> bool {
    !value.is_empty() && URL_RE.is_match(value)
}
