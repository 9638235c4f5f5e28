//! Absolute-URI classification for merge values.

use once_cell::sync::Lazy;
use regex::Regex;

static URI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(http|ftp)s?://[\w.-]+\.\w+(/.*)?").expect("URI pattern is valid")
});

/// True iff `value` looks like an absolute http(s)/ftp(s) URI: scheme,
/// `://`, a host of dot-or-word segments ending in a word segment, and an
/// optional path. Values that fail this test are stored as plain literals.
pub fn valid_uri(value: &str) -> bool {
    URI_PATTERN.is_match(value)
}
