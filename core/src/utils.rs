//! Utility functions and types.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Debug;

/// AsciiSet for [RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-2.3)
///
/// Everything except the unreserved characters `A-Z a-z 0-9 - _ . ~` is encoded,
/// which gives `%20` for space and `%2A` for `*`.
pub static RFC3986_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent encode input with [`RFC3986_ENCODE_SET`].
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &RFC3986_ENCODE_SET).to_string()
}

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// This design is to allow users to distinguish between different redacted strings but avoid
/// leaking sensitive information.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.chars().count();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            // Slice on char boundaries.
            let head = self.0.char_indices().nth(3).map_or(0, |(i, _)| i);
            let tail = self.0.char_indices().nth(length - 3).map_or(0, |(i, _)| i);
            f.write_str(&self.0[..head])?;
            f.write_str("***")?;
            f.write_str(&self.0[tail..])
        }
    }
}
