//! Percent-escaping tables for ANVL keys and values.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Characters escaped in keys. A colon would end the key early.
pub(crate) static KEY_RESERVED: &[char] = &['%', ':', '\r', '\n'];

/// Characters escaped in values. Values run to the end of the line, so a
/// colon is left alone.
pub(crate) static VALUE_RESERVED: &[char] = &['%', '\r', '\n'];

const PERCENT_ESCAPE_PATTERN: &str = r"%([0-9a-fA-F]{2})";

static PERCENT_ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PERCENT_ESCAPE_PATTERN)
        .expect("Failed to compile percent escape regex - this is a bug")
});

/// Replaces every character of `reserved` in `text` with `%XX`.
///
/// `XX` is the uppercase hexadecimal code of the character. Returns the input
/// unchanged (borrowed) when nothing needs escaping.
pub fn escape<'a>(text: &'a str, reserved: &[char]) -> Cow<'a, str> {
    if !text.contains(reserved) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if reserved.contains(&c) {
            escaped.push_str(&format!("%{:02X}", c as u32));
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Escapes an ANVL key.
pub fn escape_key(key: &str) -> Cow<'_, str> {
    escape(key, KEY_RESERVED)
}

/// Escapes an ANVL value.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    escape(value, VALUE_RESERVED)
}

/// Reverses `%XX` escapes.
///
/// Each two-hex-digit escape (either case) becomes the character with that
/// code point. A `%` that is not followed by two hex digits is kept as is.
pub fn unescape(text: &str) -> Cow<'_, str> {
    PERCENT_ESCAPE_RE.replace_all(text, |caps: &Captures| {
        // Two hex digits always fit in a u8
        let code = u8::from_str_radix(&caps[1], 16).unwrap_or(b'%');
        char::from(code).to_string()
    })
}
