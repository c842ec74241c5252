//! Percent-encoding and decoding primitives.
//!
//! Two encoding strengths are provided:
//!
//! - [`encode`] escapes everything outside the unreserved set
//!   (`ALPHA / DIGIT / "-" / "_" / "." / "~"`). Used for query values and
//!   fully-encoded path segments.
//! - [`encode_illegal_characters`] escapes only what can never appear in a
//!   URI (controls, spaces, `"`, `<`, `>`, non-ASCII, ...) and leaves reserved
//!   characters such as `/ ? # &` alone. Valid `%XX` triplets already present
//!   in the input pass through untouched, so it is safe to apply to text that
//!   is partially encoded.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::constants::MAX_ENCODE_CHUNK_LENGTH;

/// Everything except unreserved characters.
const DATA: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters that are never legal anywhere in a URI.
const ILLEGAL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes every character outside the unreserved set.
///
/// When `encode_space_as_plus` is true, spaces become `+` instead of `%20`.
///
/// ```
/// use fluent_url::encoding::encode;
///
/// assert_eq!(encode("a b&c=d/e", false), "a%20b%26c%3Dd%2Fe");
/// assert_eq!(encode("a b+c", true), "a+b%2Bc");
/// ```
#[must_use]
pub fn encode(s: &str, encode_space_as_plus: bool) -> String {
    if s.is_empty() {
        return String::new();
    }
    let encoded = encode_chunked(s, DATA);
    if encode_space_as_plus {
        encoded.replace("%20", "+")
    } else {
        encoded
    }
}

/// Percent-encodes characters that are illegal in a URI, leaving reserved
/// characters and existing `%XX` sequences as they are.
///
/// When `encode_space_as_plus` is true, spaces become `+` instead of `%20`.
///
/// ```
/// use fluent_url::encoding::encode_illegal_characters;
///
/// assert_eq!(encode_illegal_characters("a b/c?d=%20", false), "a%20b/c?d=%20");
/// assert_eq!(encode_illegal_characters("100%", false), "100%25");
/// ```
#[must_use]
pub fn encode_illegal_characters(s: &str, encode_space_as_plus: bool) -> String {
    if s.is_empty() {
        return String::new();
    }
    let s: Cow<'_, str> = if encode_space_as_plus {
        Cow::Owned(s.replace(' ', "+"))
    } else {
        Cow::Borrowed(s)
    };

    // No '%' means no triplets to preserve.
    if !s.contains('%') {
        return encode_chunked(&s, ILLEGAL);
    }

    let mut result = String::with_capacity(s.len());
    let mut run_start = 0;
    let mut i = 0;
    let bytes = s.as_bytes();
    while i < bytes.len() {
        if is_pct_triplet(bytes, i) {
            result.push_str(&encode_chunked(&s[run_start..i], ILLEGAL));
            result.push_str(&s[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }
    result.push_str(&encode_chunked(&s[run_start..], ILLEGAL));
    result
}

/// Percent-decodes `s`.
///
/// When `interpret_plus_as_space` is true, literal `+` characters are turned
/// into spaces *before* decoding, so an encoded plus (`%2B`) still decodes to
/// `+`. Invalid escapes are left as they are and invalid UTF-8 is replaced
/// with U+FFFD.
///
/// ```
/// use fluent_url::encoding::decode;
///
/// assert_eq!(decode("1+2", true), "1 2");
/// assert_eq!(decode("param_with_%2B", true), "param_with_+");
/// assert_eq!(decode("1+2", false), "1+2");
/// ```
#[must_use]
pub fn decode(s: &str, interpret_plus_as_space: bool) -> String {
    if s.is_empty() {
        return String::new();
    }
    if interpret_plus_as_space {
        percent_decode_str(&s.replace('+', " "))
            .decode_utf8_lossy()
            .into_owned()
    } else {
        percent_decode_str(s).decode_utf8_lossy().into_owned()
    }
}

/// True if `bytes[i..]` starts with `%` followed by two hex digits.
fn is_pct_triplet(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'%'
        && bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
        && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
}

/// Encodes `s` against `set`, at most [`MAX_ENCODE_CHUNK_LENGTH`] characters
/// at a time. Chunks are cut on character boundaries of the raw input.
fn encode_chunked(s: &str, set: &'static AsciiSet) -> String {
    if s.len() <= MAX_ENCODE_CHUNK_LENGTH {
        return utf8_percent_encode(s, set).to_string();
    }

    debug!(len = s.len(), "encoding overlong input in chunks");
    let mut result = String::with_capacity(s.len() + s.len() / 2);
    for chunk in char_chunks(s, MAX_ENCODE_CHUNK_LENGTH) {
        result.extend(utf8_percent_encode(chunk, set));
    }
    result
}

/// Splits `s` into consecutive slices of at most `max_chars` characters.
fn char_chunks(s: &str, max_chars: usize) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(idx, _)| idx);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
