//! Stateless URL string utilities.

use crate::encoding::encode_illegal_characters;
use crate::url::Url;
use crate::util::join_with_single_separator;

/// Schemes that are only well-formed with a non-empty host.
const HOST_REQUIRED_SCHEMES: [&str; 6] = ["http", "https", "ws", "wss", "ftp", "ftps"];

/// Joins URL parts into one URL string, like a path join that understands
/// query strings and fragments.
///
/// Parts are joined with `/` until a part containing `?` moves the join into
/// the query, where parts are joined with `&`. A part containing `#` moves it
/// into the fragment, where parts are concatenated as is. `?` and `#` each
/// appear once at the join point however many copies the neighbouring parts
/// carry. Empty parts are skipped. Illegal characters in the result are
/// encoded.
///
/// ```
/// use fluent_url::combine::combine;
///
/// assert_eq!(
///     combine(["http://root.com", "segment?", "foo=bar", "x=1&y=2&"]),
///     "http://root.com/segment?foo=bar&x=1&y=2&"
/// );
/// assert_eq!(combine(["http://root.com/", "/a/", "/b"]), "http://root.com/a/b");
/// ```
#[must_use]
pub fn combine<I>(parts: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut result = String::new();
    let mut in_query = false;
    let mut in_fragment = false;

    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }

        result = if result.ends_with('?') || part.starts_with('?') {
            join_with_single_separator(&result, part, '?')
        } else if result.ends_with('#') || part.starts_with('#') {
            join_with_single_separator(&result, part, '#')
        } else if in_fragment {
            result + part
        } else if in_query {
            join_with_single_separator(&result, part, '&')
        } else {
            join_with_single_separator(&result, part, '/')
        };

        if part.contains('#') {
            in_query = false;
            in_fragment = true;
        } else if !in_fragment && part.contains('?') {
            in_query = true;
        }
    }

    encode_illegal_characters(&result, false)
}

/// Returns the scheme and authority of `url`, dropping path, query, and
/// fragment.
///
/// ```
/// use fluent_url::combine::get_root;
///
/// assert_eq!(get_root("https://u@x.com:81/a/b?c#d"), "https://u@x.com:81");
/// ```
#[must_use]
pub fn get_root(url: &str) -> String {
    Url::parse(url).root()
}

/// Returns true only if `url` is a well-formed *absolute* URL.
///
/// Well-formed relative URLs are reported invalid. The check is stricter
/// than [`Url::parse`], which accepts anything: every character must be
/// legal in a URI, every `%` must start a valid escape, the authority's port
/// must be numeric, and web schemes must have a host.
///
/// ```
/// use fluent_url::combine::is_valid;
///
/// assert!(is_valid("https://x.com/a?b=c#d"));
/// assert!(!is_valid("/a/b"));
/// assert!(!is_valid("http://x.com/a b"));
/// ```
#[must_use]
pub fn is_valid(url: &str) -> bool {
    if url.is_empty() || !url.bytes().all(is_uri_byte) || !escapes_are_valid(url) {
        return false;
    }

    let parsed = Url::parse(url);
    if parsed.is_relative() {
        return false;
    }

    // A zero-padded port is left in the host by the parser.
    let host = parsed
        .host()
        .rsplit_once(':')
        .filter(|(_, port)| {
            !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_ok()
        })
        .map_or(parsed.host(), |(host, _)| host);
    let needs_host = HOST_REQUIRED_SCHEMES
        .iter()
        .any(|s| parsed.scheme().eq_ignore_ascii_case(s));
    if needs_host && (!parsed.has_authority() || host.is_empty()) {
        return false;
    }
    let bracketed = host.starts_with('[') && host.ends_with(']');
    if !bracketed && (host.contains(':') || host.contains('[') || host.contains(']')) {
        return false;
    }

    !parsed.fragment().contains('#')
}

/// Unreserved, reserved, and `%`.
fn is_uri_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-._~:/?#[]@!$&'()*+,;=%".contains(&b)
}

fn escapes_are_valid(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}
