//! Small string helpers shared by the parser, the query collection, and
//! [`combine`](crate::combine::combine).

/// Splits `s` at the first occurrence of `separator`.
///
/// Returns the text before the separator, and the text after it if the
/// separator was present. An empty tail (`"a="`) is `Some("")`, distinct from
/// no separator at all (`"a"`).
///
/// ```
/// use fluent_url::util::split_on_first_occurrence;
///
/// assert_eq!(split_on_first_occurrence("a=b=c", "="), ("a", Some("b=c")));
/// assert_eq!(split_on_first_occurrence("a=", "="), ("a", Some("")));
/// assert_eq!(split_on_first_occurrence("a", "="), ("a", None));
/// ```
#[must_use]
pub fn split_on_first_occurrence<'a>(s: &'a str, separator: &str) -> (&'a str, Option<&'a str>) {
    match s.split_once(separator) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

/// Joins `a` and `b` so exactly one `separator` sits between them, whatever
/// copies of it either side already carries.
///
/// An empty side yields the other side unchanged.
pub(crate) fn join_with_single_separator(a: &str, b: &str, separator: char) -> String {
    if a.is_empty() {
        return b.to_string();
    }
    if b.is_empty() {
        return a.to_string();
    }
    let a = a.trim_end_matches(separator);
    let b = b.trim_start_matches(separator);
    let mut joined = String::with_capacity(a.len() + b.len() + 1);
    joined.push_str(a);
    joined.push(separator);
    joined.push_str(b);
    joined
}

/// True if `s` is a syntactically valid scheme: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub(crate) fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_first_only() {
        assert_eq!(split_on_first_occurrence("x=1=2", "="), ("x", Some("1=2")));
        assert_eq!(split_on_first_occurrence("=bar", "="), ("", Some("bar")));
        assert_eq!(split_on_first_occurrence("", "="), ("", None));
    }

    #[test]
    fn split_on_multichar_separator() {
        assert_eq!(split_on_first_occurrence("http://x", "://"), ("http", Some("x")));
    }

    #[test]
    fn single_separator_join() {
        assert_eq!(join_with_single_separator("a/", "/b", '/'), "a/b");
        assert_eq!(join_with_single_separator("a//", "b", '/'), "a/b");
        assert_eq!(join_with_single_separator("a", "b", '&'), "a&b");
        assert_eq!(join_with_single_separator("", "/b", '/'), "/b");
        assert_eq!(join_with_single_separator("a/", "", '/'), "a/");
    }

    #[test]
    fn scheme_syntax() {
        assert!(is_scheme("http"));
        assert!(is_scheme("svn+ssh"));
        assert!(is_scheme("x-1.a"));
        assert!(!is_scheme(""));
        assert!(!is_scheme("1http"));
        assert!(!is_scheme("ht tp"));
    }
}
