//! Path segment list.

use std::fmt;
use std::ops::Deref;

use crate::encoding::{encode, encode_illegal_characters};

/// The path of a URL as an ordered list of `/`-free, percent-encoded
/// segments, plus whether the path starts and ends with a slash.
///
/// The slash flags are tracked separately from the segments so a parsed
/// path re-serializes with its original slash style.
///
/// # Examples
///
/// ```
/// use fluent_url::PathSegments;
///
/// let mut path = PathSegments::parse("/a/b/");
/// assert_eq!(path.as_slice(), ["a", "b"]);
/// assert_eq!(path.to_string(), "/a/b/");
///
/// path.append("c d", false);
/// assert_eq!(path.to_string(), "/a/b/c%20d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathSegments {
    segments: Vec<String>,
    leading_slash: bool,
    trailing_slash: bool,
}

impl PathSegments {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a raw path into segments.
    ///
    /// One leading and one trailing slash are recorded as flags; everything
    /// between is split on `/`, so `a//b` keeps its empty middle segment.
    /// Illegal characters in each segment are encoded; existing `%XX`
    /// sequences are kept.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let (leading_slash, body) = match path.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, path),
        };
        let (trailing_slash, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let segments = if body.is_empty() && !trailing_slash {
            Vec::new()
        } else {
            body.split('/')
                .map(|s| encode_illegal_characters(s, false))
                .collect()
        };
        Self {
            segments,
            leading_slash,
            trailing_slash,
        }
    }

    /// Appends a segment.
    ///
    /// The segment is encoded first: fully when `fully_encode` is true,
    /// otherwise only illegal characters. Leading and trailing slashes of
    /// the encoded text are trimmed and any interior slash splits it into
    /// several segments; a fully-encoded segment never splits since its
    /// slashes are escaped. Nothing is appended when only slashes remain.
    ///
    /// The path always gets a leading slash. It ends with a slash only if
    /// `segment` did and was not fully encoded.
    pub fn append(&mut self, segment: &str, fully_encode: bool) {
        let encoded = if fully_encode {
            encode(segment, false)
        } else {
            encode_illegal_characters(segment, false)
        };
        let trimmed = encoded.trim_matches('/');
        if !trimmed.is_empty() {
            self.segments.extend(trimmed.split('/').map(str::to_string));
        }
        self.leading_slash = true;
        self.trailing_slash = !fully_encode && segment.ends_with('/');
    }

    /// Replaces the whole path.
    ///
    /// An empty string clears it, `/` leaves only the leading slash, and
    /// anything else is appended as with [`append`](Self::append).
    pub fn set(&mut self, path: &str) {
        self.clear();
        match path {
            "" => {}
            "/" => self.leading_slash = true,
            _ => self.append(path, false),
        }
    }

    /// Removes the last segment, if any.
    pub fn remove_last(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// Removes every segment and both slashes.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.leading_slash = false;
        self.trailing_slash = false;
    }

    /// Returns the segments.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    /// Returns true if the path starts with `/`.
    #[must_use]
    pub const fn has_leading_slash(&self) -> bool {
        self.leading_slash
    }

    /// Returns true if the path ends with `/` after its last segment.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash && !self.segments.is_empty()
    }
}

impl Deref for PathSegments {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl fmt::Display for PathSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leading_slash {
            f.write_str("/")?;
        }
        f.write_str(&self.segments.join("/"))?;
        if self.has_trailing_slash() {
            f.write_str("/")?;
        }
        Ok(())
    }
}
