//! The mutable [`Url`] value type.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::combine;
use crate::constants::SECURE_SCHEMES;
use crate::encoding;
use crate::error::Error;
use crate::pairs::ToQueryPairs;
use crate::path::PathSegments;
use crate::query::{NullValueHandling, ParamValue, QueryParamCollection};
use crate::util::{is_scheme, split_on_first_occurrence};

/// A mutable URL, absolute or relative.
///
/// Parsing is permissive and never fails. An unmodified `Url` serializes
/// back to exactly the (trimmed) string it was parsed from, slash style and
/// escape case included; mutators only re-encode what they touch.
///
/// Mutators return `&mut Self` so they can be chained.
///
/// # Structure
///
/// ```text
/// scheme://user_info@host:port/path/segments?query=params#fragment
/// ```
///
/// # Examples
///
/// ```
/// use fluent_url::Url;
///
/// let mut url = Url::parse("https://api.example.com/v1/?page=2#top");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host(), "api.example.com");
/// assert_eq!(url.path(), "/v1/");
/// assert_eq!(url.to_string(), "https://api.example.com/v1/?page=2#top");
///
/// url.append_path_segment("users", false)
///     .set_query_param("page", 3)
///     .set_query_param("q", "a b");
/// assert_eq!(url.to_string(), "https://api.example.com/v1/users?page=3&q=a%20b#top");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Url {
    original: String,
    scheme: String,
    user_info: String,
    host: String,
    port: Option<u16>,
    /// Whether the input carried a `//` authority marker, even an empty one.
    has_authority: bool,
    path: PathSegments,
    query: QueryParamCollection,
    fragment: String,
}

impl Url {
    /// Parses a URL, absolute or relative.
    ///
    /// Surrounding whitespace is trimmed. The input is split, in order, at
    /// the first `#` (fragment) and the first `?` (query). A scheme is
    /// recognized only if it is syntactically valid; an authority only if
    /// `//` follows the scheme or starts the string. Whatever remains is the
    /// path.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (before_fragment, fragment) = split_on_first_occurrence(input, "#");
        let (before_query, query) = split_on_first_occurrence(before_fragment, "?");
        let (scheme, rest) = split_scheme(before_query);

        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (Some(&after[..end]), &after[end..])
            }
            None => (None, rest),
        };

        let mut url = Self {
            original: input.to_string(),
            scheme: scheme.to_string(),
            has_authority: authority.is_some(),
            path: PathSegments::parse(path),
            query: QueryParamCollection::parse_raw(query.unwrap_or_default()),
            fragment: fragment.unwrap_or_default().to_string(),
            ..Self::default()
        };
        if let Some(authority) = authority {
            url.set_authority_parts(authority);
        }

        if url.scheme.is_empty() {
            trace!(
                protocol_relative = url.has_authority,
                "parsed relative reference"
            );
        }
        url
    }

    /// Alias for [`Url::parse`].
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::parse(input)
    }

    fn set_authority_parts(&mut self, authority: &str) {
        let (user_info, host_port) = match authority.rfind('@') {
            Some(at) => (&authority[..at], &authority[at + 1..]),
            None => ("", authority),
        };
        let (host, port) = split_port(host_port);
        self.user_info = user_info.to_string();
        self.host = host.to_string();
        self.port = port;
    }

    /// Returns the scheme without its trailing `:`; empty for relative URLs.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Sets the scheme.
    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.scheme = scheme.into();
        self
    }

    /// Returns the `user:password` part of the authority; empty if absent.
    #[must_use]
    pub fn user_info(&self) -> &str {
        &self.user_info
    }

    /// Sets the user info.
    pub fn set_user_info(&mut self, user_info: impl Into<String>) -> &mut Self {
        self.user_info = user_info.into();
        self
    }

    /// Returns the host; empty if absent.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Sets the host.
    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = host.into();
        self
    }

    /// Returns the port, only if one was explicitly given. No scheme
    /// defaults are applied.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Sets or clears the port.
    pub fn set_port(&mut self, port: Option<u16>) -> &mut Self {
        self.port = port;
        self
    }

    /// Returns `[user_info@]host[:port]`.
    #[must_use]
    pub fn authority(&self) -> String {
        let mut authority = String::with_capacity(self.user_info.len() + self.host.len() + 7);
        if !self.user_info.is_empty() {
            authority.push_str(&self.user_info);
            authority.push('@');
        }
        authority.push_str(&self.host);
        if let Some(port) = self.port {
            authority.push(':');
            authority.push_str(&port.to_string());
        }
        authority
    }

    /// Returns the scheme and authority, without path, query, or fragment.
    ///
    /// ```
    /// use fluent_url::Url;
    ///
    /// assert_eq!(Url::parse("http://u:p@x.com:81/a?b#c").root(), "http://u:p@x.com:81");
    /// assert_eq!(Url::parse("//x.com/a").root(), "//x.com");
    /// assert_eq!(Url::parse("/a/b").root(), "");
    /// ```
    #[must_use]
    pub fn root(&self) -> String {
        let authority = self.authority();
        let mut root = String::with_capacity(self.scheme.len() + authority.len() + 3);
        if !self.scheme.is_empty() {
            root.push_str(&self.scheme);
            root.push(':');
        }
        if self.has_authority || !authority.is_empty() {
            root.push_str("//");
        }
        root.push_str(&authority);
        root
    }

    /// Returns the path, with its leading and trailing slashes if it has
    /// them.
    #[must_use]
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    /// Replaces the path. See [`PathSegments::set`].
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.path.set(path);
        self
    }

    /// Returns the path segments, percent-encoded.
    #[must_use]
    pub fn path_segments(&self) -> &PathSegments {
        &self.path
    }

    /// Returns the query string without its leading `?`.
    #[must_use]
    pub fn query(&self) -> String {
        self.query.to_string()
    }

    /// Replaces the whole query string, with or without a leading `?`.
    pub fn set_query(&mut self, query: &str) -> &mut Self {
        self.query = QueryParamCollection::parse(query);
        self
    }

    /// Returns the query parameters.
    #[must_use]
    pub fn query_params(&self) -> &QueryParamCollection {
        &self.query
    }

    /// Returns the query parameters for direct mutation.
    pub fn query_params_mut(&mut self) -> &mut QueryParamCollection {
        &mut self.query
    }

    /// Returns the fragment without its leading `#`; empty if absent.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Returns true if the URL has no scheme.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.scheme.is_empty()
    }

    /// Returns true for `https` and `wss` URLs, ignoring case.
    #[must_use]
    pub fn is_secure_scheme(&self) -> bool {
        SECURE_SCHEMES
            .iter()
            .any(|s| self.scheme.eq_ignore_ascii_case(s))
    }

    /// Appends a path segment.
    ///
    /// With `fully_encode` false, only illegal characters are encoded and
    /// slashes in `segment` separate further segments. With `fully_encode`
    /// true, every reserved character including `/` is encoded, so the
    /// result is always a single segment.
    ///
    /// ```
    /// use fluent_url::Url;
    ///
    /// let mut url = Url::parse("http://x.com/api/");
    /// url.append_path_segment("a b/c", false).append_path_segment("d/e", true);
    /// assert_eq!(url.to_string(), "http://x.com/api/a%20b/c/d%2Fe");
    /// ```
    pub fn append_path_segment(&mut self, segment: impl fmt::Display, fully_encode: bool) -> &mut Self {
        self.path.append(&segment.to_string(), fully_encode);
        self
    }

    /// Appends several path segments in order, encoding only illegal
    /// characters.
    pub fn append_path_segments<I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for segment in segments {
            self.append_path_segment(segment, false);
        }
        self
    }

    /// Removes the last path segment, if any.
    pub fn remove_path_segment(&mut self) -> &mut Self {
        self.path.remove_last();
        self
    }

    /// Removes the whole path.
    pub fn remove_path(&mut self) -> &mut Self {
        self.path.clear();
        self
    }

    /// Sets a query parameter, replacing any existing values of that name
    /// in place. Nulls remove the parameter.
    ///
    /// See [`QueryParamCollection::add_or_replace`].
    pub fn set_query_param(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.set_query_param_with(name, value, false, NullValueHandling::Remove)
    }

    /// Sets a query parameter with explicit encoding and null handling.
    ///
    /// With `is_encoded` true the value is taken to be percent-encoded
    /// already and is written as is.
    pub fn set_query_param_with(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
        is_encoded: bool,
        null_handling: NullValueHandling,
    ) -> &mut Self {
        self.query.add_or_replace(name, value, is_encoded, null_handling);
        self
    }

    /// Sets a value-less query parameter (`?name`), replacing any existing
    /// values of that name.
    pub fn set_query_param_name(&mut self, name: &str) -> &mut Self {
        self.set_query_param_with(name, ParamValue::Null, false, NullValueHandling::NameOnly)
    }

    /// Sets a value-less query parameter for each name.
    pub fn set_query_param_names<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.set_query_param_name(name.as_ref());
        }
        self
    }

    /// Sets a query parameter for every name/value pair of `values`. Nulls
    /// remove parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if `values` cannot be converted into pairs; the URL
    /// is left unchanged in that case.
    ///
    /// ```
    /// use fluent_url::Url;
    ///
    /// let mut url = Url::parse("http://x.com");
    /// url.set_query_params([("x", 1), ("y", 2)])?;
    /// assert_eq!(url.to_string(), "http://x.com?x=1&y=2");
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    pub fn set_query_params<T>(&mut self, values: T) -> Result<&mut Self, Error>
    where
        T: ToQueryPairs,
    {
        self.set_query_params_with(values, NullValueHandling::Remove)
    }

    /// Sets a query parameter for every name/value pair of `values`, with
    /// explicit null handling.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if `values` cannot be converted into pairs; the URL
    /// is left unchanged in that case.
    pub fn set_query_params_with<T>(
        &mut self,
        values: T,
        null_handling: NullValueHandling,
    ) -> Result<&mut Self, Error>
    where
        T: ToQueryPairs,
    {
        for (name, value) in collect_pairs(&values)? {
            self.query.add_or_replace(&name, value, false, null_handling);
        }
        Ok(self)
    }

    /// Appends a query parameter, keeping any existing values of that name.
    ///
    /// See [`QueryParamCollection::add`].
    pub fn append_query_param(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.append_query_param_with(name, value, false, NullValueHandling::Remove)
    }

    /// Appends a query parameter with explicit encoding and null handling.
    pub fn append_query_param_with(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
        is_encoded: bool,
        null_handling: NullValueHandling,
    ) -> &mut Self {
        self.query.add(name, value, is_encoded, null_handling);
        self
    }

    /// Appends a value-less query parameter (`?name`).
    pub fn append_query_param_name(&mut self, name: &str) -> &mut Self {
        self.append_query_param_with(name, ParamValue::Null, false, NullValueHandling::NameOnly)
    }

    /// Appends a query parameter for every name/value pair of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if `values` cannot be converted into pairs; the URL
    /// is left unchanged in that case.
    pub fn append_query_params<T>(&mut self, values: T) -> Result<&mut Self, Error>
    where
        T: ToQueryPairs,
    {
        self.append_query_params_with(values, NullValueHandling::Remove)
    }

    /// Appends a query parameter for every name/value pair of `values`,
    /// with explicit null handling.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if `values` cannot be converted into pairs; the URL
    /// is left unchanged in that case.
    pub fn append_query_params_with<T>(
        &mut self,
        values: T,
        null_handling: NullValueHandling,
    ) -> Result<&mut Self, Error>
    where
        T: ToQueryPairs,
    {
        for (name, value) in collect_pairs(&values)? {
            self.query.add(&name, value, false, null_handling);
        }
        Ok(self)
    }

    /// Removes every query parameter named `name`.
    pub fn remove_query_param(&mut self, name: &str) -> &mut Self {
        self.query.remove(name);
        self
    }

    /// Removes every query parameter with one of the given names.
    pub fn remove_query_params<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.query.remove(name.as_ref());
        }
        self
    }

    /// Removes all query parameters.
    pub fn clear_query_params(&mut self) -> &mut Self {
        self.query.clear();
        self
    }

    /// Sets the fragment. A leading `#` is dropped.
    pub fn set_fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = fragment.trim_start_matches('#').to_string();
        self
    }

    /// Removes the fragment.
    pub fn remove_fragment(&mut self) -> &mut Self {
        self.fragment.clear();
        self
    }

    /// Drops path, query, and fragment, keeping scheme and authority.
    pub fn reset_to_root(&mut self) -> &mut Self {
        self.path.clear();
        self.query.clear();
        self.fragment.clear();
        self
    }

    /// Discards every change made since parsing.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::parse(&self.original);
        self
    }

    /// Serializes the URL.
    ///
    /// When `encode_space_as_plus` is true, encoded spaces in the path
    /// (`%20`) and in newly encoded query names and values are written as
    /// `+`.
    #[must_use]
    pub fn to_string_with(&self, encode_space_as_plus: bool) -> String {
        let mut out = self.root();
        let path = self.path.to_string();
        if encode_space_as_plus {
            out.push_str(&path.replace("%20", "+"));
        } else {
            out.push_str(&path);
        }
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query.to_string_with(encode_space_as_plus));
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }

    /// Converts to an [`http::Uri`] for use as a request target.
    ///
    /// `http::Uri` does not carry fragments, so the fragment is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`http::uri::InvalidUri`] if the serialized URL is not a valid
    /// `http` request target.
    #[cfg(feature = "http")]
    pub fn to_uri(&self) -> Result<http::Uri, http::uri::InvalidUri> {
        http::Uri::try_from(self.to_string())
    }

    /// Percent-encodes everything outside the unreserved set. See
    /// [`encoding::encode`].
    #[must_use]
    pub fn encode(s: &str, encode_space_as_plus: bool) -> String {
        encoding::encode(s, encode_space_as_plus)
    }

    /// Percent-encodes only characters illegal in a URI. See
    /// [`encoding::encode_illegal_characters`].
    #[must_use]
    pub fn encode_illegal_characters(s: &str, encode_space_as_plus: bool) -> String {
        encoding::encode_illegal_characters(s, encode_space_as_plus)
    }

    /// Percent-decodes. See [`encoding::decode`].
    #[must_use]
    pub fn decode(s: &str, interpret_plus_as_space: bool) -> String {
        encoding::decode(s, interpret_plus_as_space)
    }

    /// Joins URL parts. See [`combine::combine`].
    #[must_use]
    pub fn combine<I>(parts: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        combine::combine(parts)
    }

    /// Returns the scheme and authority of `url`. See [`combine::get_root`].
    #[must_use]
    pub fn get_root(url: &str) -> String {
        combine::get_root(url)
    }

    /// Returns true if `url` is a well-formed absolute URL. See
    /// [`combine::is_valid`].
    #[must_use]
    pub fn is_valid(url: &str) -> bool {
        combine::is_valid(url)
    }

    /// Parses `url` and returns its path segments.
    #[must_use]
    pub fn parse_path_segments(url: &str) -> Vec<String> {
        Self::parse(url).path.to_vec()
    }

    /// Parses a query string, with or without its leading `?`.
    #[must_use]
    pub fn parse_query_params(query: &str) -> QueryParamCollection {
        QueryParamCollection::parse(query)
    }

    /// True if the authority was introduced by `//`, even an empty one.
    pub(crate) const fn has_authority(&self) -> bool {
        self.has_authority
    }
}

/// Converts `values` to pairs up front so a failure leaves the URL untouched.
fn collect_pairs<T: ToQueryPairs>(values: &T) -> Result<Vec<(String, ParamValue)>, Error> {
    values.to_query_pairs()?.collect()
}

/// Splits off a syntactically valid scheme and its `:`.
fn split_scheme(s: &str) -> (&str, &str) {
    match s.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => (scheme, rest),
        _ => ("", s),
    }
}

/// Splits `host[:port]`. Only a port that fits in `u16` and is written
/// canonically (no leading zeros) is split off; anything else after the colon
/// stays part of the host so it serializes unchanged. Bracketed IPv6 hosts
/// are handled.
fn split_port(host_port: &str) -> (&str, Option<u16>) {
    let search_from = if host_port.starts_with('[') {
        host_port.find(']').map_or(host_port.len(), |i| i + 1)
    } else {
        0
    };
    let Some(colon) = host_port[search_from..].rfind(':').map(|i| i + search_from) else {
        return (host_port, None);
    };
    let port_str = &host_port[colon + 1..];
    if port_str.is_empty() || !port_str.bytes().all(|b| b.is_ascii_digit()) {
        return (host_port, None);
    }
    match port_str.parse::<u16>() {
        Ok(port) if port_str == port.to_string() => (&host_port[..colon], Some(port)),
        _ => (host_port, None),
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(false))
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialEq<str> for Url {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Url {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl FromStr for Url {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Url {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Url {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&Url> for String {
    fn from(url: &Url) -> Self {
        url.to_string()
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.to_string()
    }
}

#[cfg(feature = "http")]
impl From<&http::Uri> for Url {
    fn from(uri: &http::Uri) -> Self {
        Self::parse(&uri.to_string())
    }
}

#[cfg(feature = "http")]
impl From<http::Uri> for Url {
    fn from(uri: http::Uri) -> Self {
        Self::from(&uri)
    }
}

#[cfg(feature = "http")]
impl TryFrom<&Url> for http::Uri {
    type Error = http::uri::InvalidUri;

    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        url.to_uri()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
