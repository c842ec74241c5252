//! Query parameter collection.
//!
//! A query string is modelled as an ordered list of name/value pairs. Names
//! may repeat (`x=1&x=2`), and repeats keep their relative positions through
//! every mutation, so this is deliberately not a map.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Index;

use crate::encoding::{decode, encode, encode_illegal_characters};
use crate::util::split_on_first_occurrence;

/// What to do when a query parameter is set to a null value.
///
/// Null elements inside a list are kept as bare names in position, except
/// under [`Ignore`](Self::Ignore), which skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NullValueHandling {
    /// Remove every existing parameter with that name and add nothing.
    #[default]
    Remove,
    /// Add the name alone, serialized without `=` (`?x`).
    NameOnly,
    /// Leave existing parameters with that name untouched and add nothing.
    Ignore,
}

/// A value being assigned to a query parameter.
///
/// Produced through `From` conversions: strings, numbers, `bool` and `char`
/// become [`ParamValue::Scalar`], `None` becomes [`ParamValue::Null`], and
/// vectors, arrays and slices become [`ParamValue::List`], one query entry per
/// element.
///
/// ```
/// use fluent_url::ParamValue;
///
/// assert_eq!(ParamValue::from(42), ParamValue::Scalar("42".into()));
/// assert_eq!(ParamValue::from(None::<&str>), ParamValue::Null);
/// assert_eq!(
///     ParamValue::from(vec![Some("a"), None]),
///     ParamValue::List(vec![Some("a".into()), None])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// No value.
    Null,
    /// A single value.
    Scalar(String),
    /// Several values sharing one name; `None` elements are nulls.
    List(Vec<Option<String>>),
}

impl ParamValue {
    /// Returns true for [`ParamValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Flattens into one optional value per query entry.
    fn split(self) -> Vec<Option<String>> {
        match self {
            Self::Null => vec![None],
            Self::Scalar(s) => vec![Some(s)],
            Self::List(values) => values,
        }
    }

    fn push_into(self, out: &mut Vec<Option<String>>) {
        match self {
            Self::Null => out.push(None),
            Self::Scalar(s) => out.push(Some(s)),
            Self::List(values) => out.extend(values),
        }
    }
}

macro_rules! param_value_from_display {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::Scalar(value.to_string())
                }
            }
        )*
    };
}

param_value_from_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

impl From<Cow<'_, str>> for ParamValue {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Scalar(value.into_owned())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            value.into().push_into(&mut out);
        }
        Self::List(out)
    }
}

impl<T: Into<ParamValue>, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

impl<T: Clone + Into<ParamValue>> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::from(values.to_vec())
    }
}

/// The stored value of one query entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StoredValue {
    /// Bare name, no `=`.
    NameOnly,
    /// Set by the caller; encoded at serialization time.
    Raw(String),
    /// Captured already encoded; the original text is written back verbatim.
    Encoded { decoded: String, encoded: String },
}

/// One `name[=value]` entry of a query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParam {
    name: String,
    value: StoredValue,
}

impl QueryParam {
    fn new(name: &str, value: Option<String>, is_encoded: bool) -> Self {
        let value = match value {
            None => StoredValue::NameOnly,
            Some(encoded) if is_encoded => StoredValue::Encoded {
                decoded: decode(&encoded, true),
                encoded,
            },
            Some(raw) => StoredValue::Raw(raw),
        };
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Returns the parameter name as it appears in the query string.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the decoded value, or `None` for a name-only entry.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.value {
            StoredValue::NameOnly => None,
            StoredValue::Raw(s) | StoredValue::Encoded { decoded: s, .. } => Some(s),
        }
    }

    /// Returns the value as it will be written into the query string.
    ///
    /// Values captured already encoded are returned verbatim; other values
    /// are fully encoded.
    #[must_use]
    pub fn encoded_value(&self, encode_space_as_plus: bool) -> Option<Cow<'_, str>> {
        match &self.value {
            StoredValue::NameOnly => None,
            StoredValue::Raw(s) => Some(Cow::Owned(encode(s, encode_space_as_plus))),
            StoredValue::Encoded { encoded, .. } => Some(Cow::Borrowed(encoded)),
        }
    }

    fn write_to(&self, out: &mut String, encode_space_as_plus: bool) {
        out.push_str(&encode_illegal_characters(&self.name, encode_space_as_plus));
        if let Some(value) = self.encoded_value(encode_space_as_plus) {
            out.push('=');
            out.push_str(&value);
        }
    }
}

/// An ordered, duplicate-friendly collection of query parameters.
///
/// # Examples
///
/// ```
/// use fluent_url::{NullValueHandling, QueryParamCollection};
///
/// let mut query = QueryParamCollection::parse("?x=1&y=2&x=3");
/// assert_eq!(query.get_all("x"), vec![Some("1"), Some("3")]);
///
/// query.add_or_replace("x", ["a", "b", "c"], false, NullValueHandling::Remove);
/// assert_eq!(query.to_string(), "x=a&y=2&x=b&x=c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryParamCollection {
    params: Vec<QueryParam>,
}

impl QueryParamCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without its leading `?`.
    ///
    /// Only one leading `?` is dropped; further ones belong to the first
    /// name. Entries are split on `&` and then on the first `=`. Values are
    /// kept in their original encoded form so an unmodified collection
    /// re-serializes byte-for-byte. Empty entries (`a&&b`) are kept too.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self::parse_raw(query.strip_prefix('?').unwrap_or(query))
    }

    /// Parses the text after the `?` that introduced the query.
    pub(crate) fn parse_raw(query: &str) -> Self {
        if query.is_empty() {
            return Self::new();
        }
        let params = query
            .split('&')
            .map(|pair| {
                let (name, value) = split_on_first_occurrence(pair, "=");
                QueryParam::new(name, value.map(str::to_string), true)
            })
            .collect();
        Self { params }
    }

    /// Returns the number of entries, counting repeated names separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over entries in query-string order.
    pub fn iter(&self) -> std::slice::Iter<'_, QueryParam> {
        self.params.iter()
    }

    /// Iterates over entry names in order, repeats included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(QueryParam::name)
    }

    /// Returns the first entry named `name`.
    ///
    /// The outer `Option` tells whether the name is present; the inner one is
    /// `None` for a name-only entry.
    #[must_use]
    pub fn try_get_first(&self, name: &str) -> Option<Option<&str>> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(QueryParam::value)
    }

    /// Returns the value of the first entry named `name`, or `None` if there
    /// is no such entry or it has no value.
    #[must_use]
    pub fn first_or_default(&self, name: &str) -> Option<&str> {
        self.try_get_first(name).flatten()
    }

    /// Returns the values of every entry named `name`, in order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<Option<&str>> {
        self.params
            .iter()
            .filter(|p| p.name == name)
            .map(QueryParam::value)
            .collect()
    }

    /// Returns true if any entry is named `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// Returns true if an entry named `name` has the (decoded) value `value`.
    #[must_use]
    pub fn contains_value(&self, name: &str, value: &str) -> bool {
        self.params
            .iter()
            .any(|p| p.name == name && p.value() == Some(value))
    }

    /// Appends `value` under `name`.
    ///
    /// A top-level [`ParamValue::Null`] follows `null_handling`: `Remove`
    /// deletes every entry named `name`, `NameOnly` appends a bare name, and
    /// `Ignore` does nothing.
    ///
    /// A [`ParamValue::List`] is split into one entry per element, in order.
    /// A null element keeps its position as a bare name, except under
    /// [`NullValueHandling::Ignore`], where it is skipped.
    ///
    /// When `is_encoded` is true, values are taken to be percent-encoded
    /// already and are written back without further encoding.
    pub fn add(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
        is_encoded: bool,
        null_handling: NullValueHandling,
    ) {
        let value = value.into();
        if value.is_null() {
            match null_handling {
                NullValueHandling::Remove => {
                    self.remove(name);
                }
                NullValueHandling::NameOnly => self.params.push(QueryParam::new(name, None, false)),
                NullValueHandling::Ignore => {}
            }
            return;
        }
        for val in value.split() {
            self.push_value(name, val, is_encoded, null_handling);
        }
    }

    /// Replaces the entries named `name` with `value`, position by position.
    ///
    /// Existing entries are overwritten in their original slots, one new
    /// value per slot. Surplus slots are removed; surplus values are appended
    /// after everything else. Entries with other names keep their places.
    ///
    /// A top-level null follows `null_handling`: `Remove` deletes every
    /// entry named `name`, `NameOnly` leaves a single bare name in the first
    /// slot, and `Ignore` leaves the collection untouched. A null element of
    /// a list turns its slot into a bare name, or keeps the existing entry
    /// under `Ignore`.
    pub fn add_or_replace(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
        is_encoded: bool,
        null_handling: NullValueHandling,
    ) {
        let value = value.into();
        if !self.contains(name) {
            self.add(name, value, is_encoded, null_handling);
            return;
        }
        if value.is_null() {
            match null_handling {
                NullValueHandling::Remove => {
                    self.remove(name);
                    return;
                }
                NullValueHandling::Ignore => return,
                NullValueHandling::NameOnly => {}
            }
        }

        let mut queue: VecDeque<Option<String>> = value.split().into();
        let old = std::mem::take(&mut self.params);
        self.params.reserve(old.len() + queue.len());

        for param in old {
            if param.name != name {
                self.params.push(param);
                continue;
            }
            // Out of new values: the slot goes away.
            let Some(val) = queue.pop_front() else {
                continue;
            };
            if val.is_none() && null_handling == NullValueHandling::Ignore {
                self.params.push(param);
            } else {
                self.params.push(QueryParam::new(name, val, is_encoded));
            }
        }

        for val in queue {
            self.push_value(name, val, is_encoded, null_handling);
        }
    }

    fn push_value(
        &mut self,
        name: &str,
        value: Option<String>,
        is_encoded: bool,
        null_handling: NullValueHandling,
    ) {
        if value.is_none() && null_handling == NullValueHandling::Ignore {
            return;
        }
        self.params.push(QueryParam::new(name, value, is_encoded));
    }

    /// Removes every entry named `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.params.len();
        self.params.retain(|p| p.name != name);
        before - self.params.len()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Serializes as `name[=value]` pairs joined by `&`, without a leading
    /// `?`.
    ///
    /// When `encode_space_as_plus` is true, spaces in names and in values
    /// that need encoding are written as `+`.
    #[must_use]
    pub fn to_string_with(&self, encode_space_as_plus: bool) -> String {
        let mut out = String::new();
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            param.write_to(&mut out, encode_space_as_plus);
        }
        out
    }
}

impl fmt::Display for QueryParamCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(false))
    }
}

impl Index<usize> for QueryParamCollection {
    type Output = QueryParam;

    fn index(&self, index: usize) -> &Self::Output {
        &self.params[index]
    }
}

impl<'a> IntoIterator for &'a QueryParamCollection {
    type Item = &'a QueryParam;
    type IntoIter = std::slice::Iter<'a, QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
