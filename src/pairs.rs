//! Conversion of caller-supplied objects into query name/value pairs.
//!
//! [`Url::set_query_params`](crate::Url::set_query_params) and friends accept
//! anything implementing [`ToQueryPairs`]. Built-in implementations cover:
//!
//! - slices, arrays and vectors of `(name, value)` tuples, in order;
//! - `HashMap` and `BTreeMap`, in the map's iteration order;
//! - query strings (`str`/`String`), split on `&` and the first `=`;
//! - [`QueryParamCollection`];
//! - `Option<T>`, where `None` is an [`Error::InvalidArgument`];
//! - with the `serde` feature, any `serde::Serialize` value wrapped in
//!   [`Serialized`].
//!
//! Errors come in two flavours. A missing top-level object is reported by
//! [`ToQueryPairs::to_query_pairs`] itself, before any pair is produced. A
//! collection element of the wrong shape is reported by the returned
//! iterator when that element is reached, so a caller that stops early never
//! sees it.

use std::collections::{BTreeMap, HashMap};

use crate::error::Error;
use crate::query::{ParamValue, QueryParamCollection};

/// Iterator over name/value pairs, each of which may fail.
pub type QueryPairs<'a> = Box<dyn Iterator<Item = Result<(String, ParamValue), Error>> + 'a>;

/// Types that can be flattened into ordered query name/value pairs.
///
/// # Examples
///
/// ```
/// use fluent_url::{ParamValue, ToQueryPairs};
///
/// let pairs: Vec<_> = [("a", 1), ("b", 2)]
///     .to_query_pairs()?
///     .collect::<Result<_, _>>()?;
/// assert_eq!(pairs[1], ("b".to_string(), ParamValue::Scalar("2".into())));
/// # Ok::<(), fluent_url::Error>(())
/// ```
pub trait ToQueryPairs {
    /// Returns the pairs in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the object itself is absent.
    /// Per-element problems are yielded by the iterator instead.
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error>;
}

impl<T: ToQueryPairs + ?Sized> ToQueryPairs for &T {
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        (**self).to_query_pairs()
    }
}

impl<T: ToQueryPairs> ToQueryPairs for Option<T> {
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        match self {
            Some(inner) => inner.to_query_pairs(),
            None => Err(Error::null_object()),
        }
    }
}

impl<K, V> ToQueryPairs for [(K, V)]
where
    K: AsRef<str>,
    V: Clone + Into<ParamValue>,
{
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        Ok(Box::new(
            self.iter()
                .map(|(k, v)| Ok((k.as_ref().to_string(), v.clone().into()))),
        ))
    }
}

impl<K, V, const N: usize> ToQueryPairs for [(K, V); N]
where
    K: AsRef<str>,
    V: Clone + Into<ParamValue>,
{
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        self.as_slice().to_query_pairs()
    }
}

impl<K, V> ToQueryPairs for Vec<(K, V)>
where
    K: AsRef<str>,
    V: Clone + Into<ParamValue>,
{
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        self.as_slice().to_query_pairs()
    }
}

impl<K, V, S> ToQueryPairs for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: Clone + Into<ParamValue>,
{
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        Ok(Box::new(
            self.iter()
                .map(|(k, v)| Ok((k.as_ref().to_string(), v.clone().into()))),
        ))
    }
}

impl<K, V> ToQueryPairs for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Clone + Into<ParamValue>,
{
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        Ok(Box::new(
            self.iter()
                .map(|(k, v)| Ok((k.as_ref().to_string(), v.clone().into()))),
        ))
    }
}

impl ToQueryPairs for QueryParamCollection {
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        Ok(Box::new(self.iter().map(|p| {
            Ok((
                p.name().to_string(),
                p.value().map_or(ParamValue::Null, ParamValue::from),
            ))
        })))
    }
}

/// A query string. Values are decoded; a bare name yields a null value.
impl ToQueryPairs for str {
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        let parsed = QueryParamCollection::parse(self);
        let pairs: Vec<_> = parsed.to_query_pairs()?.collect();
        Ok(Box::new(pairs.into_iter()))
    }
}

impl ToQueryPairs for String {
    fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
        self.as_str().to_query_pairs()
    }
}

#[cfg(feature = "serde")]
pub use self::serialized::Serialized;

#[cfg(feature = "serde")]
mod serialized {
    use serde::Serialize;
    use serde_json::{Map, Value};

    use super::{QueryPairs, ToQueryPairs};
    use crate::error::Error;
    use crate::query::ParamValue;

    const NAME_FIELDS: [&str; 4] = ["Key", "key", "Name", "name"];
    const VALUE_FIELDS: [&str; 2] = ["Value", "value"];

    /// Adapter that turns any [`Serialize`] value into query pairs.
    ///
    /// The value is serialized to a JSON tree first, then read as:
    ///
    /// - a struct or map: one pair per field, in declaration order. Fields
    ///   left out of serialization (`#[serde(skip)]`) are left out here too.
    /// - a sequence: one pair per element. Each element must be a
    ///   `(name, value)` tuple or a record with a `Key`/`key`/`Name`/`name`
    ///   field and a `Value`/`value` field.
    /// - a string: a query string.
    /// - `null` / `None`: an [`Error::InvalidArgument`].
    /// - any other scalar: no pairs.
    ///
    /// A value that `serde_json` refuses to serialize (a map with non-string
    /// keys, say) is an [`Error::InvalidArgument`] too.
    ///
    /// Field values map to [`ParamValue`]s: `null` is a null, sequences are
    /// lists, scalars are their text and nested objects their JSON text.
    ///
    /// ```
    /// use fluent_url::{Serialized, Url};
    ///
    /// #[derive(serde::Serialize)]
    /// struct Search<'a> {
    ///     q: &'a str,
    ///     page: u32,
    ///     tags: Vec<&'a str>,
    ///     #[serde(skip)]
    ///     _internal: u8,
    /// }
    ///
    /// let search = Search { q: "rust url", page: 2, tags: vec!["a", "b"], _internal: 0 };
    /// let mut url = Url::parse("https://x.com/search");
    /// url.set_query_params(Serialized(&search))?;
    /// assert_eq!(url.to_string(), "https://x.com/search?q=rust%20url&page=2&tags=a&tags=b");
    /// # Ok::<(), fluent_url::Error>(())
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct Serialized<'a, T: ?Sized>(pub &'a T);

    impl<T: Serialize + ?Sized> ToQueryPairs for Serialized<'_, T> {
        fn to_query_pairs(&self) -> Result<QueryPairs<'_>, Error> {
            let value = serde_json::to_value(self.0).map_err(|_| Error::InvalidArgument {
                argument: "obj",
                reason: "value could not be serialized into name/value pairs",
            })?;
            match value {
                Value::Null => Err(Error::null_object()),
                Value::Object(map) => Ok(Box::new(
                    map.into_iter().map(|(name, value)| Ok((name, to_param_value(value)))),
                )),
                Value::Array(items) => Ok(Box::new(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| element_pair(index, item)),
                )),
                Value::String(query) => {
                    let pairs: Vec<_> = query.to_query_pairs()?.collect();
                    Ok(Box::new(pairs.into_iter()))
                }
                Value::Bool(_) | Value::Number(_) => Ok(Box::new(std::iter::empty())),
            }
        }
    }

    fn element_pair(index: usize, item: Value) -> Result<(String, ParamValue), Error> {
        let unsupported = |reason| {
            debug!(index, reason, "unsupported query pair element");
            Error::UnsupportedShape { index, reason }
        };
        match item {
            Value::Object(mut fields) => {
                let name = take_first(&mut fields, &NAME_FIELDS)
                    .ok_or_else(|| unsupported("missing name field"))?;
                let value = take_first(&mut fields, &VALUE_FIELDS)
                    .ok_or_else(|| unsupported("missing value field"))?;
                let name = scalar_text(name).ok_or_else(|| unsupported("name is not a scalar"))?;
                Ok((name, to_param_value(value)))
            }
            Value::Array(mut pair) if pair.len() == 2 => {
                let value = pair.pop().unwrap_or(Value::Null);
                let name = pair.pop().unwrap_or(Value::Null);
                let name = scalar_text(name).ok_or_else(|| unsupported("name is not a scalar"))?;
                Ok((name, to_param_value(value)))
            }
            _ => Err(unsupported("not a pair or a name/value record")),
        }
    }

    fn take_first(fields: &mut Map<String, Value>, candidates: &[&str]) -> Option<Value> {
        candidates.iter().find_map(|field| fields.remove(*field))
    }

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn to_param_value(value: Value) -> ParamValue {
        match value {
            Value::Null => ParamValue::Null,
            Value::Array(items) => ParamValue::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Null => None,
                        Value::String(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
            Value::String(s) => ParamValue::Scalar(s),
            other => ParamValue::Scalar(other.to_string()),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: ToQueryPairs + ?Sized>(obj: &T) -> Result<Vec<(String, ParamValue)>, Error> {
        obj.to_query_pairs()?.collect()
    }

    #[test]
    fn tuples_keep_order() {
        let pairs = collect(&[("b", 1), ("a", 2)]).unwrap();
        let names: Vec<_> = pairs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn tuple_values_may_be_lists_or_null() {
        let pairs = collect(&vec![
            ("x", ParamValue::from(["a", "b"])),
            ("y", ParamValue::Null),
        ])
        .unwrap();
        assert_eq!(
            pairs[0].1,
            ParamValue::List(vec![Some("a".into()), Some("b".into())])
        );
        assert_eq!(pairs[1].1, ParamValue::Null);
    }

    #[test]
    fn btree_map_in_key_order() {
        let mut map = BTreeMap::new();
        map.insert("z", "1");
        map.insert("a", "2");
        let pairs = collect(&map).unwrap();
        assert_eq!(pairs[0].0, "a");
        assert_eq!(pairs[1].0, "z");
    }

    #[test]
    fn hash_map_yields_every_entry() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        let mut names: Vec<_> = collect(&map).unwrap().into_iter().map(|(n, _)| n).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn query_string_decodes_values() {
        let pairs = collect("x=a%20b&flag&y=").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("x".to_string(), ParamValue::Scalar("a b".into())),
                ("flag".to_string(), ParamValue::Null),
                ("y".to_string(), ParamValue::Scalar(String::new())),
            ]
        );
    }

    #[test]
    fn none_is_invalid_argument() {
        let missing: Option<Vec<(&str, i32)>> = None;
        let err = collect(&missing).unwrap_err();
        assert!(err.is_invalid_argument());

        let present = Some(vec![("a", 1)]);
        assert_eq!(collect(&present).unwrap().len(), 1);
    }
}
