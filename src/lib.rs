//! A mutable, round-trippable URL type for building HTTP requests.
//!
//! [`Url`] parses absolute and relative URLs permissively, lets you change
//! them through chained mutators, and serializes them back. A URL that has
//! not been modified serializes to exactly the string it was parsed from:
//! slash style, escape case, and query ordering are all preserved.
//!
//! # Quick Start
//!
//! ```rust
//! use fluent_url::Url;
//!
//! let mut url = Url::parse("https://api.example.com/v1?page=1");
//! url.append_path_segment("users", false)
//!     .set_query_param("page", 2)
//!     .append_query_param("tag", ["a", "b"])
//!     .set_fragment("results");
//!
//! assert_eq!(
//!     url.to_string(),
//!     "https://api.example.com/v1/users?page=2&tag=a&tag=b#results"
//! );
//! ```
//!
//! # Query parameters
//!
//! Query parameters are an ordered list, not a map: a name may appear any
//! number of times and every entry keeps its position. Setting a parameter
//! replaces existing values of that name in place; appending adds after the
//! last entry. What happens on a null value is controlled by
//! [`NullValueHandling`].
//!
//! ```rust
//! use fluent_url::{NullValueHandling, ParamValue, Url};
//!
//! let mut url = Url::parse("http://x.com?y=2");
//! url.set_query_params_with(
//!     [("x", ParamValue::from(1)), ("y", ParamValue::Null), ("z", "foo".into())],
//!     NullValueHandling::NameOnly,
//! )?;
//! assert_eq!(url.to_string(), "http://x.com?y&x=1&z=foo");
//! # Ok::<(), fluent_url::Error>(())
//! ```
//!
//! # Encoding
//!
//! | Component | Encoding applied |
//! |-----------|------------------|
//! | Path segment | illegal characters only, or everything reserved with `fully_encode` |
//! | Query name | illegal characters only |
//! | Query value | everything reserved, unless set as already encoded |
//! | Fragment | none |
//!
//! Existing `%XX` escapes are never encoded twice by the illegal-character
//! encoder. See [`encoding`].
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Url`] and the [`Serialized`]
//!   adapter for building query strings from any serializable value.
//! - `http`: conversions between [`Url`] and `http::Uri`.
//! - `tracing`: debug and trace events from the parser and encoder.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod tracing;

pub mod combine;
mod constants;
pub mod encoding;
mod error;
mod pairs;
mod path;
pub mod prelude;
mod query;
mod url;
pub mod util;

pub use constants::{MAX_ENCODE_CHUNK_LENGTH, SECURE_SCHEMES};
pub use error::Error;
#[cfg(feature = "serde")]
pub use pairs::Serialized;
pub use pairs::{QueryPairs, ToQueryPairs};
pub use path::PathSegments;
pub use query::{NullValueHandling, ParamValue, QueryParam, QueryParamCollection};
pub use url::Url;
