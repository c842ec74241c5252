//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use fluent_url::prelude::*;
//!
//! let mut url = Url::parse("https://example.com");
//! url.append_path_segment("api", false)
//!     .set_query_param_with("x", ParamValue::Null, false, NullValueHandling::NameOnly);
//! assert_eq!(url.to_string(), "https://example.com/api?x");
//! ```

pub use crate::{
    // Core types
    NullValueHandling, ParamValue, PathSegments, QueryParam, QueryParamCollection, Url,
    // Conversion
    QueryPairs, ToQueryPairs,
    // Errors
    Error,
};

#[cfg(feature = "serde")]
pub use crate::Serialized;
