//! Error types for URL building.
//!
//! Parsing itself never fails: [`Url::parse`](crate::Url::parse) is
//! best-effort. Errors only come out of converting caller-supplied objects
//! into query name/value pairs.

use std::fmt;

/// Errors that can occur while building a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was absent, or could not be serialized.
    ///
    /// Raised synchronously, before any work is done.
    InvalidArgument {
        /// Name of the offending argument
        argument: &'static str,
        /// Why the argument was rejected
        reason: &'static str,
    },
    /// A collection element could not be converted into a name/value pair.
    ///
    /// Raised lazily, when the element is reached during iteration.
    UnsupportedShape {
        /// Position of the element within its collection
        index: usize,
        /// What was wrong with the element
        reason: &'static str,
    },
}

impl Error {
    pub(crate) const fn null_object() -> Self {
        Self::InvalidArgument {
            argument: "obj",
            reason: "cannot extract name/value pairs from a null object",
        }
    }

    /// Returns true if this is an [`Error::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns true if this is an [`Error::UnsupportedShape`].
    #[must_use]
    pub const fn is_unsupported_shape(&self) -> bool {
        matches!(self, Self::UnsupportedShape { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument '{argument}': {reason}")
            }
            Self::UnsupportedShape { index, reason } => {
                write!(
                    f,
                    "element {index} cannot be used as a name/value pair: {reason}; \
                     expected a Key/key/Name/name field and a Value/value field"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
