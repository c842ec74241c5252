//! Constants shared across the encoding and parsing code.

/// Longest run of characters encoded in a single pass.
///
/// Longer inputs are split on character boundaries into runs of at most
/// this many characters, encoded independently, and concatenated.
pub const MAX_ENCODE_CHUNK_LENGTH: usize = 65_519;

/// Schemes reported as secure by [`Url::is_secure_scheme`](crate::Url::is_secure_scheme).
pub const SECURE_SCHEMES: [&str; 2] = ["https", "wss"];
