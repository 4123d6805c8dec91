//! Error types for rating lookups.

use thiserror::Error;

/// Result type for `critique` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by matrix lookups.
///
/// Degenerate comparisons (no shared items, zero variance) are not errors:
/// they score 0.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An entity referenced by an operation is not an outer key of the matrix.
    #[error("unknown identifier: {id}")]
    UnknownIdentifier {
        /// `Debug` rendering of the missing key.
        id: String,
    },
}

impl Error {
    pub(crate) fn unknown<K: std::fmt::Debug>(key: &K) -> Self {
        Self::UnknownIdentifier {
            id: format!("{key:?}"),
        }
    }
}
