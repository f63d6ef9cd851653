//! Store error types.

use thiserror::Error;

/// Errors from [`super::LogStore`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Underlying storage I/O failed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The stored value could not be decoded as a message log.
    #[error("malformed stored log: {0}")]
    Malformed(String),
}
