//! Error types for the core library.

use thiserror::Error;

/// Result type alias for record operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Outcomes of a record operation that did not succeed.
///
/// Both kinds are definitive: callers decide what they mean, nothing here is
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A record already exists under the given id.
    #[error("record exists")]
    RecordExists,
    /// No record is stored under the given id.
    #[error("record not found")]
    RecordNotFound,
}
