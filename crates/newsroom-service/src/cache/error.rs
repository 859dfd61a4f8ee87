//! Cache failure modes.

use newsroom_core::NewsroomError;
use thiserror::Error;

/// Failures raised by a [`CacheStore`](super::CacheStore).
///
/// The collection cache recovers from both locally; they never reach a
/// caller of a list or write operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The backing store could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    /// A payload could not be encoded, or a stored payload could not be read
    /// back as the expected collection.
    #[error("cache payload rejected: {0}")]
    SerializationFailed(String),
}

/// Result alias for cache store operations.
pub type CacheResult<T> = Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationFailed(err.to_string())
    }
}

impl From<CacheError> for NewsroomError {
    fn from(err: CacheError) -> Self {
        Self::Cache(err.to_string())
    }
}
