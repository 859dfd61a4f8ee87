//! Result type aliases for Newsroom.

use crate::NewsroomError;

/// A specialized `Result` type for Newsroom operations.
pub type NewsroomResult<T> = Result<T, NewsroomError>;
