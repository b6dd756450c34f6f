// Cache error types.
// Only `delete` surfaces these to callers; reads and writes degrade silently.

use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend was unreachable at call time.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// A value could not be encoded, or a stored representation could not be
    /// decoded.
    #[error("cache serialization error: {0}")]
    Serialization(String),

    /// The backend rejected an otherwise well-formed operation.
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
