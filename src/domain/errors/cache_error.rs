//! Cache error types.

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while reading or writing a local cache.
///
/// These never reach a caller directly; the request pipeline logs them and
/// reports [`ImageError::Pipeline`](super::ImageError::Pipeline) instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// I/O error during cache operation.
    #[error("IO error: {0}")]
    IoError(String),
    /// The persisted record could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CacheError {
    /// Creates an I/O error with context.
    #[must_use]
    pub fn io(context: &str, err: impl std::fmt::Display) -> Self {
        Self::IoError(format!("{context}: {err}"))
    }
}
