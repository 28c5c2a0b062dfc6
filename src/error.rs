//! Error taxonomy for the gallery data layer.

use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GalleryError {
    /// A required form field was empty after trimming
    #[error("Validation error: '{field}' must not be empty")]
    Validation { field: &'static str },

    /// Stale or bad record position
    #[error("Index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    /// The static seed could not be read or parsed
    #[error("Seed source unavailable: {0}")]
    SourceUnavailable(String),

    /// The persisted snapshot could not be decoded
    #[error("Stored prompts are corrupt: {0}")]
    StorageCorrupt(String),

    /// The durable backend failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GalleryError {
    pub fn validation(field: &'static str) -> Self {
        GalleryError::Validation { field }
    }

    /// Whether startup recovers from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GalleryError::SourceUnavailable(_) | GalleryError::StorageCorrupt(_)
        )
    }
}
