//! Error types for MapBuffer
//!
//! Provides a unified error type for construction and access faults.

use thiserror::Error;

/// Result type alias using MapBufferError
pub type Result<T> = std::result::Result<T, MapBufferError>;

/// Unified error type for MapBuffer operations
#[derive(Debug, Error)]
pub enum MapBufferError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Construction Errors
    // -------------------------------------------------------------------------
    #[error("Buffer too small for header: {len} bytes")]
    HeaderTruncated { len: usize },

    #[error("Data size does not match, expected {declared} found: {actual}")]
    SizeMismatch { declared: u32, actual: usize },

    // -------------------------------------------------------------------------
    // Access Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {key}")]
    KeyNotFound { key: u16 },

    #[error("Read of {len} bytes at offset {offset} out of bounds (size={size})")]
    OutOfBounds { offset: i64, len: i64, size: usize },

    #[error("Invalid UTF-8 in string value for key {key}")]
    InvalidUtf8 { key: u16 },
}

impl MapBufferError {
    /// True for errors raised while constructing a buffer, as opposed to reading one
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            MapBufferError::HeaderTruncated { .. } | MapBufferError::SizeMismatch { .. }
        )
    }
}
