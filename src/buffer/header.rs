//! MapBuffer header.

use crate::error::{MapBufferError, Result};

use super::HEADER_SIZE;

/// Fixed-size header at the start of every MapBuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of buckets in the entry table
    pub count: u16,
    /// Total byte length declared by the writer
    pub buffer_size: u32,
}

impl Header {
    /// Parse the header from the first `HEADER_SIZE` bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let header = bytes
            .get(..HEADER_SIZE)
            .ok_or(MapBufferError::HeaderTruncated { len: bytes.len() })?;

        Ok(Self {
            count: u16::from_le_bytes([header[0], header[1]]),
            buffer_size: u32::from_le_bytes([header[4], header[5], header[6], header[7]]),
        })
    }
}
