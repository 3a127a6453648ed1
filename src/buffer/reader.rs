//! MapBuffer Reader
//!
//! Wraps an owned byte sequence and provides typed random access by key.
//! Construction only validates the header; every read is bounds-checked
//! against the owned bytes at access time.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, error, trace};

use crate::config::{Config, KeyLookup, Utf8Mode};
use crate::error::{MapBufferError, Result};

use super::bucket::Buckets;
use super::header::Header;
use super::{bucket_offset, value_offset, DOUBLE_SIZE, INT_SIZE, KEY_SIZE, NULL_VALUE};

/// Immutable binary key-value container
///
/// Reads reinterpret the value slot as the requested type; reading a key as
/// the wrong type is not detected. Strings and nested buffers are always
/// copied out, so results never borrow from the parent.
pub struct MapBuffer {
    /// Owned backing bytes, `bytes.len() == header.buffer_size`
    bytes: Vec<u8>,
    /// Number of buckets, from the header
    count: u16,
    config: Config,
}

impl MapBuffer {
    /// Construct a MapBuffer with the default configuration
    ///
    /// Fails if the declared buffer size disagrees with `bytes.len()`.
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        Self::with_config(bytes, Config::default())
    }

    /// Construct a MapBuffer with an explicit configuration
    pub fn with_config(bytes: Vec<u8>, config: Config) -> Result<Self> {
        let header = Header::parse(&bytes)?;

        if header.buffer_size as usize != bytes.len() {
            error!(
                "Data size does not match, expected {} found: {}",
                header.buffer_size,
                bytes.len()
            );
            return Err(MapBufferError::SizeMismatch {
                declared: header.buffer_size,
                actual: bytes.len(),
            });
        }

        debug!(count = header.count, size = bytes.len(), "MapBuffer constructed");

        Ok(Self {
            bytes,
            count: header.count,
            config,
        })
    }

    /// Read an entire file into an owned buffer and construct it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Read an entire file and construct it with an explicit configuration
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "Loaded MapBuffer file");
        Self::with_config(bytes, config)
    }

    /// Drain a reader into an owned buffer and construct it
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::new(bytes)
    }

    // =========================================================================
    // Typed Reads
    // =========================================================================

    pub fn get_int(&self, key: u16) -> Result<i32> {
        let offset = self.value_offset(key)?;
        Ok(i32::from_le_bytes(self.read_array::<INT_SIZE>(offset as i64)?))
    }

    /// `get_int(key) != 0`
    pub fn get_bool(&self, key: u16) -> Result<bool> {
        Ok(self.get_int(key)? != 0)
    }

    pub fn get_double(&self, key: u16) -> Result<f64> {
        let offset = self.value_offset(key)?;
        Ok(f64::from_le_bytes(self.read_array::<DOUBLE_SIZE>(offset as i64)?))
    }

    /// True if the slot's first four bytes hold `NULL_VALUE`
    pub fn is_null(&self, key: u16) -> Result<bool> {
        Ok(self.get_int(key)? == NULL_VALUE)
    }

    /// Copy a string record out of the dynamic data segment
    pub fn get_string(&self, key: u16) -> Result<String> {
        let payload = self.dynamic_record(key)?;

        match self.config.utf8 {
            Utf8Mode::Strict => std::str::from_utf8(payload)
                .map(str::to_owned)
                .map_err(|_| MapBufferError::InvalidUtf8 { key }),
            Utf8Mode::Lossy => Ok(String::from_utf8_lossy(payload).into_owned()),
        }
    }

    /// Copy a nested MapBuffer record into a new, independently owned buffer
    ///
    /// The nested bytes go through full construction validation and inherit
    /// this buffer's configuration.
    pub fn get_map_buffer(&self, key: u16) -> Result<MapBuffer> {
        let payload = self.dynamic_record(key)?.to_vec();
        debug!(key, len = payload.len(), "Extracting nested MapBuffer");
        MapBuffer::with_config(payload, self.config)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Total byte length
    pub fn size(&self) -> u32 {
        // Equal to the header's u32 buffer_size, checked at construction
        self.bytes.len() as u32
    }

    /// Read-only view of the backing bytes, for pass-through
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of entries
    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Whether a bucket with this key exists
    pub fn contains_key(&self, key: u16) -> Result<bool> {
        match self.find_bucket(key) {
            Ok(_) => Ok(true),
            Err(MapBufferError::KeyNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Iterate the entry table in insertion order
    pub fn buckets(&self) -> Buckets<'_> {
        Buckets::new(&self.bytes, self.count)
    }

    /// Iterate the stored keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = Result<u16>> + '_ {
        self.buckets().map(|bucket| bucket.map(|b| b.key()))
    }

    /// Give up ownership of the backing bytes without copying
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.bytes)
    }

    // =========================================================================
    // Offset Arithmetic
    // =========================================================================

    /// Start of the dynamic data segment: where bucket `count` would begin
    fn dynamic_data_offset(&self) -> usize {
        bucket_offset(self.count as usize)
    }

    /// Absolute offset of the value slot belonging to `key`
    fn value_offset(&self, key: u16) -> Result<usize> {
        Ok(value_offset(self.find_bucket(key)?))
    }

    /// Index of the bucket whose stored key equals `key`
    fn find_bucket(&self, key: u16) -> Result<usize> {
        let found = match self.config.key_lookup {
            KeyLookup::Positional => self.positional(key)?,
            KeyLookup::Scan => self.scan(key)?,
            // A bucket at index `key` carrying `key` wins over earlier duplicates
            KeyLookup::Auto => match self.positional(key) {
                Ok(Some(index)) => Some(index),
                Ok(None) | Err(MapBufferError::OutOfBounds { .. }) => {
                    trace!(key, "Positional lookup missed, scanning entry table");
                    self.scan(key)?
                }
                Err(e) => return Err(e),
            },
        };

        found.ok_or(MapBufferError::KeyNotFound { key })
    }

    fn positional(&self, key: u16) -> Result<Option<usize>> {
        let index = key as usize;
        if index >= self.count as usize {
            return Ok(None);
        }
        Ok((self.key_at(index)? == key).then_some(index))
    }

    fn scan(&self, key: u16) -> Result<Option<usize>> {
        for index in 0..self.count as usize {
            if self.key_at(index)? == key {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn key_at(&self, index: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array::<KEY_SIZE>(bucket_offset(index) as i64)?))
    }

    /// Payload bytes of the length-prefixed record referenced by `key`
    fn dynamic_record(&self, key: u16) -> Result<&[u8]> {
        let record = self.dynamic_data_offset() as i64 + i64::from(self.get_int(key)?);
        let len = i32::from_le_bytes(self.read_array::<INT_SIZE>(record)?);
        self.read_range(record + INT_SIZE as i64, i64::from(len))
    }

    // =========================================================================
    // Bounds-checked Reads
    // =========================================================================

    fn read_range(&self, offset: i64, len: i64) -> Result<&[u8]> {
        let size = self.bytes.len();
        let out_of_bounds = || MapBufferError::OutOfBounds { offset, len, size };

        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let n = usize::try_from(len).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(n).ok_or_else(out_of_bounds)?;

        self.bytes.get(start..end).ok_or_else(out_of_bounds)
    }

    fn read_array<const N: usize>(&self, offset: i64) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_range(offset, N as i64)?);
        Ok(out)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl TryFrom<Vec<u8>> for MapBuffer {
    type Error = MapBufferError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for MapBuffer {
    type Error = MapBufferError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }
}

impl TryFrom<Bytes> for MapBuffer {
    type Error = MapBufferError;

    fn try_from(bytes: Bytes) -> Result<Self> {
        Self::new(Vec::from(bytes))
    }
}

impl AsRef<[u8]> for MapBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for MapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapBuffer")
            .field("count", &self.count)
            .field("size", &self.bytes.len())
            .field("config", &self.config)
            .finish()
    }
}
