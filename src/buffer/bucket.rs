//! Entry table buckets
//!
//! Sequential iteration over the entry table, in insertion order.

use crate::error::{MapBufferError, Result};

use super::{bucket_offset, BUCKET_SIZE, KEY_PADDING, KEY_SIZE, NULL_VALUE, VALUE_SIZE};

/// A copy of one entry table bucket: key plus raw value slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    key: u16,
    slot: [u8; VALUE_SIZE],
}

impl Bucket {
    pub(crate) fn from_bytes(bytes: &[u8; BUCKET_SIZE]) -> Self {
        let mut slot = [0u8; VALUE_SIZE];
        slot.copy_from_slice(&bytes[KEY_SIZE + KEY_PADDING..]);
        Self {
            key: u16::from_le_bytes([bytes[0], bytes[1]]),
            slot,
        }
    }

    pub fn key(&self) -> u16 {
        self.key
    }

    /// Raw value slot bytes
    pub fn slot(&self) -> &[u8; VALUE_SIZE] {
        &self.slot
    }

    /// First four slot bytes as an i32 (ints, bools, nulls and dynamic offsets)
    pub fn as_int(&self) -> i32 {
        i32::from_le_bytes([self.slot[0], self.slot[1], self.slot[2], self.slot[3]])
    }

    pub fn as_bool(&self) -> bool {
        self.as_int() != 0
    }

    pub fn as_double(&self) -> f64 {
        f64::from_le_bytes(self.slot)
    }

    pub fn is_null(&self) -> bool {
        self.as_int() == NULL_VALUE
    }
}

/// Iterator over the buckets of a MapBuffer
///
/// Yields an error and stops if the entry table runs past the end of the
/// buffer.
pub struct Buckets<'a> {
    bytes: &'a [u8],
    index: usize,
    count: usize,
}

impl<'a> Buckets<'a> {
    pub(super) fn new(bytes: &'a [u8], count: u16) -> Self {
        Self {
            bytes,
            index: 0,
            count: count as usize,
        }
    }
}

impl<'a> Iterator for Buckets<'a> {
    type Item = Result<Bucket>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let offset = bucket_offset(self.index);
        let raw = offset
            .checked_add(BUCKET_SIZE)
            .and_then(|end| self.bytes.get(offset..end));

        match raw {
            Some(raw) => {
                self.index += 1;
                let mut bucket = [0u8; BUCKET_SIZE];
                bucket.copy_from_slice(raw);
                Some(Ok(Bucket::from_bytes(&bucket)))
            }
            None => {
                self.index = self.count;
                Some(Err(MapBufferError::OutOfBounds {
                    offset: offset as i64,
                    len: BUCKET_SIZE as i64,
                    size: self.bytes.len(),
                }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.index))
    }
}
