//! MapBuffer Module
//!
//! Immutable, self-describing binary key-value container with O(1)
//! construction and lazy, per-access decoding.
//!
//! ## Binary Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (8 bytes)                                        │
//! │   Count: u16 (2) | Padding (2) | BufferSize: u32 (4)    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Entry Table (Count × 12 bytes, insertion order)         │
//! │   [Key: u16][Padding (2)][Value Slot (8)]               │
//! │   ... repeated for each entry ...                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Dynamic Data (variable)                                 │
//! │   String:    [Len: i32][UTF-8 bytes]                    │
//! │   MapBuffer: [Len: i32][nested MapBuffer bytes]         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The value slot holds an inline i32 (ints, bools, null), an f64, or for
//! strings and nested buffers an i32 offset relative to the start of the
//! dynamic data segment. All integers are little-endian.

mod bucket;
mod header;
mod reader;

pub use bucket::{Bucket, Buckets};
pub use header::Header;
pub use reader::MapBuffer;

// =============================================================================
// Layout Constants
// =============================================================================

/// Header size: Count (2) + Padding (2) + BufferSize (4) = 8 bytes
pub const HEADER_SIZE: usize = 8;

/// Key size within a bucket
pub const KEY_SIZE: usize = 2;

/// Padding between the key and the value slot
pub const KEY_PADDING: usize = 2;

/// Value slot size: large enough for an f64
pub const VALUE_SIZE: usize = 8;

/// Bucket size: Key (2) + Padding (2) + Value (8) = 12 bytes
pub const BUCKET_SIZE: usize = KEY_SIZE + KEY_PADDING + VALUE_SIZE;

/// Size of inline ints, offsets and record lengths
pub const INT_SIZE: usize = 4;

/// Size of an inline double
pub const DOUBLE_SIZE: usize = 8;

/// Sentinel stored in a value slot to mark a key as holding no value
pub const NULL_VALUE: i32 = i32::MIN;

/// Byte offset of bucket `index` from the start of the buffer
pub(crate) fn bucket_offset(index: usize) -> usize {
    HEADER_SIZE + index * BUCKET_SIZE
}

/// Byte offset of the value slot of bucket `index`
pub(crate) fn value_offset(index: usize) -> usize {
    bucket_offset(index) + KEY_SIZE + KEY_PADDING
}
