//! # MapBuffer
//!
//! Reader for a compact, self-describing binary key-value container:
//! - O(1) construction: only the header is validated
//! - Typed random access by small integer key, decoded lazily per read
//! - Bounds-checked reads that report faults instead of reading garbage
//! - Strings and nested buffers are copied out, never aliased
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Owned bytes (from a writer / transport)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  MapBuffer::new (header + size check)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      MapBuffer                               │
//! │      get_int / get_bool / get_double / is_null               │
//! │      get_string / get_map_buffer / size / data / count       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Entry Table │          │   Dynamic   │
//!   │  (Buckets)  │─offset──▶│    Data     │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MapBufferError, Result};
pub use config::{Config, KeyLookup, Utf8Mode};
pub use buffer::{Bucket, Buckets, Header, MapBuffer, NULL_VALUE};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the mapbuffer crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
