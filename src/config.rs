//! Configuration for MapBuffer readers
//!
//! Centralized read configuration with sensible defaults.

/// Read configuration carried by every MapBuffer instance
///
/// Nested buffers extracted with `get_map_buffer` inherit their parent's
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// How a key is resolved to its bucket in the entry table
    pub key_lookup: KeyLookup,

    /// How string payloads that are not valid UTF-8 are handled
    pub utf8: Utf8Mode,
}

/// Key lookup strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyLookup {
    /// Bucket index equals the key; the stored key must match
    Positional,

    /// Linear scan of the entry table in insertion order
    Scan,

    /// Positional fast path, falling back to a scan when the bucket at
    /// index `key` carries a different key or lies past the end of the
    /// buffer
    ///
    /// With duplicate keys the positional hit is returned, so this can
    /// disagree with `Scan`, which always returns the first match.
    #[default]
    Auto,
}

/// UTF-8 decoding policy for string payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// Reject invalid UTF-8 with `MapBufferError::InvalidUtf8`
    #[default]
    Strict,

    /// Replace invalid sequences with U+FFFD
    Lossy,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the key lookup strategy
    pub fn key_lookup(mut self, lookup: KeyLookup) -> Self {
        self.config.key_lookup = lookup;
        self
    }

    /// Set the UTF-8 decoding policy
    pub fn utf8(mut self, mode: Utf8Mode) -> Self {
        self.config.utf8 = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
