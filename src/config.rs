//! NZB loading configuration

use crate::encoding::TextEncoding;

/// Options for reading an NZB from a byte stream
///
/// # Example
///
/// ```
/// use nzb_doc::{LoadConfig, TextEncoding};
///
/// // Defaults: ISO-8859-1, no size limit
/// let config = LoadConfig::new();
/// assert_eq!(config.encoding, TextEncoding::Latin1);
///
/// // UTF-8 input, refuse anything over 64 MiB
/// let config = LoadConfig::new()
///     .with_encoding(encoding_rs::UTF_8)
///     .with_max_bytes(64 * 1024 * 1024);
/// assert_eq!(config.max_bytes, Some(67_108_864));
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadConfig {
    /// Encoding used to decode the stream
    ///
    /// A byte order mark in the stream takes precedence.
    ///
    /// Default: ISO-8859-1
    pub encoding: TextEncoding,

    /// Maximum number of bytes to read before giving up
    ///
    /// Default: `None` (unlimited)
    pub max_bytes: Option<u64>,
}

impl LoadConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the stream with the given encoding
    pub fn with_encoding(mut self, encoding: impl Into<TextEncoding>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Fail with [`NzbError::InputTooLarge`](crate::NzbError::InputTooLarge)
    /// if the stream is longer than `max_bytes`
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }
}
