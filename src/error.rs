//! NZB error types

use thiserror::Error;

/// NZB loading and parsing errors
#[derive(Error, Debug)]
pub enum NzbError {
    /// Input text was empty or contained only whitespace
    #[error("NZB text must not be empty")]
    EmptyInput,

    /// XML syntax error reported by the tokenizer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formedness violation detected while building the element tree
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// Well-formed XML that is not an NZB document
    #[error("Invalid NZB format: {0}")]
    InvalidFormat(String),

    /// IO error while reading an NZB stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream exceeded the configured read limit
    #[error("Input exceeds limit of {limit} bytes")]
    InputTooLarge {
        /// Configured maximum number of bytes
        limit: u64,
    },
}

impl NzbError {
    /// Returns true if the input was XML but not a valid NZB document
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, NzbError::InvalidFormat(_))
    }
}

/// Result type alias using NzbError
pub type Result<T> = std::result::Result<T, NzbError>;
