//! Text encodings for NZB byte streams
//!
//! NZB files are traditionally ISO-8859-1. `encoding_rs` follows the WHATWG
//! label table, which maps "iso-8859-1" to windows-1252, so Latin-1 is kept as
//! its own variant with a direct byte to code point mapping.

use encoding_rs::Encoding;
use tracing::debug;

/// Encoding used to turn NZB bytes into text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextEncoding {
    /// ISO-8859-1: each byte maps directly to a Unicode code point
    #[default]
    Latin1,
    /// Any encoding supported by `encoding_rs`
    Other(&'static Encoding),
}

/// Encoding used when the caller does not pick one
pub const DEFAULT_ENCODING: TextEncoding = TextEncoding::Latin1;

impl TextEncoding {
    /// Look up an encoding by label (e.g. "iso-8859-1", "utf-8", "windows-1252")
    ///
    /// ```
    /// use nzb_doc::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::for_label("latin1"), Some(TextEncoding::Latin1));
    /// assert_eq!(TextEncoding::for_label("UTF-8"), Some(TextEncoding::Other(encoding_rs::UTF_8)));
    /// assert_eq!(TextEncoding::for_label("klingon"), None);
    /// ```
    pub fn for_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "latin-1" | "l1" => {
                Some(Self::Latin1)
            }
            other => Encoding::for_label(other.as_bytes()).map(Self::Other),
        }
    }

    /// Canonical encoding name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Other(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes` to text
    ///
    /// A UTF-8 or UTF-16 byte order mark takes precedence over `self` and is
    /// stripped. Malformed sequences become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        if let Some((bom_encoding, bom_len)) = Encoding::for_bom(bytes) {
            if *self != Self::Other(bom_encoding) {
                debug!(
                    "Byte order mark overrides {} with {}",
                    self.name(),
                    bom_encoding.name()
                );
            }
            let (text, _) = bom_encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return text.into_owned();
        }

        match self {
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Other(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                if had_errors {
                    debug!("Replaced malformed {} sequences", encoding.name());
                }
                text.into_owned()
            }
        }
    }
}

impl From<&'static Encoding> for TextEncoding {
    fn from(encoding: &'static Encoding) -> Self {
        Self::Other(encoding)
    }
}
