//! Loading NZB documents from byte streams
//!
//! The whole stream is read and decoded to text before parsing; see
//! [`parse_nzb`](super::parse_nzb) for the parsing rules.

use super::parsing::parse_nzb;
use super::types::Nzb;
use crate::config::LoadConfig;
use crate::{NzbError, Result};
use std::io::Read;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

/// Load an NZB from a reader using the default ISO-8859-1 encoding
///
/// # Example
/// ```
/// use nzb_doc::load_nzb;
///
/// let data: &[u8] = b"<nzb xmlns=\"http://www.newzbin.com/DTD/2003/nzb\">\
///     <file poster=\"J\xF6rg\" date=\"1\" subject=\"s\"/></nzb>";
///
/// let nzb = load_nzb(data).unwrap();
/// assert_eq!(nzb.files()[0].poster(), "J\u{f6}rg");
/// ```
pub fn load_nzb<R: Read>(reader: R) -> Result<Nzb> {
    load_nzb_with(reader, &LoadConfig::default())
}

/// Load an NZB from a reader using the given configuration
pub fn load_nzb_with<R: Read>(reader: R, config: &LoadConfig) -> Result<Nzb> {
    let mut bytes = Vec::new();
    match config.max_bytes {
        Some(limit) => {
            reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes)?;
        }
    }

    decode_and_parse(&bytes, config)
}

/// Load an NZB from an async reader using the given configuration
///
/// The stream is read to the end before parsing starts; parsing itself does
/// not yield.
pub async fn load_nzb_async<R: AsyncRead + Unpin>(reader: R, config: &LoadConfig) -> Result<Nzb> {
    let mut bytes = Vec::new();
    match config.max_bytes {
        Some(limit) => {
            reader
                .take(limit.saturating_add(1))
                .read_to_end(&mut bytes)
                .await?;
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes).await?;
        }
    }

    decode_and_parse(&bytes, config)
}

fn decode_and_parse(bytes: &[u8], config: &LoadConfig) -> Result<Nzb> {
    if let Some(limit) = config.max_bytes {
        if bytes.len() as u64 > limit {
            return Err(NzbError::InputTooLarge { limit });
        }
    }

    debug!(
        "Read {} bytes of NZB data, decoding as {}",
        bytes.len(),
        config.encoding.name()
    );

    let text = config.encoding.decode(bytes);
    parse_nzb(&text)
}
