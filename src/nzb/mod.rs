//! NZB file format parser
//!
//! NZB is an XML-based file format used to describe Usenet binary posts.
//! It contains metadata and segment references for efficient binary downloads.
//!
//! Reference: https://sabnzbd.org/wiki/extra/nzb-spec
//!
//! This module is organized into:
//! - `types`: The immutable document model (Nzb, NzbFile, NzbSegment)
//! - `parsing`: XML text to document
//! - `loading`: Byte streams (sync and async) to document

mod loading;
mod parsing;
mod types;

pub use self::loading::{load_nzb, load_nzb_async, load_nzb_with};
pub use self::parsing::parse_nzb;
pub use self::types::{Nzb, NzbFile, NzbSegment};
