#![doc = include_str!("../README.md")]

mod coerce;
mod config;
/// Text encodings for NZB byte streams
pub mod encoding;
mod error;
/// NZB file format parser
pub mod nzb;
/// NZB namespace and element/attribute names
pub mod schema;
mod xml;

pub use config::LoadConfig;
pub use encoding::{DEFAULT_ENCODING, TextEncoding};
pub use error::{NzbError, Result};
pub use nzb::{Nzb, NzbFile, NzbSegment, load_nzb, load_nzb_async, load_nzb_with, parse_nzb};
pub use schema::NZB_NAMESPACE;
