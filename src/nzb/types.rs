//! NZB document model
//!
//! All types are immutable once built. Byte totals are computed by the
//! constructors, so a file's size always equals the sum of its segments and a
//! document's size the sum of its files.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;

/// NZB document containing metadata and file references
///
/// # Example
///
/// ```
/// use nzb_doc::{Nzb, NzbFile, NzbSegment};
/// use chrono::{DateTime, Local};
/// use std::collections::HashMap;
///
/// let date = DateTime::from_timestamp(1234567890, 0).unwrap().with_timezone(&Local);
/// let file = NzbFile::new(
///     "user@example.com",
///     date,
///     "Test [1/1]",
///     vec!["alt.binaries.test".to_string()],
///     vec![
///         NzbSegment::new(500, 1, "part1@example.com"),
///         NzbSegment::new(700, 2, "part2@example.com"),
///     ],
/// );
/// let nzb = Nzb::new(HashMap::new(), vec![file]);
///
/// assert_eq!(nzb.files()[0].bytes(), 1200);
/// assert_eq!(nzb.bytes(), 1200);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Nzb {
    meta: HashMap<String, String>,
    files: Vec<NzbFile>,
    bytes: u64,
}

impl Nzb {
    /// Create a document; the total size is computed from `files`
    pub fn new(meta: HashMap<String, String>, files: Vec<NzbFile>) -> Self {
        let bytes = files
            .iter()
            .fold(0u64, |total, file| total.saturating_add(file.bytes));

        Self { meta, files, bytes }
    }

    /// Metadata from the `<head>` section, keyed by `type` (e.g. title, password, tag, category)
    pub fn meta(&self) -> &HashMap<String, String> {
        &self.meta
    }

    /// Look up a single metadata value
    pub fn meta_value(&self, kind: &str) -> Option<&str> {
        self.meta.get(kind).map(String::as_str)
    }

    /// Files described in this NZB, in document order
    pub fn files(&self) -> &[NzbFile] {
        &self.files
    }

    /// Total size of all files in bytes
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Returns true if the document lists no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of segments across all files
    pub fn segment_count(&self) -> usize {
        self.files.iter().map(NzbFile::segment_count).sum()
    }
}

impl fmt::Display for Nzb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Files: {}, Size: {} bytes", self.files.len(), self.bytes)
    }
}

/// A single file entry in an NZB
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NzbFile {
    poster: String,
    date: DateTime<Local>,
    subject: String,
    groups: Vec<String>,
    segments: Vec<NzbSegment>,
    bytes: u64,
}

impl NzbFile {
    /// Create a file entry; the total size is computed from `segments`
    pub fn new(
        poster: impl Into<String>,
        date: DateTime<Local>,
        subject: impl Into<String>,
        groups: Vec<String>,
        segments: Vec<NzbSegment>,
    ) -> Self {
        let bytes = segments
            .iter()
            .fold(0u64, |total, segment| total.saturating_add(segment.bytes));

        Self {
            poster: poster.into(),
            date,
            subject: subject.into(),
            groups,
            segments,
            bytes,
        }
    }

    /// Poster name/email
    pub fn poster(&self) -> &str {
        &self.poster
    }

    /// When the server saw this file, in local time
    pub fn date(&self) -> DateTime<Local> {
        self.date
    }

    /// `date` as Unix seconds
    pub fn timestamp(&self) -> i64 {
        self.date.timestamp()
    }

    /// Subject line of the Usenet article
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Newsgroups where this file was posted
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Segments (parts) of this file, in document order
    pub fn segments(&self) -> &[NzbSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total size of all segments in bytes
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl fmt::Display for NzbFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Poster: {}, Size: {} bytes",
            self.subject, self.poster, self.bytes
        )
    }
}

/// A segment (part) of a file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NzbSegment {
    bytes: u64,
    number: i32,
    message_id: String,
}

impl NzbSegment {
    /// Create a segment
    pub fn new(bytes: u64, number: i32, message_id: impl Into<String>) -> Self {
        Self {
            bytes,
            number,
            message_id: message_id.into(),
        }
    }

    /// Size of this segment in bytes
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Segment number as written in the NZB (normally 1-based)
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Message-ID for retrieving this segment
    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}

impl fmt::Display for NzbSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} - {}, Size: {} bytes",
            self.number, self.message_id, self.bytes
        )
    }
}
