//! NZB schema constants
//!
//! Reference: https://sabnzbd.org/wiki/extra/nzb-spec

/// XML namespace every NZB element lives in
pub const NZB_NAMESPACE: &str = "http://www.newzbin.com/DTD/2003/nzb";

/// Namespace-qualified element name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XName {
    /// Namespace URI
    pub namespace: &'static str,
    /// Local name
    pub local: &'static str,
}

impl XName {
    /// Create a name in the NZB namespace
    pub const fn nzb(local: &'static str) -> Self {
        Self {
            namespace: NZB_NAMESPACE,
            local,
        }
    }
}

impl std::fmt::Display for XName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local)
    }
}

pub const NZB_ELEMENT: XName = XName::nzb("nzb");
pub const HEAD_ELEMENT: XName = XName::nzb("head");
pub const META_ELEMENT: XName = XName::nzb("meta");
pub const FILE_ELEMENT: XName = XName::nzb("file");
pub const GROUPS_ELEMENT: XName = XName::nzb("groups");
pub const GROUP_ELEMENT: XName = XName::nzb("group");
pub const SEGMENTS_ELEMENT: XName = XName::nzb("segments");
pub const SEGMENT_ELEMENT: XName = XName::nzb("segment");

// Attributes are unqualified.
pub const TYPE_ATTRIBUTE: &str = "type";
pub const POSTER_ATTRIBUTE: &str = "poster";
pub const DATE_ATTRIBUTE: &str = "date";
pub const SUBJECT_ATTRIBUTE: &str = "subject";
pub const BYTES_ATTRIBUTE: &str = "bytes";
pub const NUMBER_ATTRIBUTE: &str = "number";
