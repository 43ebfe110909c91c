//! NZB document parsing

use super::types::{Nzb, NzbFile, NzbSegment};
use crate::coerce::{parse_or_default, text_or_empty};
use crate::schema::{
    BYTES_ATTRIBUTE, DATE_ATTRIBUTE, FILE_ELEMENT, GROUP_ELEMENT, GROUPS_ELEMENT, HEAD_ELEMENT,
    META_ELEMENT, NUMBER_ATTRIBUTE, NZB_ELEMENT, POSTER_ATTRIBUTE, SEGMENT_ELEMENT,
    SEGMENTS_ELEMENT, SUBJECT_ATTRIBUTE, TYPE_ATTRIBUTE,
};
use crate::xml::{Element, parse_document};
use crate::{NzbError, Result};
use chrono::{DateTime, Local, Utc};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, trace};

/// Parse an NZB file from XML text
///
/// The root element must be `nzb` in the `http://www.newzbin.com/DTD/2003/nzb`
/// namespace. Optional elements (`head`, `groups`, `segments`) may be absent,
/// and missing or malformed attributes fall back to empty strings and zeros.
///
/// # Errors
///
/// - [`NzbError::EmptyInput`] if `xml` is empty or whitespace-only
/// - [`NzbError::Xml`] / [`NzbError::MalformedXml`] if `xml` is not well-formed
/// - [`NzbError::InvalidFormat`] if the root `nzb` element is missing
///
/// # Example
/// ```
/// use nzb_doc::parse_nzb;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
/// <nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
///   <head>
///     <meta type="title">Example File</meta>
///   </head>
///   <file poster="user@example.com" date="1234567890" subject="Example [1/1]">
///     <groups>
///       <group>alt.binaries.test</group>
///     </groups>
///     <segments>
///       <segment bytes="768000" number="1">part1of1@example.com</segment>
///     </segments>
///   </file>
/// </nzb>"#;
///
/// let nzb = parse_nzb(xml).unwrap();
/// assert_eq!(nzb.files().len(), 1);
/// assert_eq!(nzb.files()[0].segments().len(), 1);
/// assert_eq!(nzb.bytes(), 768000);
/// ```
pub fn parse_nzb(xml: &str) -> Result<Nzb> {
    if xml.trim().is_empty() {
        return Err(NzbError::EmptyInput);
    }

    let root = parse_document(xml)?;

    if !root.is(&NZB_ELEMENT) {
        return Err(NzbError::InvalidFormat(
            "Could not find required 'nzb' element.".to_string(),
        ));
    }

    let meta = parse_meta(&root);
    let files: Vec<NzbFile> = root.elements(&FILE_ELEMENT).map(parse_file).collect();
    let nzb = Nzb::new(meta, files);

    debug!(
        "Parsed NZB with {} files, {} segments, {} bytes",
        nzb.files().len(),
        nzb.segment_count(),
        nzb.bytes()
    );

    Ok(nzb)
}

impl FromStr for Nzb {
    type Err = NzbError;

    fn from_str(s: &str) -> Result<Self> {
        parse_nzb(s)
    }
}

fn parse_meta(root: &Element) -> HashMap<String, String> {
    let Some(head) = root.element(&HEAD_ELEMENT) else {
        return HashMap::new();
    };

    let mut meta = HashMap::new();
    for element in head.elements(&META_ELEMENT) {
        match element.attribute(TYPE_ATTRIBUTE) {
            Some(kind) => {
                meta.insert(kind.to_string(), element.value().to_string());
            }
            None => trace!("Skipping <meta> without type attribute"),
        }
    }
    meta
}

fn parse_file(element: &Element) -> NzbFile {
    let poster = text_or_empty(element, POSTER_ATTRIBUTE);
    let date = from_unix_timestamp(parse_or_default(text_or_empty(element, DATE_ATTRIBUTE)));
    let subject = text_or_empty(element, SUBJECT_ATTRIBUTE);

    let groups: Vec<String> = element
        .element(&GROUPS_ELEMENT)
        .map(|groups| {
            groups
                .elements(&GROUP_ELEMENT)
                .map(|group| group.value().to_string())
                .collect()
        })
        .unwrap_or_default();

    let segments: Vec<NzbSegment> = element
        .element(&SEGMENTS_ELEMENT)
        .map(|segments| segments.elements(&SEGMENT_ELEMENT).map(parse_segment).collect())
        .unwrap_or_default();

    NzbFile::new(poster, date, subject, groups, segments)
}

fn parse_segment(element: &Element) -> NzbSegment {
    // Sizes are 64-bit signed in the format; negatives become 0.
    let bytes = u64::try_from(parse_or_default::<i64>(text_or_empty(element, BYTES_ATTRIBUTE)))
        .unwrap_or_default();
    let number = parse_or_default(text_or_empty(element, NUMBER_ATTRIBUTE));

    NzbSegment::new(bytes, number, element.value())
}

/// Convert Unix seconds to local time; out-of-range values map to the epoch
fn from_unix_timestamp(seconds: i64) -> DateTime<Local> {
    DateTime::from_timestamp(seconds, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nzb_simple() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">Test File</meta>
  </head>
  <file poster="user@example.com" date="1234567890" subject="Test [1/1]">
    <groups>
      <group>alt.binaries.test</group>
    </groups>
    <segments>
      <segment bytes="768000" number="1">part1of1@example.com</segment>
    </segments>
  </file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();

        assert_eq!(nzb.meta_value("title"), Some("Test File"));
        assert_eq!(nzb.files().len(), 1);

        let file = &nzb.files()[0];
        assert_eq!(file.poster(), "user@example.com");
        assert_eq!(file.timestamp(), 1234567890);
        assert_eq!(file.subject(), "Test [1/1]");
        assert_eq!(file.groups(), ["alt.binaries.test"]);
        assert_eq!(file.segments().len(), 1);

        let seg = &file.segments()[0];
        assert_eq!(seg.bytes(), 768000);
        assert_eq!(seg.number(), 1);
        assert_eq!(seg.message_id(), "part1of1@example.com");
    }

    #[test]
    fn test_parse_nzb_multiple_files() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file poster="user1@example.com" date="1234567890" subject="File 1">
    <segments>
      <segment bytes="50000" number="1">file1seg1@example.com</segment>
    </segments>
  </file>
  <file poster="user2@example.com" date="1234567900" subject="File 2">
    <segments>
      <segment bytes="75000" number="1">file2seg1@example.com</segment>
      <segment bytes="25000" number="2">file2seg2@example.com</segment>
    </segments>
  </file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        assert_eq!(nzb.files().len(), 2);
        assert_eq!(nzb.files()[0].subject(), "File 1");
        assert_eq!(nzb.files()[1].subject(), "File 2");
        assert_eq!(nzb.files()[0].bytes(), 50000);
        assert_eq!(nzb.files()[1].bytes(), 100000);
        assert_eq!(nzb.bytes(), 150000);
    }

    #[test]
    fn test_parse_nzb_meta_tags() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">My Download</meta>
    <meta type="password">secret123</meta>
    <meta>untyped</meta>
    <meta type="tag">linux</meta>
    <meta type="category">software</meta>
  </head>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        assert_eq!(nzb.meta().len(), 4);
        assert_eq!(nzb.meta_value("title"), Some("My Download"));
        assert_eq!(nzb.meta_value("password"), Some("secret123"));
        assert_eq!(nzb.meta_value("tag"), Some("linux"));
        assert_eq!(nzb.meta_value("category"), Some("software"));
    }

    #[test]
    fn test_parse_nzb_duplicate_meta_last_wins() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="password">first</meta>
    <meta type="password">second</meta>
  </head>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        assert_eq!(nzb.meta().len(), 1);
        assert_eq!(nzb.meta_value("password"), Some("second"));
    }

    #[test]
    fn test_parse_nzb_no_head() {
        let nzb = parse_nzb(r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb"/>"#).unwrap();
        assert!(nzb.meta().is_empty());
        assert!(nzb.is_empty());
        assert_eq!(nzb.bytes(), 0);
    }

    #[test]
    fn test_parse_nzb_missing_attributes_default() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file>
    <segments>
      <segment>msg@example.com</segment>
    </segments>
  </file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        let file = &nzb.files()[0];
        assert_eq!(file.poster(), "");
        assert_eq!(file.subject(), "");
        assert_eq!(file.timestamp(), 0);
        assert!(file.groups().is_empty());

        let seg = &file.segments()[0];
        assert_eq!(seg.bytes(), 0);
        assert_eq!(seg.number(), 0);
        assert_eq!(seg.message_id(), "msg@example.com");
    }

    #[test]
    fn test_parse_nzb_invalid_numbers_default() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file poster="p" date="yesterday" subject="s">
    <segments>
      <segment bytes="lots" number="one">a@x</segment>
      <segment bytes="300" number="2">b@x</segment>
      <segment bytes="-10" number="-3">c@x</segment>
    </segments>
  </file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        let file = &nzb.files()[0];
        assert_eq!(file.timestamp(), 0);

        let segs = file.segments();
        assert_eq!(segs[0].bytes(), 0);
        assert_eq!(segs[0].number(), 0);
        assert_eq!(segs[2].bytes(), 0);
        assert_eq!(segs[2].number(), -3);
        assert_eq!(file.bytes(), 300);
        assert_eq!(nzb.bytes(), 300);
    }

    #[test]
    fn test_parse_nzb_bytes_beyond_i64_default() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file>
    <segments>
      <segment bytes="9223372036854775808" number="1">a@x</segment>
      <segment bytes="9223372036854775807" number="2">b@x</segment>
    </segments>
  </file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        let segs = nzb.files()[0].segments();
        assert_eq!(segs[0].bytes(), 0);
        assert_eq!(segs[1].bytes(), i64::MAX as u64);
        assert_eq!(nzb.bytes(), i64::MAX as u64);
    }

    #[test]
    fn test_parse_nzb_crlf_and_whitespace_text() {
        let xml = "<nzb xmlns=\"http://www.newzbin.com/DTD/2003/nzb\">\r\n\
<head><meta type=\"t\">a\r\nb</meta></head>\r\n\
<file subject=\"x\r\ny\tz\"><segments><segment bytes=\"1\">   </segment></segments></file>\r\n\
</nzb>";

        let nzb = parse_nzb(xml).unwrap();
        assert_eq!(nzb.meta_value("t"), Some("a\nb"));
        assert_eq!(nzb.files()[0].subject(), "x y z");
        assert_eq!(nzb.files()[0].segments()[0].message_id(), "");
    }

    #[test]
    fn test_parse_nzb_out_of_range_date_is_epoch() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file date="9223372036854775807"/>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        assert_eq!(nzb.files()[0].timestamp(), 0);
    }

    #[test]
    fn test_parse_nzb_segments_keep_document_order() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file>
    <segments>
      <segment bytes="3" number="3">c@x</segment>
      <segment bytes="1" number="1">a@x</segment>
      <segment bytes="1" number="1">a@x</segment>
    </segments>
  </file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        let numbers: Vec<_> = nzb.files()[0].segments().iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![3, 1, 1]);
        assert_eq!(nzb.bytes(), 5);
    }

    #[test]
    fn test_parse_nzb_empty_segment_element() {
        let xml = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <file><segments><segment bytes="10" number="1"/></segments></file>
</nzb>"#;

        let nzb = parse_nzb(xml).unwrap();
        let seg = &nzb.files()[0].segments()[0];
        assert_eq!(seg.message_id(), "");
        assert_eq!(seg.bytes(), 10);
    }

    #[test]
    fn test_parse_nzb_empty_input() {
        assert!(matches!(parse_nzb(""), Err(NzbError::EmptyInput)));
        assert!(matches!(parse_nzb(" \n\t "), Err(NzbError::EmptyInput)));
    }

    #[test]
    fn test_parse_nzb_missing_root() {
        let err = parse_nzb("<nzb><file/></nzb>").unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("'nzb'"));

        let err = parse_nzb(r#"<other xmlns="http://www.newzbin.com/DTD/2003/nzb"/>"#).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_parse_nzb_malformed_xml() {
        let err = parse_nzb(r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb"><file></nzb>"#)
            .unwrap_err();
        assert!(!err.is_invalid_format());
        assert!(matches!(err, NzbError::Xml(_) | NzbError::MalformedXml(_)));
    }

    #[test]
    fn test_from_str() {
        let nzb: Nzb = r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb"><file/></nzb>"#
            .parse()
            .unwrap();
        assert_eq!(nzb.files().len(), 1);
    }
}
