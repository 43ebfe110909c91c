//! Namespace-aware XML element tree
//!
//! A small read-only tree built from `quick_xml::NsReader` events. Elements are
//! looked up by exact (namespace, local name); attributes by unqualified name.
//!
//! Line endings are normalized to `\n`, attribute whitespace to spaces, and
//! whitespace-only text nodes are dropped.

use crate::schema::XName;
use crate::{NzbError, Result};
use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

/// An element with its resolved name, attributes and content
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    content: Vec<Node>,
}

impl Element {
    fn from_start(namespace: Option<String>, start: &BytesStart<'_>) -> Result<Self> {
        let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape(&normalize_attribute(&raw))
                .map_err(quick_xml::Error::from)?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            namespace,
            local_name,
            attributes,
            content: Vec::new(),
        })
    }

    /// Check whether this element has exactly the given qualified name
    pub(crate) fn is(&self, name: &XName) -> bool {
        self.namespace.as_deref() == Some(name.namespace) && self.local_name == name.local
    }

    fn children(&self) -> impl Iterator<Item = &Element> {
        self.content.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child with the given name
    pub(crate) fn element(&self, name: &XName) -> Option<&Element> {
        self.children().find(|child| child.is(name))
    }

    /// All direct children with the given name, in document order
    pub(crate) fn elements<'a>(&'a self, name: &'a XName) -> impl Iterator<Item = &'a Element> {
        self.children().filter(move |child| child.is(name))
    }

    /// Value of an unqualified attribute
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of this element and all its descendants
    pub(crate) fn value(&self) -> Cow<'_, str> {
        match self.content.as_slice() {
            [] => Cow::Borrowed(""),
            [Node::Text(text)] => Cow::Borrowed(text),
            _ => {
                let mut text = String::new();
                self.collect_text(&mut text);
                Cow::Owned(text)
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.content {
            match node {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }
}

/// XML 1.0 end-of-line handling: `\r\n` and lone `\r` become `\n`
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Attribute-value normalization for CDATA-typed attributes
///
/// Applied to the raw value, so `&#9;` and friends survive as written.
fn normalize_attribute(raw: &str) -> Cow<'_, str> {
    let text = normalize_line_endings(raw);
    if !text.contains(['\t', '\n']) {
        return text;
    }
    Cow::Owned(text.replace(['\t', '\n'], " "))
}

fn is_xml_whitespace(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

fn resolve_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(NzbError::MalformedXml(format!(
            "Undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

/// Attach a completed element to its parent, or make it the document root
fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.content.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn push_text(text: &str, stack: &mut [Element]) -> Result<()> {
    match stack.last_mut() {
        Some(element) => {
            if let Some(Node::Text(last)) = element.content.last_mut() {
                last.push_str(text);
            } else {
                element.content.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if is_xml_whitespace(text) => Ok(()),
        None => Err(NzbError::MalformedXml(
            "Text is not allowed outside the root element".to_string(),
        )),
    }
}

fn ensure_single_root(stack: &[Element], root: &Option<Element>) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(NzbError::MalformedXml(
            "Document has more than one root element".to_string(),
        ));
    }
    Ok(())
}

/// Parse XML text into its root element
///
/// Tokenizer errors are returned as [`NzbError::Xml`]; tree-level violations
/// (missing or multiple roots, stray text, unclosed elements) as
/// [`NzbError::MalformedXml`].
pub(crate) fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(ref e) => {
                ensure_single_root(&stack, &root)?;
                let element = Element::from_start(resolve_namespace(resolved)?, e)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                ensure_single_root(&stack, &root)?;
                let element = Element::from_start(resolve_namespace(resolved)?, e)?;
                close(element, &mut stack, &mut root);
            }
            Event::End(ref e) => {
                let element = stack.pop().ok_or_else(|| {
                    NzbError::MalformedXml(format!(
                        "Unexpected end tag '{}'",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                close(element, &mut stack, &mut root);
            }
            Event::Text(ref e) => {
                let raw = String::from_utf8_lossy(e);
                if is_xml_whitespace(&raw) {
                    continue;
                }
                let text = unescape(&normalize_line_endings(&raw))
                    .map_err(quick_xml::Error::from)?
                    .into_owned();
                push_text(&text, &mut stack)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                push_text(
                    &normalize_line_endings(&String::from_utf8_lossy(&bytes)),
                    &mut stack,
                )?;
            }
            Event::Eof => break,
            // Declaration, doctype, comments, processing instructions
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(NzbError::MalformedXml(format!(
            "Element '{}' is not closed",
            open.local_name
        )));
    }

    root.ok_or_else(|| NzbError::MalformedXml("Root element is missing".to_string()))
}
