//! Tolerant attribute coercion
//!
//! Missing or malformed attributes never fail a parse; they fall back to an
//! empty string or the type's default value.

use crate::xml::Element;
use std::str::FromStr;

/// Attribute text, or `""` if the attribute is absent
pub(crate) fn text_or_empty<'a>(element: &'a Element, name: &str) -> &'a str {
    element.attribute(name).unwrap_or_default()
}

/// Parse `text` as `T`, falling back to `T::default()` on failure
///
/// Surrounding whitespace is ignored.
pub(crate) fn parse_or_default<T>(text: &str) -> T
where
    T: FromStr + Default,
{
    text.trim().parse().unwrap_or_default()
}
