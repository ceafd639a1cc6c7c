//! XML utility functions
//!
//! Conversions between quick-xml events and the style document tree.

use std::borrow::Cow;
use std::collections::HashMap;

use lazy_static::lazy_static;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::BytesStart;
use regex::Regex;

use crate::style::errors::OverrideResult;
use crate::style::types::Element;

/// Decodes raw event bytes, replacing invalid UTF-8 sequences
pub fn bytes_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

lazy_static! {
    // Internal general entity with a quoted literal value; parameter (`%`)
    // and external (`SYSTEM`/`PUBLIC`) entities do not match
    static ref ENTITY_DECL: Regex =
        Regex::new(r#"<!ENTITY\s+([^\s%]\S*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap();
}

/// Internal entities declared in a document's DOCTYPE
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntityTable {
    entities: HashMap<String, String>,
}

impl EntityTable {
    /// Creates a table knowing only the predefined XML entities
    pub fn new() -> Self {
        EntityTable::default()
    }

    /// Records the `<!ENTITY name "value">` declarations of a DOCTYPE
    ///
    /// The first declaration of a name binds. References to earlier entities
    /// inside a value are expanded; a value that cannot be expanded is kept raw.
    pub fn add_doctype(&mut self, doctype: &str) {
        for caps in ENTITY_DECL.captures_iter(doctype) {
            let name = &caps[1];
            if self.entities.contains_key(name) {
                continue;
            }
            let raw = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            let value = unescape_with(raw, |entity| self.resolve(entity))
                .map(Cow::into_owned)
                .unwrap_or_else(|_| raw.to_string());
            self.entities.insert(name.to_string(), value);
        }
    }

    /// Replacement text for an entity name, including the predefined ones
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entities
            .get(name)
            .map(String::as_str)
            .or_else(|| resolve_predefined_entity(name))
    }

    /// Number of declared entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity has been declared
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Builds a childless element from a start or empty tag
///
/// Attribute values are unescaped using `entities`; a malformed attribute
/// fails the whole tag.
pub fn element_from_start(start: &BytesStart, entities: &EntityTable) -> OverrideResult<Element> {
    let mut element = Element::new(bytes_to_string(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let key = bytes_to_string(attr.key.as_ref());
        let value = attr.unescape_value_with(|entity| entities.resolve(entity))?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Builds the start tag for an element, escaping attribute values
pub fn start_from_element(element: &Element) -> BytesStart<'_> {
    let mut start = BytesStart::new(Cow::Borrowed(element.name.as_str()));
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    start
}

/// True when the text holds nothing but XML whitespace
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}
