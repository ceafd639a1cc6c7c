//! In-memory style document tree

use std::fmt;

/// A node held inside an element or at the top level of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data, stored unescaped
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content, stored as written
    Comment(String),
    /// Processing instruction content (target and data)
    ProcessingInstruction(String),
    /// XML declaration content, e.g. `xml version="1.0"`
    Declaration(String),
    /// DOCTYPE content
    DocType(String),
}

/// A style element with its attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in document order, values unescaped
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Looks up an attribute value by name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Returns the leading character data of this element
    ///
    /// Only text and CDATA before the first non-text child count,
    /// so `<a>x<b/>y</a>` has text `x`. Returns `None` when there is none.
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for child in &self.children {
            match child {
                Node::Text(t) | Node::CData(t) => text.get_or_insert_with(String::new).push_str(t),
                _ => break,
            }
        }
        text
    }

    /// Replaces the leading character data with a single text node
    pub fn set_text(&mut self, value: impl Into<String>) {
        let leading = self
            .children
            .iter()
            .take_while(|child| matches!(child, Node::Text(_) | Node::CData(_)))
            .count();
        self.children.splice(0..leading, std::iter::once(Node::Text(value.into())));
    }

    /// Iterates over direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterates mutably over direct child elements
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Collects this element and every descendant with the given tag, in document order
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(tag, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.name == tag {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_named(tag, found);
        }
    }
}

/// A parsed style document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes; exactly one of them is the root element
    pub nodes: Vec<Node>,
}

impl Document {
    /// Creates a document around a single root element
    pub fn new(root: Element) -> Self {
        Document {
            nodes: vec![Node::Element(root)],
        }
    }

    /// Returns the root element
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Returns the root element mutably
    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => {
                let layers = root.descendants_named(crate::style::constants::tags::LAYER);
                write!(f, "Style document <{}> with {} layer(s)", root.name, layers.len())
            }
            None => write!(f, "Empty style document"),
        }
    }
}
