//! Style document loading
//!
//! Parses a map style XML file into a [`Document`] using quick-xml's
//! streaming reader. Whitespace, comments, CDATA sections and processing
//! instructions are kept so that untouched parts of the document survive
//! a load/write cycle.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::style::errors::{OverrideError, OverrideResult};
use crate::style::types::{Document, Element, Node};
use crate::utils::xml_utils::{bytes_to_string, element_from_start, is_blank, EntityTable};

/// Reader for style documents
pub struct StyleReader;

impl StyleReader {
    /// Creates a new reader
    pub fn new() -> Self {
        StyleReader
    }

    /// Loads and parses the document at `path`
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> OverrideResult<Document> {
        let path = path.as_ref();
        debug!("Loading style document from {}", path.display());
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Parses a document held in memory
    pub fn read_str(&self, xml: &str) -> OverrideResult<Document> {
        self.read(xml.as_bytes())
    }

    /// Parses a document from any buffered source
    pub fn read<R: BufRead>(&self, source: R) -> OverrideResult<Document> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut builder = TreeBuilder::default();
        let mut entities = EntityTable::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => builder.open(element_from_start(&e, &entities)?)?,
                Event::Empty(e) => builder.append_element(element_from_start(&e, &entities)?)?,
                Event::End(e) => builder.close(&bytes_to_string(e.name().as_ref()))?,
                Event::Text(e) => {
                    builder.append_text(e.unescape_with(|entity| entities.resolve(entity))?.into_owned())?
                }
                Event::CData(e) => builder.append_node(Node::CData(bytes_to_string(&e)))?,
                Event::Comment(e) => builder.append_node(Node::Comment(bytes_to_string(&e)))?,
                Event::PI(e) => builder.append_node(Node::ProcessingInstruction(bytes_to_string(&e)))?,
                Event::Decl(e) => builder.append_node(Node::Declaration(bytes_to_string(&e)))?,
                Event::DocType(e) => {
                    let doctype = bytes_to_string(&e);
                    entities.add_doctype(&doctype);
                    debug!("DOCTYPE declares {} entit(ies)", entities.len());
                    builder.append_node(Node::DocType(doctype))?
                }
                Event::Eof => break,
            }
            buf.clear();
        }

        let document = builder.finish()?;
        debug!("{}", document);
        Ok(document)
    }
}

impl Default for StyleReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles the owned tree from a stream of events
#[derive(Default)]
struct TreeBuilder {
    /// Top-level nodes of the document
    nodes: Vec<Node>,
    /// Elements opened but not yet closed, innermost last
    open: Vec<Element>,
    /// Whether the root element has already been closed
    has_root: bool,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) -> OverrideResult<()> {
        self.check_new_root(&element)?;
        self.open.push(element);
        Ok(())
    }

    fn close(&mut self, name: &str) -> OverrideResult<()> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| OverrideError::Xml(format!("unexpected closing tag </{}>", name)))?;
        if element.name != name {
            return Err(OverrideError::Xml(format!(
                "expected </{}>, found </{}>",
                element.name, name
            )));
        }
        self.attach(Node::Element(element));
        Ok(())
    }

    fn append_element(&mut self, element: Element) -> OverrideResult<()> {
        self.check_new_root(&element)?;
        self.attach(Node::Element(element));
        Ok(())
    }

    fn append_text(&mut self, text: String) -> OverrideResult<()> {
        if self.open.is_empty() && !is_blank(&text) {
            return Err(OverrideError::Xml(format!(
                "text outside the root element: {:?}",
                text.trim()
            )));
        }
        self.append_node(Node::Text(text))
    }

    fn append_node(&mut self, node: Node) -> OverrideResult<()> {
        if self.open.is_empty() && matches!(node, Node::CData(_)) {
            return Err(OverrideError::Xml("CDATA outside the root element".to_string()));
        }
        self.attach(node);
        Ok(())
    }

    fn check_new_root(&self, element: &Element) -> OverrideResult<()> {
        if self.open.is_empty() && self.has_root {
            return Err(OverrideError::Xml(format!(
                "junk after document element: <{}>",
                element.name
            )));
        }
        Ok(())
    }

    fn attach(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                if matches!(node, Node::Element(_)) {
                    self.has_root = true;
                }
                self.nodes.push(node);
            }
        }
    }

    fn finish(self) -> OverrideResult<Document> {
        if let Some(unclosed) = self.open.last() {
            return Err(OverrideError::Xml(format!(
                "unexpected end of document: <{}> is not closed",
                unclosed.name
            )));
        }
        if !self.has_root {
            return Err(OverrideError::Xml("no element found".to_string()));
        }
        Ok(Document { nodes: self.nodes })
    }
}
