//! Style document serialization

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesCData, BytesEnd, BytesPI, BytesText, Event};
use quick_xml::Writer;

use crate::style::errors::OverrideResult;
use crate::style::types::{Document, Element, Node};
use crate::utils::xml_utils::start_from_element;

/// Writer for style documents
///
/// Output is not indented; whitespace held in the tree is written back as is.
pub struct StyleWriter;

impl StyleWriter {
    /// Creates a new writer
    pub fn new() -> Self {
        StyleWriter
    }

    /// Writes the document to `path`, creating or truncating the file
    pub fn write_file<P: AsRef<Path>>(&self, document: &Document, path: P) -> OverrideResult<()> {
        let path = path.as_ref();
        debug!("Writing style document to {}", path.display());
        let mut out = BufWriter::new(File::create(path)?);
        self.write(document, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Serializes the document into a string
    pub fn write_string(&self, document: &Document) -> OverrideResult<String> {
        let mut out = Vec::new();
        self.write(document, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Writes the document to any sink
    pub fn write<W: Write>(&self, document: &Document, sink: W) -> OverrideResult<()> {
        let mut writer = Writer::new(sink);
        for node in &document.nodes {
            write_node(&mut writer, node)?;
        }
        Ok(())
    }
}

impl Default for StyleWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> OverrideResult<()> {
    match node {
        Node::Element(element) => write_element(writer, element)?,
        Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        Node::CData(data) => writer.write_event(Event::CData(BytesCData::new(data.as_str())))?,
        Node::Comment(comment) => writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?,
        Node::ProcessingInstruction(pi) => writer.write_event(Event::PI(BytesPI::new(pi.as_str())))?,
        Node::Declaration(decl) => write!(writer.get_mut(), "<?{}?>", decl)?,
        Node::DocType(doctype) => writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?,
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> OverrideResult<()> {
    let start = start_from_element(element);
    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::reader::StyleReader;

    #[test]
    fn test_write_escapes_text_and_attributes() {
        let mut param = Element::new("Parameter").with_attribute("name", "a<b");
        param.set_text("x & y");
        let doc = Document::new(param);

        let xml = StyleWriter::new().write_string(&doc).unwrap();
        assert_eq!(xml, "<Parameter name=\"a&lt;b\">x &amp; y</Parameter>");
    }

    #[test]
    fn test_write_childless_element_is_self_closing() {
        let doc = Document::new(Element::new("Map").with_attribute("srs", "+init=epsg:3857"));
        let xml = StyleWriter::new().write_string(&doc).unwrap();
        assert_eq!(xml, "<Map srs=\"+init=epsg:3857\"/>");
    }

    #[test]
    fn test_write_keeps_prolog_comments_and_cdata() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                   <Map><!-- layers --><?mapnik hint?><Parameter name=\"table\"><![CDATA[(select 1) as t]]></Parameter></Map>";
        let doc = StyleReader::new().read_str(xml).unwrap();
        let written = StyleWriter::new().write_string(&doc).unwrap();
        assert_eq!(written, xml);
    }

    #[test]
    fn test_write_file_to_missing_directory_fails() {
        let doc = Document::new(Element::new("Map"));
        let result = StyleWriter::new().write_file(&doc, "no/such/dir/out.xml");
        assert!(result.is_err());
    }
}
