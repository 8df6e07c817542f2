//! XML node trees for Magento configuration files
//!
//! Nodes are identified by their tag plus their `name` attribute. Merging two
//! documents merges identified nodes recursively and appends everything else,
//! so several generators can contribute to the same `etc/module.xml`.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub tag: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    pub nodes: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key.into(), value.into());
        self
    }

    pub fn child(mut self, node: XmlNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Children with the given tag
    pub fn children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.nodes.iter().filter(move |n| n.tag == tag)
    }

    fn set_attribute(&mut self, key: String, value: String) {
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    fn same_identity(&self, other: &XmlNode) -> bool {
        self.tag == other.tag && self.attribute("name") == other.attribute("name")
    }

    /// Merge another tree into this one.
    ///
    /// Attributes of `other` are added when missing; existing values win.
    pub fn merge(&mut self, other: XmlNode) {
        for (key, value) in other.attributes {
            if self.attribute(&key).is_none() {
                self.attributes.push((key, value));
            }
        }

        for node in other.nodes {
            match self.nodes.iter_mut().find(|n| n.same_identity(&node)) {
                Some(existing) => existing.merge(node),
                None => self.nodes.push(node),
            }
        }
    }

    /// Render the tree as a complete XML document.
    pub fn render_document(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        write_node(&mut writer, self)?;

        let bytes = writer.into_inner().into_inner();
        let mut document = String::from_utf8(bytes)?;
        document.push('\n');
        Ok(document)
    }
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &XmlNode) -> Result<()> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.nodes.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &node.nodes {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
    Ok(())
}
