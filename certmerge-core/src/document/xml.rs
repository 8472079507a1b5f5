//! Owned XML tree for package parts that need in-place edits

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::error::{DocumentError, DocumentResult};

/// A node inside an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    /// Comments, CDATA and processing instructions, written back untouched
    Other(Event<'static>),
}

/// An element with its attributes in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    fn from_start(start: &BytesStart<'_>, part: &str) -> DocumentResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| DocumentError::xml(part, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| DocumentError::xml(part, e))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, key: &str) {
        self.attributes.retain(|(k, _)| k != key);
    }

    /// Child elements, skipping text and other nodes
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.name == name)
    }

    /// Concatenated text content of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>, part: &str) -> DocumentResult<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| DocumentError::xml(part, e));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| DocumentError::xml(part, e))?;
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write(writer, part)?,
                XmlNode::Text(text) => writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|e| DocumentError::xml(part, e))?,
                XmlNode::Other(event) => writer
                    .write_event(event.clone())
                    .map_err(|e| DocumentError::xml(part, e))?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| DocumentError::xml(part, e))
    }
}

/// A parsed XML part: declaration/prolog events plus the root element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    prolog: Vec<Event<'static>>,
    pub root: XmlElement,
}

impl XmlDocument {
    /// Parse a part. `part` is only used in error messages.
    pub fn parse(xml: &str, part: &str) -> DocumentResult<Self> {
        let mut reader = Reader::from_str(xml);
        let mut prolog = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(XmlElement::from_start(&e, part)?),
                Ok(Event::Empty(e)) => {
                    let element = XmlElement::from_start(&e, part)?;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        DocumentError::xml(part, "unexpected closing tag")
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::Text(e)) => {
                    // Whitespace around the root element is not kept
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape().map_err(|e| DocumentError::xml(part, e))?;
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(other) => match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Other(other.into_owned())),
                    None if root.is_none() => prolog.push(other.into_owned()),
                    None => {}
                },
                Err(e) => {
                    return Err(DocumentError::xml(
                        part,
                        format!("at position {}: {}", reader.error_position(), e),
                    ));
                }
            }
        }

        if !stack.is_empty() {
            return Err(DocumentError::xml(part, "unclosed element at end of input"));
        }
        let root = root.ok_or_else(|| DocumentError::xml(part, "no root element"))?;
        Ok(Self { prolog, root })
    }

    pub fn to_bytes(&self, part: &str) -> DocumentResult<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        for event in &self.prolog {
            writer
                .write_event(event.clone())
                .map_err(|e| DocumentError::xml(part, e))?;
        }
        self.root.write(&mut writer, part)?;
        Ok(writer.into_inner())
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => *root = Some(element),
    }
}
