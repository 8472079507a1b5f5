//! DOCX document model
//!
//! A DOCX file is a ZIP archive of XML parts. Only `word/document.xml` is parsed
//! into an editable tree; every other part is carried through unchanged on save.
//! `word/styles.xml` is read once at load to resolve named paragraph styles.

mod error;
mod package;
mod paragraph;
mod style;
mod xml;

pub use error::{DocumentError, DocumentResult};
pub use package::DocxPackage;
pub use paragraph::{Paragraph, ParagraphMut, Run, RunMut};
pub use style::{Alignment, ParagraphStyle, RgbColor, RunFont};
pub use xml::{XmlDocument, XmlElement, XmlNode};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions part
pub const STYLES_PART: &str = "word/styles.xml";

/// An in-memory DOCX document
#[derive(Debug, Clone)]
pub struct Document {
    package: DocxPackage,
    content: XmlDocument,
    styles: Option<XmlDocument>,
}

impl Document {
    /// Load a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> DocumentResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> DocumentResult<Self> {
        let package = DocxPackage::from_reader(reader)?;
        let content = XmlDocument::parse(&package.read_string(DOCUMENT_PART)?, DOCUMENT_PART)?;
        if content.root.child("w:body").is_none() {
            return Err(DocumentError::xml(DOCUMENT_PART, "document has no w:body"));
        }

        let styles = if package.has_part(STYLES_PART) {
            Some(XmlDocument::parse(
                &package.read_string(STYLES_PART)?,
                STYLES_PART,
            )?)
        } else {
            None
        };

        Ok(Self {
            package,
            content,
            styles,
        })
    }

    /// Body-level paragraphs in document order (paragraphs inside tables are not included)
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'_>> {
        self.content
            .root
            .child("w:body")
            .into_iter()
            .flat_map(|body| body.elements())
            .filter(|e| e.name == "w:p")
            .map(Paragraph::new)
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = ParagraphMut<'_>> {
        self.content
            .root
            .child_mut("w:body")
            .into_iter()
            .flat_map(|body| body.elements_mut())
            .filter(|e| e.name == "w:p")
            .map(ParagraphMut::new)
    }

    /// Look up a paragraph style by display name or style id
    pub fn paragraph_style(&self, name: &str) -> Option<ParagraphStyle> {
        self.styles
            .as_ref()
            .and_then(|styles| ParagraphStyle::find(&styles.root, name))
    }

    /// Save the document, replacing any existing file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DocumentResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    fn write_to<W: Write + Seek>(&self, writer: W) -> DocumentResult<W> {
        let content = self.content.to_bytes(DOCUMENT_PART)?;
        self.package
            .write_to(writer, &[(DOCUMENT_PART, content.as_slice())])
    }
}
