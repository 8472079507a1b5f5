//! Paragraph and run views over the `word/document.xml` tree

use super::style::{Alignment, PPR_ORDER, RPR_ORDER, RgbColor, RunFont, property_mut};
use super::xml::{XmlElement, XmlNode};

const RUN: &str = "w:r";
const HYPERLINK: &str = "w:hyperlink";

/// Read-only view of a `w:p` element
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Text of the paragraph's runs, concatenated
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.element
            .child("w:pPr")
            .and_then(|ppr| ppr.child("w:jc"))
            .and_then(|jc| jc.attr("w:val"))
            .and_then(Alignment::from_ooxml)
    }

    /// Runs in document order: direct `w:r` children and the runs of `w:hyperlink` children
    pub fn runs(&self) -> impl Iterator<Item = Run<'a>> + use<'a> {
        self.element.elements().flat_map(|e| {
            let hyperlink_runs = (e.name == HYPERLINK)
                .then(move || e.elements().filter(|r| r.name == RUN))
                .into_iter()
                .flatten();
            (e.name == RUN)
                .then_some(e)
                .into_iter()
                .chain(hyperlink_runs)
                .map(|element| Run { element })
        })
    }

    pub fn element(&self) -> &'a XmlElement {
        self.element
    }
}

/// Read-only view of a `w:r` element
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    element: &'a XmlElement,
}

impl Run<'_> {
    pub fn text(&self) -> String {
        run_text(self.element)
    }

    pub fn font(&self) -> RunFont {
        RunFont::from_rpr(self.element.child("w:rPr"))
    }
}

/// Mutable view of a `w:p` element
#[derive(Debug)]
pub struct ParagraphMut<'a> {
    element: &'a mut XmlElement,
}

impl<'a> ParagraphMut<'a> {
    pub(crate) fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    pub fn as_paragraph(&self) -> Paragraph<'_> {
        Paragraph::new(self.element)
    }

    pub fn text(&self) -> String {
        self.as_paragraph().text()
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        let ppr = leading_child_mut(self.element, "w:pPr");
        property_mut(ppr, "w:jc", PPR_ORDER).set_attr("w:val", alignment.to_ooxml());
    }

    /// Mutable counterpart of [`Paragraph::runs`]
    pub fn runs_mut(&mut self) -> impl Iterator<Item = RunMut<'_>> {
        self.element.elements_mut().flat_map(|e| {
            let is_run = e.name == RUN;
            let is_hyperlink = e.name == HYPERLINK;
            let (direct, nested) = if is_run {
                (Some(e), None)
            } else if is_hyperlink {
                (None, Some(e.elements_mut().filter(|r| r.name == RUN)))
            } else {
                (None, None)
            };
            direct
                .into_iter()
                .chain(nested.into_iter().flatten())
                .map(|element| RunMut { element })
        })
    }
}

/// Mutable view of a `w:r` element
#[derive(Debug)]
pub struct RunMut<'a> {
    element: &'a mut XmlElement,
}

impl RunMut<'_> {
    pub fn text(&self) -> String {
        run_text(self.element)
    }

    pub fn font(&self) -> RunFont {
        RunFont::from_rpr(self.element.child("w:rPr"))
    }

    /// Replace the run's text content; other content such as drawings is kept
    pub fn set_text(&mut self, text: &str) {
        let children = &mut self.element.children;
        let first = children.iter().position(is_text_content);
        children.retain(|n| !is_text_content(n));
        // Nodes before the first text node are all kept, so the index is still valid
        let at = first.unwrap_or(children.len());
        children.splice(at..at, text_nodes(text));
    }

    pub fn set_font_family(&mut self, family: &str) {
        let fonts = property_mut(self.rpr_mut(), "w:rFonts", RPR_ORDER);
        fonts.set_attr("w:ascii", family);
        fonts.set_attr("w:hAnsi", family);
        fonts.remove_attr("w:asciiTheme");
        fonts.remove_attr("w:hAnsiTheme");
    }

    /// Set the size in points (stored as half-points)
    pub fn set_font_size(&mut self, points: f32) {
        let half_points = ((points * 2.0).round() as u32).to_string();
        let rpr = self.rpr_mut();
        property_mut(rpr, "w:sz", RPR_ORDER).set_attr("w:val", &half_points);
        property_mut(rpr, "w:szCs", RPR_ORDER).set_attr("w:val", &half_points);
    }

    pub fn set_color(&mut self, color: RgbColor) {
        let element = property_mut(self.rpr_mut(), "w:color", RPR_ORDER);
        element.set_attr("w:val", &color.to_hex());
        element.remove_attr("w:themeColor");
        element.remove_attr("w:themeTint");
        element.remove_attr("w:themeShade");
    }

    pub fn set_bold(&mut self, bold: bool) {
        let element = property_mut(self.rpr_mut(), "w:b", RPR_ORDER);
        if bold {
            element.remove_attr("w:val");
        } else {
            element.set_attr("w:val", "0");
        }
    }

    fn rpr_mut(&mut self) -> &mut XmlElement {
        leading_child_mut(self.element, "w:rPr")
    }
}

/// Get the property container that must be the first child (`w:pPr`, `w:rPr`), creating it
fn leading_child_mut<'a>(parent: &'a mut XmlElement, name: &str) -> &'a mut XmlElement {
    let index = match parent
        .children
        .iter()
        .position(|n| matches!(n, XmlNode::Element(e) if e.name == name))
    {
        Some(index) => index,
        None => {
            parent
                .children
                .insert(0, XmlNode::Element(XmlElement::new(name)));
            0
        }
    };
    match &mut parent.children[index] {
        XmlNode::Element(e) => e,
        _ => unreachable!("index points at an element"),
    }
}

fn is_text_content(node: &XmlNode) -> bool {
    matches!(node, XmlNode::Element(e) if matches!(e.name.as_str(), "w:t" | "w:tab" | "w:br" | "w:cr"))
}

fn run_text(run: &XmlElement) -> String {
    let mut text = String::new();
    for element in run.elements() {
        match element.name.as_str() {
            "w:t" => text.push_str(&element.text()),
            "w:tab" => text.push('\t'),
            "w:br" | "w:cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn text_nodes(text: &str) -> Vec<XmlNode> {
    fn flush(buffer: &mut String, nodes: &mut Vec<XmlNode>) {
        if buffer.is_empty() {
            return;
        }
        let mut t = XmlElement::new("w:t");
        if buffer.starts_with(char::is_whitespace) || buffer.ends_with(char::is_whitespace) {
            t.set_attr("xml:space", "preserve");
        }
        t.children.push(XmlNode::Text(std::mem::take(buffer)));
        nodes.push(XmlNode::Element(t));
    }

    let mut nodes = Vec::new();
    let mut buffer = String::new();
    for c in text.chars() {
        match c {
            '\t' => {
                flush(&mut buffer, &mut nodes);
                nodes.push(XmlNode::Element(XmlElement::new("w:tab")));
            }
            '\n' => {
                flush(&mut buffer, &mut nodes);
                nodes.push(XmlNode::Element(XmlElement::new("w:br")));
            }
            _ => buffer.push(c),
        }
    }
    flush(&mut buffer, &mut nodes);
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::xml::XmlDocument;

    fn paragraph(xml: &str) -> XmlElement {
        XmlDocument::parse(xml, "test").unwrap().root
    }

    #[test]
    fn test_text_concatenates_runs() {
        let p = paragraph(
            r#"<w:p><w:r><w:t>Hello</w:t><w:tab/></w:r><w:r><w:t xml:space="preserve"> @nome</w:t></w:r><w:hyperlink><w:r><w:t>x</w:t></w:r></w:hyperlink></w:p>"#,
        );
        let view = Paragraph::new(&p);
        assert_eq!(view.text(), "Hello\t @nomex");
        assert_eq!(view.runs().count(), 3);
    }

    #[test]
    fn test_set_alignment_creates_ppr_first() {
        let mut p = paragraph(r#"<w:p><w:r><w:t>a</w:t></w:r></w:p>"#);
        let mut view = ParagraphMut::new(&mut p);
        view.set_alignment(Alignment::Center);

        assert_eq!(view.as_paragraph().alignment(), Some(Alignment::Center));
        assert_eq!(p.elements().next().map(|e| e.name.as_str()), Some("w:pPr"));
    }

    #[test]
    fn test_set_alignment_updates_existing_jc() {
        let mut p = paragraph(
            r#"<w:p><w:pPr><w:pStyle w:val="Title"/><w:jc w:val="left"/><w:rPr><w:b/></w:rPr></w:pPr></w:p>"#,
        );
        ParagraphMut::new(&mut p).set_alignment(Alignment::Right);

        let ppr = p.child("w:pPr").unwrap();
        let names: Vec<_> = ppr.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:pStyle", "w:jc", "w:rPr"]);
        assert_eq!(Paragraph::new(&p).alignment(), Some(Alignment::Right));
    }

    #[test]
    fn test_set_text_keeps_properties_and_drawings() {
        let mut p = paragraph(
            r#"<w:p><w:r><w:rPr><w:i/></w:rPr><w:t>old</w:t><w:drawing/><w:t>er</w:t></w:r></w:p>"#,
        );
        let mut view = ParagraphMut::new(&mut p);
        let mut run = view.runs_mut().next().unwrap();
        run.set_text("new\tline ");
        assert_eq!(run.text(), "new\tline ");

        let r = p.child("w:r").unwrap();
        let names: Vec<_> = r.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:rPr", "w:t", "w:tab", "w:t", "w:drawing"]);
        let last_t = r.elements().filter(|e| e.name == "w:t").last().unwrap();
        assert_eq!(last_t.attr("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_font_setters() {
        let mut p = paragraph(
            r#"<w:p><w:r><w:rPr><w:rFonts w:asciiTheme="minorHAnsi" w:cs="Arial"/><w:color w:val="000000" w:themeColor="text1"/></w:rPr><w:t>a</w:t></w:r></w:p>"#,
        );
        let mut view = ParagraphMut::new(&mut p);
        let mut run = view.runs_mut().next().unwrap();
        run.set_font_family("Calibri");
        run.set_font_size(24.0);
        run.set_color(RgbColor(0x42, 0x24, 0xE9));
        run.set_bold(true);

        let font = run.font();
        assert_eq!(font.family.as_deref(), Some("Calibri"));
        assert_eq!(font.size, Some(24.0));
        assert_eq!(font.color, Some(RgbColor(0x42, 0x24, 0xE9)));
        assert_eq!(font.bold, Some(true));

        let rpr = p.child("w:r").and_then(|r| r.child("w:rPr")).unwrap();
        let names: Vec<_> = rpr.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:rFonts", "w:b", "w:color", "w:sz", "w:szCs"]);
        let fonts = rpr.child("w:rFonts").unwrap();
        assert_eq!(fonts.attr("w:asciiTheme"), None);
        assert_eq!(fonts.attr("w:cs"), Some("Arial"));
        assert_eq!(rpr.child("w:color").unwrap().attr("w:themeColor"), None);
        assert_eq!(rpr.child("w:sz").unwrap().attr("w:val"), Some("48"));
    }
}
