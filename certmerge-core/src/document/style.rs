//! Paragraph and run formatting values and their OOXML encoding

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::xml::{XmlElement, XmlNode};

/// Paragraph alignment (`w:jc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn to_ooxml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }

    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// 24-bit RGB color, written as `RRGGBB` hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid RGB color '{}', expected RRGGBB", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(RgbColor(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

/// Font attributes of a run as stored in its `w:rPr`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFont {
    pub family: Option<String>,
    /// Size in points
    pub size: Option<f32>,
    pub color: Option<RgbColor>,
    pub bold: Option<bool>,
}

impl RunFont {
    pub(crate) fn from_rpr(rpr: Option<&XmlElement>) -> Self {
        let Some(rpr) = rpr else {
            return Self::default();
        };
        Self {
            family: rpr
                .child("w:rFonts")
                .and_then(|f| f.attr("w:ascii"))
                .map(str::to_string),
            size: rpr
                .child("w:sz")
                .and_then(|sz| sz.attr("w:val"))
                .and_then(|v| v.parse::<f32>().ok())
                .map(|half_points| half_points / 2.0),
            color: rpr
                .child("w:color")
                .and_then(|c| c.attr("w:val"))
                .and_then(|v| v.parse().ok()),
            bold: rpr.child("w:b").map(on_off),
        }
    }
}

/// A paragraph style definition from `word/styles.xml`
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub style_id: String,
    pub name: String,
    pub font: RunFont,
}

impl ParagraphStyle {
    /// Find a paragraph style by display name or style id in a parsed `w:styles` root
    pub(crate) fn find(styles: &XmlElement, name: &str) -> Option<Self> {
        styles
            .elements()
            .filter(|s| s.name == "w:style" && s.attr("w:type") == Some("paragraph"))
            .find(|s| {
                s.child("w:name").and_then(|n| n.attr("w:val")) == Some(name)
                    || s.attr("w:styleId") == Some(name)
            })
            .map(|s| Self {
                style_id: s.attr("w:styleId").unwrap_or(name).to_string(),
                name: s
                    .child("w:name")
                    .and_then(|n| n.attr("w:val"))
                    .unwrap_or(name)
                    .to_string(),
                font: RunFont::from_rpr(s.child("w:rPr")),
            })
    }
}

/// Interpret an OOXML on/off toggle element (`<w:b/>`, `<w:b w:val="0"/>`)
pub(crate) fn on_off(element: &XmlElement) -> bool {
    !matches!(element.attr("w:val"), Some("0" | "false" | "off"))
}

/// Child order of `w:pPr` (CT_PPr)
pub(crate) const PPR_ORDER: &[&str] = &[
    "w:pStyle",
    "w:keepNext",
    "w:keepLines",
    "w:pageBreakBefore",
    "w:framePr",
    "w:widowControl",
    "w:numPr",
    "w:suppressLineNumbers",
    "w:pBdr",
    "w:shd",
    "w:tabs",
    "w:suppressAutoHyphens",
    "w:kinsoku",
    "w:wordWrap",
    "w:overflowPunct",
    "w:topLinePunct",
    "w:autoSpaceDE",
    "w:autoSpaceDN",
    "w:bidi",
    "w:adjustRightInd",
    "w:snapToGrid",
    "w:spacing",
    "w:ind",
    "w:contextualSpacing",
    "w:mirrorIndents",
    "w:suppressOverlap",
    "w:jc",
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

/// Child order of `w:rPr` (CT_RPr)
pub(crate) const RPR_ORDER: &[&str] = &[
    "w:rStyle",
    "w:rFonts",
    "w:b",
    "w:bCs",
    "w:i",
    "w:iCs",
    "w:caps",
    "w:smallCaps",
    "w:strike",
    "w:dstrike",
    "w:outline",
    "w:shadow",
    "w:emboss",
    "w:imprint",
    "w:noProof",
    "w:snapToGrid",
    "w:vanish",
    "w:webHidden",
    "w:color",
    "w:spacing",
    "w:w",
    "w:kern",
    "w:position",
    "w:sz",
    "w:szCs",
    "w:highlight",
    "w:u",
    "w:effect",
    "w:bdr",
    "w:shd",
    "w:fitText",
    "w:vertAlign",
    "w:rtl",
    "w:cs",
    "w:em",
    "w:lang",
    "w:eastAsianLayout",
    "w:specVanish",
    "w:oMath",
    "w:rPrChange",
];

/// Return the child `name` of `parent`, inserting an empty one at its schema position if absent
pub(crate) fn property_mut<'a>(
    parent: &'a mut XmlElement,
    name: &str,
    order: &[&str],
) -> &'a mut XmlElement {
    let existing = parent
        .children
        .iter()
        .position(|n| matches!(n, XmlNode::Element(e) if e.name == name));

    let index = match existing {
        Some(index) => index,
        None => {
            let rank = order.iter().position(|n| *n == name).unwrap_or(order.len());
            let index = parent
                .children
                .iter()
                .position(|n| match n {
                    XmlNode::Element(e) => order
                        .iter()
                        .position(|o| *o == e.name)
                        .is_some_and(|r| r > rank),
                    _ => false,
                })
                .unwrap_or(parent.children.len());
            parent
                .children
                .insert(index, XmlNode::Element(XmlElement::new(name)));
            index
        }
    };

    match &mut parent.children[index] {
        XmlNode::Element(e) => e,
        _ => unreachable!("index points at an element"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_color_parsing() {
        assert_eq!("4224E9".parse::<RgbColor>(), Ok(RgbColor(0x42, 0x24, 0xE9)));
        assert_eq!("#4224e9".parse::<RgbColor>(), Ok(RgbColor(0x42, 0x24, 0xE9)));
        assert!("4224E".parse::<RgbColor>().is_err());
        assert!("GG24E9".parse::<RgbColor>().is_err());
        assert_eq!(RgbColor(0x42, 0x24, 0xE9).to_hex(), "4224E9");
    }

    #[test]
    fn test_alignment_mapping() {
        assert_eq!(Alignment::Center.to_ooxml(), "center");
        assert_eq!(Alignment::from_ooxml("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::from_ooxml("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_ooxml("bogus"), None);
    }

    #[test]
    fn test_property_inserted_in_schema_order() {
        let mut rpr = XmlElement::new("w:rPr");
        rpr.children.push(XmlNode::Element(XmlElement::new("w:i")));
        rpr.children.push(XmlNode::Element(XmlElement::new("w:lang")));

        property_mut(&mut rpr, "w:sz", RPR_ORDER).set_attr("w:val", "48");
        property_mut(&mut rpr, "w:rFonts", RPR_ORDER);
        property_mut(&mut rpr, "w:sz", RPR_ORDER).set_attr("w:val", "20");

        let names: Vec<_> = rpr.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["w:rFonts", "w:i", "w:sz", "w:lang"]);
        assert_eq!(rpr.child("w:sz").and_then(|e| e.attr("w:val")), Some("20"));
    }

    #[test]
    fn test_run_font_from_rpr() {
        let mut rpr = XmlElement::new("w:rPr");
        rpr.children.push(XmlNode::Element(
            XmlElement::new("w:rFonts").with_attr("w:ascii", "Arial"),
        ));
        rpr.children
            .push(XmlNode::Element(XmlElement::new("w:b").with_attr("w:val", "0")));
        rpr.children
            .push(XmlNode::Element(XmlElement::new("w:sz").with_attr("w:val", "21")));

        let font = RunFont::from_rpr(Some(&rpr));
        assert_eq!(font.family.as_deref(), Some("Arial"));
        assert_eq!(font.bold, Some(false));
        assert_eq!(font.size, Some(10.5));
        assert_eq!(font.color, None);
        assert_eq!(RunFont::from_rpr(None), RunFont::default());
    }
}
