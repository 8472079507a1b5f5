//! Placeholder substitution and certificate styling

use crate::config::{GeneratorConfig, MatchMode, StyleConfig};
use crate::document::{Document, ParagraphMut};

/// Replaces the placeholder with a student name and styles the affected paragraphs
#[derive(Debug, Clone)]
pub struct Personalizer {
    placeholder: String,
    style: StyleConfig,
    match_mode: MatchMode,
}

impl Personalizer {
    pub fn new(placeholder: impl Into<String>, style: StyleConfig, match_mode: MatchMode) -> Self {
        Self {
            placeholder: placeholder.into(),
            style,
            match_mode,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.placeholder.clone(),
            config.style.clone(),
            config.match_mode,
        )
    }

    /// Check whether any paragraph of `document` contains the placeholder
    pub fn matches(&self, document: &Document) -> bool {
        document
            .paragraphs()
            .any(|p| p.text().contains(&self.placeholder))
    }

    /// Personalize `document` in place and return the number of paragraphs changed.
    ///
    /// Only paragraphs whose text contains the placeholder are touched: they are
    /// aligned and every one of their runs gets the configured font. In
    /// [`MatchMode::PerRun`] a placeholder split across two runs stays in the text.
    pub fn personalize(&self, document: &mut Document, name: &str) -> usize {
        let mut changed = 0;

        for mut paragraph in document.paragraphs_mut() {
            if !paragraph.text().contains(&self.placeholder) {
                continue;
            }
            paragraph.set_alignment(self.style.alignment);

            match self.match_mode {
                MatchMode::PerRun => {
                    for mut run in paragraph.runs_mut() {
                        let text = run.text();
                        if text.contains(&self.placeholder) {
                            run.set_text(&text.replace(&self.placeholder, name));
                        }
                    }
                }
                MatchMode::AcrossRuns => self.replace_across_runs(&mut paragraph, name),
            }

            for mut run in paragraph.runs_mut() {
                run.set_font_family(&self.style.font_family);
                run.set_font_size(self.style.font_size);
                run.set_color(self.style.color);
                run.set_bold(self.style.bold);
            }
            changed += 1;
        }

        changed
    }

    fn replace_across_runs(&self, paragraph: &mut ParagraphMut<'_>, name: &str) {
        let original: Vec<String> = paragraph.runs_mut().map(|r| r.text()).collect();
        let mut texts = original.clone();
        if !replace_in_segments(&mut texts, &self.placeholder, name) {
            return;
        }
        for ((mut run, before), after) in paragraph.runs_mut().zip(&original).zip(&texts) {
            if before != after {
                run.set_text(after);
            }
        }
    }
}

/// Replace `token` in the concatenation of `segments`, keeping segment boundaries.
///
/// The replacement goes into the segment where an occurrence starts; the rest of the
/// token is cut from the following segments. Returns whether anything was replaced.
fn replace_in_segments(segments: &mut [String], token: &str, replacement: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    let mut replaced = false;
    // Search resumes after the last inserted replacement
    let mut resume = 0;

    loop {
        let joined = segments.concat();
        let Some(start) = joined[resume..].find(token).map(|p| p + resume) else {
            break;
        };
        let end = start + token.len();

        let (first, first_offset) = locate(segments, start, false);
        let (last, last_offset) = locate(segments, end, true);

        if first == last {
            segments[first].replace_range(first_offset..last_offset, replacement);
        } else {
            segments[first].replace_range(first_offset.., replacement);
            for segment in &mut segments[first + 1..last] {
                segment.clear();
            }
            segments[last].replace_range(..last_offset, "");
        }

        resume = start + replacement.len();
        replaced = true;
    }

    replaced
}

/// Map a byte offset in the concatenation to (segment, offset in segment).
/// With `is_end`, an offset on a boundary belongs to the segment it closes.
fn locate(segments: &[String], offset: usize, is_end: bool) -> (usize, usize) {
    let mut consumed = 0;
    for (i, segment) in segments.iter().enumerate() {
        let len = segment.len();
        let inside = if is_end {
            offset > consumed && offset <= consumed + len
        } else {
            offset < consumed + len
        };
        if inside {
            return (i, offset - consumed);
        }
        consumed += len;
    }
    (segments.len().saturating_sub(1), offset.saturating_sub(consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_replace_within_one_segment() {
        let mut s = segments(&["Dear @nome and @nome", "!"]);
        assert!(replace_in_segments(&mut s, "@nome", "Ana"));
        assert_eq!(s, segments(&["Dear Ana and Ana", "!"]));
    }

    #[test]
    fn test_replace_split_token() {
        let mut s = segments(&["Hello @n", "om", "e!", " Bye"]);
        assert!(replace_in_segments(&mut s, "@nome", "Ana"));
        assert_eq!(s, segments(&["Hello Ana", "", "!", " Bye"]));
    }

    #[test]
    fn test_replace_token_ending_on_boundary() {
        let mut s = segments(&["@no", "me", "@nome"]);
        assert!(replace_in_segments(&mut s, "@nome", "Bruno"));
        assert_eq!(s, segments(&["Bruno", "", "Bruno"]));
    }

    #[test]
    fn test_replacement_containing_token_terminates() {
        let mut s = segments(&["@nome"]);
        assert!(replace_in_segments(&mut s, "@nome", "@nome @nome"));
        assert_eq!(s, segments(&["@nome @nome"]));
    }

    #[test]
    fn test_no_match() {
        let mut s = segments(&["nothing", "here"]);
        assert!(!replace_in_segments(&mut s, "@nome", "Ana"));
        assert!(!replace_in_segments(&mut s, "", "Ana"));
        assert_eq!(s, segments(&["nothing", "here"]));
    }

    #[test]
    fn test_multibyte_names_and_text() {
        let mut s = segments(&["Certificado de conclusão: @no", "me"]);
        assert!(replace_in_segments(&mut s, "@nome", "João"));
        assert_eq!(s, segments(&["Certificado de conclusão: João", ""]));
    }
}
