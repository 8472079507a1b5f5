//! Input loading: existence checks, template and roster

use std::path::Path;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::document::{Document, ParagraphStyle};
use crate::error::{CertError, InputKind, Result};
use crate::roster::{self, Roster};

/// Name of the default paragraph style captured from the template
pub const NORMAL_STYLE: &str = "Normal";

/// Inputs loaded once per run
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub template: Document,
    /// The template's `Normal` paragraph style, when it defines one
    pub normal_style: Option<ParagraphStyle>,
    pub roster: Roster,
}

/// Fail with `MissingFile` if `path` does not exist
pub fn ensure_exists(path: &Path, kind: InputKind) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CertError::MissingFile {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Check both inputs exist, then load the template and the roster sheet
pub fn load_inputs(config: &GeneratorConfig) -> Result<LoadedInputs> {
    ensure_exists(&config.template, InputKind::Template)?;
    ensure_exists(&config.roster, InputKind::Roster)?;

    let template = Document::open(&config.template)?;
    let normal_style = template.paragraph_style(NORMAL_STYLE);
    match &normal_style {
        Some(style) => debug!(style_id = %style.style_id, font = ?style.font, "Template default style"),
        None => debug!("Template defines no '{}' paragraph style", NORMAL_STYLE),
    }

    let roster = roster::read_roster(&config.roster, &config.sheet)?;

    Ok(LoadedInputs {
        template,
        normal_style,
        roster,
    })
}
