//! Configuration for certificate generation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{Alignment, RgbColor};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "certmerge.toml";

/// Largest font size Word accepts, in points
const MAX_FONT_SIZE: f32 = 1638.0;

/// Main generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Certificate template (.docx)
    pub template: PathBuf,
    /// Student roster workbook (.xlsx, .xls or .ods)
    pub roster: PathBuf,
    /// Sheet of the roster to read
    pub sheet: String,
    /// Header of the column holding student names
    pub name_column: String,
    /// Literal text replaced by the student name
    pub placeholder: String,
    /// Directory receiving the generated certificates
    pub output_dir: PathBuf,
    /// File name prefix of the generated certificates
    pub output_prefix: String,
    pub match_mode: MatchMode,
    /// Keep going after a row fails instead of aborting the batch
    pub continue_on_error: bool,
    /// Trim surrounding whitespace from names; whitespace-only names are then skipped
    pub trim_names: bool,
    /// Log what would be generated without writing files
    pub dry_run: bool,
    pub style: StyleConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("Certificado1.docx"),
            roster: PathBuf::from("Alunos.xlsx"),
            sheet: "Nomes".to_string(),
            name_column: "Aluno".to_string(),
            placeholder: "@nome".to_string(),
            output_dir: PathBuf::from("."),
            output_prefix: "Certificado_".to_string(),
            match_mode: MatchMode::PerRun,
            continue_on_error: false,
            trim_names: false,
            dry_run: false,
            style: StyleConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate values that would otherwise fail late or produce broken documents
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.is_empty() {
            anyhow::bail!("'placeholder' must not be empty");
        }
        if self.sheet.trim().is_empty() {
            anyhow::bail!("'sheet' must not be empty");
        }
        if self.name_column.trim().is_empty() {
            anyhow::bail!("'name_column' must not be empty");
        }
        if self.output_prefix.contains(['/', '\\']) {
            anyhow::bail!(
                "'output_prefix' must not contain path separators, use 'output_dir'"
            );
        }
        if !(self.style.font_size > 0.0 && self.style.font_size <= MAX_FONT_SIZE) {
            anyhow::bail!(
                "'style.font_size' must be between 0 and {} points, got {}",
                MAX_FONT_SIZE,
                self.style.font_size
            );
        }
        if self.style.font_family.trim().is_empty() {
            anyhow::bail!("'style.font_family' must not be empty");
        }
        Ok(())
    }
}

/// How the placeholder is matched against the runs of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Replace only inside runs that contain the whole placeholder
    #[default]
    PerRun,
    /// Also replace placeholders split across run boundaries
    AcrossRuns,
}

/// Styling applied to paragraphs holding the placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub alignment: Alignment,
    pub font_family: String,
    /// Size in points
    pub font_size: f32,
    pub color: RgbColor,
    pub bold: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            alignment: Alignment::Center,
            font_family: "Calibri (Corpo)".to_string(),
            font_size: 24.0,
            color: RgbColor(0x42, 0x24, 0xE9),
            bold: true,
        }
    }
}
