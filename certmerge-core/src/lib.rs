//! certmerge-core: bulk certificate generation
//!
//! Reads student names from a spreadsheet roster and writes one personalized
//! copy of a DOCX template per name, replacing a placeholder token with the
//! name and styling the paragraphs that held it.

pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod personalize;
pub mod roster;

use tracing::{info, warn};

pub use batch::{BatchGenerator, BatchReport, FailedRow, GeneratedCertificate, SkippedRow};
pub use config::{GeneratorConfig, MatchMode, StyleConfig};
pub use document::{Document, DocumentError, ParagraphStyle};
pub use error::{CertError, InputKind, Result};
pub use personalize::Personalizer;
pub use roster::{CellValue, Roster, RosterRow};

/// A generator whose inputs loaded successfully.
///
/// Construction either yields a ready generator or an error; there is no
/// half-initialized state to call [`CertificateGenerator::generate`] on.
#[derive(Debug)]
pub struct CertificateGenerator {
    config: GeneratorConfig,
    template: Document,
    normal_style: Option<ParagraphStyle>,
    roster: Roster,
}

impl CertificateGenerator {
    /// Check that the template and roster exist, and load both
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CertError::Config(e.to_string()))?;

        let inputs = loader::load_inputs(&config)?;
        info!(
            rows = inputs.roster.len(),
            "Loaded template {} and roster {} (sheet '{}')",
            config.template.display(),
            config.roster.display(),
            config.sheet
        );

        let generator = Self {
            config,
            template: inputs.template,
            normal_style: inputs.normal_style,
            roster: inputs.roster,
        };

        if !Personalizer::from_config(&generator.config).matches(generator.template()) {
            warn!(
                "Template {} has no paragraph containing '{}'",
                generator.config.template.display(),
                generator.config.placeholder
            );
        }

        Ok(generator)
    }

    /// Generate one certificate per roster row with a name
    pub fn generate(&self) -> Result<BatchReport> {
        BatchGenerator::new(&self.config).run(&self.roster)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The template as loaded at construction; generation reloads it from disk per row
    pub fn template(&self) -> &Document {
        &self.template
    }

    /// The template's `Normal` paragraph style, if defined
    pub fn normal_style(&self) -> Option<&ParagraphStyle> {
        self.normal_style.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
