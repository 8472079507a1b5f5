//! Batch generation: one certificate per roster row

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, error, info, warn};

use crate::config::GeneratorConfig;
use crate::document::Document;
use crate::error::Result;
use crate::personalize::Personalizer;
use crate::roster::{CellValue, Roster};

/// A certificate written (or, in dry-run mode, planned) for a row
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCertificate {
    pub row: usize,
    pub name: String,
    pub path: PathBuf,
}

/// A row skipped because it has no student name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
}

/// A row that failed while `continue_on_error` was set
#[derive(Debug, Clone, PartialEq)]
pub struct FailedRow {
    pub row: usize,
    pub name: String,
    pub error: String,
}

/// Outcome of a completed batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub generated: Vec<GeneratedCertificate>,
    pub skipped: Vec<SkippedRow>,
    pub failed: Vec<FailedRow>,
}

/// Generates certificates for every row of a roster, in roster order
pub struct BatchGenerator<'a> {
    config: &'a GeneratorConfig,
    personalizer: Personalizer,
}

impl<'a> BatchGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            personalizer: Personalizer::from_config(config),
        }
    }

    /// Run the batch.
    ///
    /// A missing name column aborts with `CertError::Schema` on the first row.
    /// Any other row failure aborts with `CertError::Batch` unless
    /// `continue_on_error` is set, in which case the row is recorded as failed.
    pub fn run(&self, roster: &Roster) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for row in &roster.rows {
            let value = row.get(&self.config.name_column)?;
            let Some(name) = self.student_name(value) else {
                warn!(row = row.index, "Row {} of the roster has no student name", row.index);
                report.skipped.push(SkippedRow { row: row.index });
                continue;
            };

            match self.generate_one(&name) {
                Ok(path) => report.generated.push(GeneratedCertificate {
                    row: row.index,
                    name,
                    path,
                }),
                Err(e) if self.config.continue_on_error => {
                    error!(row = row.index, "Failed to generate certificate for '{}': {}", name, e);
                    report.failed.push(FailedRow {
                        row: row.index,
                        name,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e.in_row(row.index)),
            }
        }

        if report.failed.is_empty() {
            info!(
                generated = report.generated.len(),
                skipped = report.skipped.len(),
                "Certificates generated successfully"
            );
        } else {
            warn!(
                generated = report.generated.len(),
                skipped = report.skipped.len(),
                "Certificate generation completed with {} failures",
                report.failed.len()
            );
        }
        Ok(report)
    }

    /// Load a fresh copy of the template, personalize it and save it
    fn generate_one(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .config
            .output_dir
            .join(output_file_name(&self.config.output_prefix, name));

        let mut document = Document::open(&self.config.template)?;
        let changed = self.personalizer.personalize(&mut document, name);

        if self.config.dry_run {
            info!("[dry run] Would write {} ({} paragraphs personalized)", path.display(), changed);
        } else {
            document.save(&path)?;
            debug!("Wrote {} ({} paragraphs personalized)", path.display(), changed);
        }
        Ok(path)
    }

    fn student_name(&self, value: &CellValue) -> Option<String> {
        if value.is_blank() {
            return None;
        }
        let text = value.to_text();
        if !self.config.trim_names {
            return Some(text);
        }
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Output file name for a student: `<prefix><name>.docx`.
///
/// Characters that cannot appear in a file name are replaced by `_`.
pub fn output_file_name(prefix: &str, name: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let invalid = INVALID.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1F]"#).unwrap());
    format!("{}{}.docx", prefix, invalid.replace_all(name, "_"))
}
