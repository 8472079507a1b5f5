//! Error types for certificate generation

use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentError;

/// Which input file a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Template,
    Roster,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Template => write!(f, "Certificate template"),
            InputKind::Roster => write!(f, "Student roster"),
        }
    }
}

/// Errors that can occur while loading inputs or generating certificates
#[derive(Debug, Error)]
pub enum CertError {
    /// Template or roster path does not exist
    #[error("{kind} {} not found", path.display())]
    MissingFile { kind: InputKind, path: PathBuf },

    /// The roster workbook could not be read
    #[error("Failed to read roster {}: {message}", path.display())]
    Roster { path: PathBuf, message: String },

    /// Required column is absent from the roster header
    #[error("Column '{column}' not found in roster")]
    Schema { column: String },

    /// The template could not be loaded, modified or saved
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Unexpected failure while generating the certificate for a row
    #[error("Row {row}: {source}")]
    Batch {
        row: usize,
        #[source]
        source: Box<CertError>,
    },

    /// Invalid generator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CertError {
    /// Wrap an error raised while processing a roster row
    pub fn in_row(self, row: usize) -> Self {
        match self {
            CertError::Schema { .. } | CertError::Batch { .. } => self,
            other => CertError::Batch {
                row,
                source: Box::new(other),
            },
        }
    }
}

/// Result type for certificate generation
pub type Result<T> = std::result::Result<T, CertError>;
