//! Error types for DOCX operations

use thiserror::Error;

/// Errors that can occur while loading or saving a DOCX document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing or writing error
    #[error("XML error in {part}: {message}")]
    Xml { part: String, message: String },

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl DocumentError {
    pub(crate) fn xml(part: &str, err: impl std::fmt::Display) -> Self {
        DocumentError::Xml {
            part: part.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for DOCX operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;
