//! Custom error types for caisse-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for caisse-cli operations
#[derive(Error, Debug)]
pub enum CaisseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Template resolution errors (missing columns, duplicate keys)
    #[error("Template error: {0}")]
    Template(String),

    /// Adapter emission errors, tagged with the originating format and
    /// report title for diagnosis
    #[error("{format} rendering failed for '{title}': {message}")]
    Render {
        format: String,
        title: String,
        message: String,
    },

    /// Format selector outside the closed pdf/excel/word set
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Amount outside the range the number-naming scheme supports
    #[error("Amount out of range for words conversion: {0}")]
    AmountRange(i64),

    /// Generic document-generation errors from the underlying libraries
    #[error("Export error: {0}")]
    Export(String),

    /// Audit log errors
    #[error("Audit error: {0}")]
    Audit(String),
}

impl CaisseError {
    /// Create a render error tagged with the failing format and report title
    pub fn render(
        format: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Render {
            format: format.into(),
            title: title.into(),
            message: message.into(),
        }
    }

    /// Check if this is a template resolution error
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Check if this is an unsupported-format error
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CaisseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CaisseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CaisseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for caisse-cli operations
pub type CaisseResult<T> = Result<T, CaisseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaisseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_render_error_names_format_and_title() {
        let err = CaisseError::render("PDF", "Feuille de caisse", "bad cell");
        assert_eq!(
            err.to_string(),
            "PDF rendering failed for 'Feuille de caisse': bad cell"
        );
    }

    #[test]
    fn test_unsupported_format() {
        let err = CaisseError::UnsupportedFormat("html".into());
        assert!(err.is_unsupported_format());
        assert_eq!(err.to_string(), "Unsupported export format: html");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let caisse_err: CaisseError = io_err.into();
        assert!(matches!(caisse_err, CaisseError::Io(_)));
    }
}
