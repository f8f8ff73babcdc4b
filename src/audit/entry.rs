//! Audit entry data structures
//!
//! Defines the structure of audit log entries: the audited operation kinds
//! and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A report was exported
    Export,
    /// Report preferences were changed
    SettingsUpdate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Export => write!(f, "EXPORT"),
            Operation::SettingsUpdate => write!(f, "SETTINGS"),
        }
    }
}

/// Outcome of the audited operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "OK"),
            Outcome::Failure => write!(f, "FAILED"),
        }
    }
}

/// A single audit log entry
///
/// Records one export attempt or settings change, including the outcome so
/// failed exports stay visible in the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Whether the operation succeeded
    pub outcome: Outcome,

    /// Report title (for exports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Output format ("PDF", "Excel", "Word")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Path the document was written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Operator name, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Error message for failed operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Create an entry for a successful export
    pub fn export_success(
        title: impl Into<String>,
        format: impl Into<String>,
        output: impl Into<String>,
        user: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Export,
            outcome: Outcome::Success,
            title: Some(title.into()),
            format: Some(format.into()),
            output: Some(output.into()),
            user,
            error: None,
        }
    }

    /// Create an entry for a failed export
    pub fn export_failure(
        title: impl Into<String>,
        format: impl Into<String>,
        error: impl Into<String>,
        user: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Export,
            outcome: Outcome::Failure,
            title: Some(title.into()),
            format: Some(format.into()),
            output: None,
            user,
            error: Some(error.into()),
        }
    }

    /// Create an entry for a settings change
    pub fn settings_update(description: impl Into<String>, user: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::SettingsUpdate,
            outcome: Outcome::Success,
            title: Some(description.into()),
            format: None,
            output: None,
            user,
            error: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.outcome,
        );

        if let Some(format) = &self.format {
            output.push_str(&format!(" {}", format));
        }
        if let Some(title) = &self.title {
            output.push_str(&format!(" '{}'", title));
        }
        if let Some(path) = &self.output {
            output.push_str(&format!(" -> {}", path));
        }
        if let Some(user) = &self.user {
            output.push_str(&format!(" (par {})", user));
        }
        if let Some(error) = &self.error {
            output.push_str(&format!("\n  Erreur: {}", error));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Export.to_string(), "EXPORT");
        assert_eq!(Operation::SettingsUpdate.to_string(), "SETTINGS");
    }

    #[test]
    fn test_export_success_entry() {
        let entry = AuditEntry::export_success(
            "Feuille de caisse",
            "PDF",
            "/tmp/feuille.pdf",
            Some("mkashama".to_string()),
        );

        assert_eq!(entry.operation, Operation::Export);
        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.format.as_deref(), Some("PDF"));
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_export_failure_entry() {
        let entry = AuditEntry::export_failure(
            "Feuille de caisse",
            "Excel",
            "disk full",
            None,
        );

        assert_eq!(entry.outcome, Outcome::Failure);
        assert_eq!(entry.error.as_deref(), Some("disk full"));
        assert!(entry.output.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::export_success("Etat", "Word", "/tmp/etat.docx", None);

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Export);
        assert_eq!(deserialized.output.as_deref(), Some("/tmp/etat.docx"));
        // Skipped fields must not appear on the wire
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::export_failure("Sommaire", "PDF", "bad cell", None);

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("EXPORT"));
        assert!(formatted.contains("FAILED"));
        assert!(formatted.contains("Sommaire"));
        assert!(formatted.contains("bad cell"));
    }
}
