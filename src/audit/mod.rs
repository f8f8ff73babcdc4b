//! Audit logging for exports and settings changes
//!
//! Records every export attempt (including failures) and every settings
//! change in an append-only audit log.
//!
//! # Architecture
//!
//! The audit system consists of two components:
//!
//! - `AuditEntry`: Represents a single audit log entry with timestamp,
//!   operation, outcome, and export details.
//! - `AuditLogger`: Handles writing entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use caisse::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//!
//! let entry = AuditEntry::export_success(
//!     "FEUILLE DE CAISSE",
//!     "PDF",
//!     "/exports/feuille-2025-10.pdf",
//!     Some("mkashama".to_string()),
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome};
pub use logger::AuditLogger;
