//! caisse-cli - Export pipeline for the agency cash-desk reports
//!
//! This library renders the accounting desk's periodic reports (feuille de
//! caisse, sommaire, programmation) into PDF, Excel and Word documents from
//! the command line, with the agency letterhead, colors and watermark
//! resolved from persisted preferences.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Persisted report preferences and path management
//! - `error`: Custom error types
//! - `models`: Core data models (amounts, periods, report-line ordering)
//! - `reports`: Templates, settings resolution and table materialization
//! - `export`: The three renderer adapters and the export orchestrator
//! - `services`: Amount-in-words conversion and feature availability
//! - `audit`: Append-only export history
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use caisse::export::{render_report, ExportFormat};
//! use caisse::reports::{ExportOptions, ExportSettings, ReportKind};
//!
//! let options = ExportOptions::new("FEUILLE DE CAISSE", rows)
//!     .with_kind(ReportKind::CashSheet);
//! let bytes = render_report(ExportFormat::Pdf, &options, &ExportSettings::default())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{CaisseError, CaisseResult};
