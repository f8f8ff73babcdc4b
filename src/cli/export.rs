//! Export CLI command
//!
//! Implements the `caisse export` command: loads report rows from a JSON or
//! CSV file, resolves the template and settings, renders the document and
//! records the attempt in the audit log.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{CaissePaths, ReportPreferences};
use crate::error::{CaisseError, CaisseResult};
use crate::export::{export_report, ConsoleNotifier, ExportFormat};
use crate::models::{Period, Row};
use crate::reports::{ExportOptions, ExportSettings, Orientation, ReportKind, ReportTemplate};

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Path to the rows file (.json array of objects, or .csv with headers)
    pub rows: PathBuf,

    /// Output format (pdf, excel, word)
    #[arg(short, long, default_value = "pdf")]
    pub format: String,

    /// Report kind (cash-sheet, summary, programming)
    #[arg(short, long, default_value = "cash-sheet")]
    pub kind: String,

    /// Report title (defaults to the template name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Report subtitle (defaults to the current period label)
    #[arg(short, long)]
    pub subtitle: Option<String>,

    /// Path to a JSON template definition overriding the registry
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file (defaults to the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Force landscape orientation for this export
    #[arg(long)]
    pub landscape: bool,

    /// Diagonal watermark text for this export
    #[arg(long)]
    pub watermark: Option<String>,

    /// Operator name recorded in the audit log
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Handle the export command
pub fn handle_export_command(paths: &CaissePaths, args: ExportArgs) -> CaisseResult<()> {
    let format = ExportFormat::from_str(&args.format)?;
    let kind = ReportKind::parse(&args.kind);

    let rows = load_rows(&args.rows)?;

    let title = args
        .title
        .unwrap_or_else(|| ReportTemplate::for_kind(kind).name);
    let subtitle = args
        .subtitle
        .unwrap_or_else(|| Period::current().long_label());

    let mut options = ExportOptions::new(&title, rows)
        .with_kind(kind)
        .with_subtitle(subtitle);
    if let Some(template_path) = &args.template {
        options = options.with_template(load_template(template_path)?);
    }

    let prefs = ReportPreferences::load_or_create(paths)?;
    let mut settings = ExportSettings::resolve(Some(&prefs), None);
    if args.landscape {
        settings.orientation = Orientation::Landscape;
    }
    if let Some(watermark) = &args.watermark {
        settings.watermark = Some(watermark.clone());
    }

    let out = match args.output {
        Some(path) => path,
        None => {
            paths.ensure_directories()?;
            paths
                .exports_dir()
                .join(format!("{}.{}", slug(&title), format.extension()))
        }
    };

    let logger = AuditLogger::new(paths.audit_log());
    let result = export_report(format, &options, &settings, &out, &ConsoleNotifier);

    let entry = match &result {
        Ok(()) => AuditEntry::export_success(
            &title,
            format.to_string(),
            out.display().to_string(),
            args.user,
        ),
        Err(e) => {
            AuditEntry::export_failure(&title, format.to_string(), e.to_string(), args.user)
        }
    };
    logger.log(&entry)?;

    result
}

/// Load rows from a JSON array or a CSV file with a header record
fn load_rows(path: &Path) -> CaisseResult<Vec<Row>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => {
            let contents = std::fs::read_to_string(path)?;
            let rows: Vec<Row> = serde_json::from_str(&contents)?;
            Ok(rows)
        }
        "csv" => {
            let mut reader = csv::Reader::from_path(path).map_err(CaisseError::from)?;
            let headers = reader.headers().map_err(CaisseError::from)?.clone();

            let mut rows = Vec::new();
            for record in reader.records() {
                let record = record.map_err(CaisseError::from)?;
                let mut row = Row::new();
                for (header, field) in headers.iter().zip(record.iter()) {
                    row.insert(header.to_string(), serde_json::Value::from(field));
                }
                rows.push(row);
            }
            Ok(rows)
        }
        other => Err(CaisseError::Config(format!(
            "Unsupported rows file extension: '{}'. Use .json or .csv",
            other
        ))),
    }
}

/// Load a custom template definition from a JSON file
fn load_template(path: &Path) -> CaisseResult<ReportTemplate> {
    let contents = std::fs::read_to_string(path)?;
    let template: ReportTemplate = serde_json::from_str(&contents)?;
    template.validate()?;
    Ok(template)
}

/// File-name-safe slug from a report title
fn slug(title: &str) -> String {
    let slug: String = title
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "rapport".to_string()
    } else {
        slug
    }
}
