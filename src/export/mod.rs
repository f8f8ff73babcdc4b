//! Report export pipeline
//!
//! `render_report` is the pure fan-out: it resolves the template, builds the
//! shared [`RenderedTable`](crate::reports::RenderedTable) and hands it to
//! exactly one adapter, returning the document bytes. `export_report` adds
//! the boundary effects: the file write and the success/failure
//! notifications. Failures are never swallowed; they are reported through
//! the notifier and returned to the caller.

pub mod excel;
pub mod pdf;
pub mod word;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CaisseError, CaisseResult};
use crate::reports::{ExportOptions, ExportSettings, RenderedTable};

/// The closed set of output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
    Word,
}

impl ExportFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
            Self::Word => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Excel => write!(f, "Excel"),
            Self::Word => write!(f, "Word"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CaisseError;

    /// Strict parsing: anything outside pdf/excel/word fails loudly.
    ///
    /// Unlike the report-kind fallback, a bad format selector is a caller
    /// bug and must never silently pick a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "excel" | "xlsx" => Ok(Self::Excel),
            "word" | "docx" => Ok(Self::Word),
            other => Err(CaisseError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Notification channel surfaced to the user after an export
pub trait Notifier {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Console notifier used by the CLI
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn failure(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// No-op notifier for embedding the pipeline without user-facing output
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn success(&self, _message: &str) {}
    fn failure(&self, _message: &str) {}
}

/// Render a report into document bytes without performing any I/O.
///
/// Template resolution runs first and fails fast before any adapter work.
pub fn render_report(
    format: ExportFormat,
    options: &ExportOptions,
    settings: &ExportSettings,
) -> CaisseResult<Vec<u8>> {
    let template = options.resolve_template()?;
    let table = RenderedTable::build(&template, &options.rows);

    let result = match format {
        ExportFormat::Pdf => pdf::render(options, &table, settings),
        ExportFormat::Excel => excel::render(options, &table, settings),
        ExportFormat::Word => word::render(options, &table, settings),
    };

    // Tag adapter failures with the originating format and report title
    result.map_err(|e| match e {
        CaisseError::Render { .. } => e,
        other => CaisseError::render(format.to_string(), options.title.clone(), other.to_string()),
    })
}

/// Render a report and write it to `out`, reporting the outcome through the
/// notifier.
///
/// On failure the notification names the format and title, and the error is
/// returned to the caller so upstream code can react. A failed call may
/// leave a partially written file behind; cleanup is the caller's concern.
pub fn export_report(
    format: ExportFormat,
    options: &ExportOptions,
    settings: &ExportSettings,
    out: &Path,
    notifier: &dyn Notifier,
) -> CaisseResult<()> {
    let outcome = render_report(format, options, settings)
        .and_then(|bytes| std::fs::write(out, bytes).map_err(CaisseError::from));

    match outcome {
        Ok(()) => {
            notifier.success(&format!(
                "Rapport {} genere: {}",
                format,
                out.display()
            ));
            Ok(())
        }
        Err(e) => {
            notifier.failure(&format!(
                "Echec de l'export {} du rapport '{}': {}",
                format, options.title, e
            ));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;
    use crate::reports::ReportKind;
    use serde_json::json;
    use std::cell::RefCell;

    fn sample_rows() -> Vec<Row> {
        (1..=3)
            .map(|i| {
                let mut row = Row::new();
                row.insert("date".into(), json!(format!("0{}/10/2025", i)));
                row.insert("libelle".into(), json!(format!("Operation {}", i)));
                row.insert("recette".into(), json!(i * 100));
                row.insert("depense".into(), json!(0));
                row
            })
            .collect()
    }

    fn sample_options() -> ExportOptions {
        ExportOptions::new("Feuille de caisse", sample_rows()).with_kind(ReportKind::CashSheet)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("word".parse::<ExportFormat>().unwrap(), ExportFormat::Word);
    }

    #[test]
    fn test_unknown_format_fails_loudly() {
        let err = "html".parse::<ExportFormat>().unwrap_err();
        assert!(err.is_unsupported_format());
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let bytes = render_report(
            ExportFormat::Pdf,
            &sample_options(),
            &ExportSettings::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_excel_produces_xlsx_bytes() {
        let bytes = render_report(
            ExportFormat::Excel,
            &sample_options(),
            &ExportSettings::default(),
        )
        .unwrap();
        // xlsx is a ZIP container
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_word_produces_docx_bytes() {
        let bytes = render_report(
            ExportFormat::Word,
            &sample_options(),
            &ExportSettings::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_bad_template_fails_before_rendering() {
        let options = sample_options().with_columns(vec![]);
        let err = render_report(ExportFormat::Pdf, &options, &ExportSettings::default())
            .unwrap_err();
        assert!(err.is_template());
    }

    struct RecordingNotifier {
        messages: RefCell<Vec<(bool, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages.borrow_mut().push((true, message.to_string()));
        }

        fn failure(&self, message: &str) {
            self.messages.borrow_mut().push((false, message.to_string()));
        }
    }

    #[test]
    fn test_export_notifies_success_and_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("feuille.xlsx");
        let notifier = RecordingNotifier {
            messages: RefCell::new(Vec::new()),
        };

        export_report(
            ExportFormat::Excel,
            &sample_options(),
            &ExportSettings::default(),
            &out,
            &notifier,
        )
        .unwrap();

        assert!(out.exists());
        let messages = notifier.messages.borrow();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].0);
    }

    #[test]
    fn test_export_failure_notifies_and_propagates() {
        let notifier = RecordingNotifier {
            messages: RefCell::new(Vec::new()),
        };
        let options = sample_options().with_columns(vec![]);

        let result = export_report(
            ExportFormat::Pdf,
            &options,
            &ExportSettings::default(),
            Path::new("/nonexistent/out.pdf"),
            &notifier,
        );

        assert!(result.is_err());
        let messages = notifier.messages.borrow();
        assert_eq!(messages.len(), 1);
        assert!(!messages[0].0);
        assert!(messages[0].1.contains("PDF"));
        assert!(messages[0].1.contains("Feuille de caisse"));
    }
}
