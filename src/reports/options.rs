//! Per-call export options
//!
//! The options bundle is constructed by the caller, consumed by one export
//! call, and discarded. Template resolution lives here: a fully custom
//! template wins over the registry kind, and an ad hoc column sequence can
//! replace the template's columns either way.

use crate::error::CaisseResult;
use crate::models::Row;

use super::template::{ReportKind, ReportTemplate, TableColumn};

/// Everything one export call needs besides the effective settings
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Report title printed under the letterhead
    pub title: String,
    /// Optional subtitle (typically the period label)
    pub subtitle: Option<String>,
    /// Already-materialized row records; the pipeline only reads them
    pub rows: Vec<Row>,
    /// Built-in report kind used when no custom template is supplied
    pub kind: ReportKind,
    /// Fully custom template, validated before rendering
    pub template: Option<ReportTemplate>,
    /// Ad hoc column override applied to whichever template is selected
    pub columns: Option<Vec<TableColumn>>,
}

impl ExportOptions {
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            rows,
            kind: ReportKind::default(),
            template: None,
            columns: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_kind(mut self, kind: ReportKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_template(mut self, template: ReportTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_columns(mut self, columns: Vec<TableColumn>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Select and validate the template for this call.
    ///
    /// Fails fast on a malformed custom template or column override so no
    /// rendering work starts on a bad definition.
    pub fn resolve_template(&self) -> CaisseResult<ReportTemplate> {
        let mut template = match &self.template {
            Some(custom) => custom.clone(),
            None => ReportTemplate::for_kind(self.kind),
        };

        if let Some(columns) = &self.columns {
            template = template.with_columns(columns.clone());
        }

        template.validate()?;
        Ok(template)
    }
}
