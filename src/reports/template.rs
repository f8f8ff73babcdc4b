//! Report templates and the template registry
//!
//! A template is an immutable value object: an ordered column sequence plus
//! section metadata (title block, totals/summary block). Three built-in
//! kinds are registered; callers may substitute a fully custom template or
//! replace just the column sequence.

use serde::{Deserialize, Serialize};

use crate::error::{CaisseError, CaisseResult};

/// The known report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Daily cash sheet (feuille de caisse)
    #[default]
    CashSheet,
    /// Periodic summary by rubrique (sommaire)
    Summary,
    /// Expense programming (programmation)
    Programming,
}

impl ReportKind {
    /// Parse a kind name, falling back to the cash sheet for unknown input.
    ///
    /// The fallback-on-unknown behavior is kept for compatibility with
    /// existing callers even though it can mask typos; the export format
    /// selector is the strict one, not the kind.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash-sheet" | "caisse" | "feuille-caisse" => Self::CashSheet,
            "summary" | "sommaire" => Self::Summary,
            "programming" | "programmation" => Self::Programming,
            _ => Self::CashSheet,
        }
    }
}

/// How a cell value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    /// Default string coercion
    #[default]
    Text,
    /// French-formatted monetary amount ("12 345,67")
    Amount,
    /// Grouped integer ("12 345")
    Integer,
    /// Date string, passed through unchanged
    Date,
}

/// Column aggregation rule for the totals row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Sum,
}

fn default_width() -> f32 {
    1.0
}

/// One column of a report table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Key used to index into the row records
    pub key: String,
    /// Header label printed above the column
    pub label: String,
    /// Cell value formatter
    #[serde(default)]
    pub format: ColumnFormat,
    /// Aggregation applied for the totals row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    /// Relative width weight (1.0 = normal column)
    #[serde(default = "default_width")]
    pub width: f32,
}

impl TableColumn {
    /// A plain text column
    pub fn text(key: &str, label: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            format: ColumnFormat::Text,
            aggregate: None,
            width: 1.0,
        }
    }

    /// A monetary amount column
    pub fn amount(key: &str, label: &str) -> Self {
        Self {
            format: ColumnFormat::Amount,
            ..Self::text(key, label)
        }
    }

    /// A date column
    pub fn date(key: &str, label: &str) -> Self {
        Self {
            format: ColumnFormat::Date,
            ..Self::text(key, label)
        }
    }

    /// Declare a sum aggregate for the totals row
    pub fn with_sum(mut self) -> Self {
        self.aggregate = Some(Aggregate::Sum);
        self
    }

    /// Set the relative width weight
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// A declarative report template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTemplate {
    /// Section title printed when the caller supplies no title of its own
    pub name: String,
    /// Ordered column sequence
    pub columns: Vec<TableColumn>,
    /// Label of the totals row
    #[serde(default = "default_totals_label")]
    pub totals_label: String,
    /// Whether the summary block spells the first total out in words
    /// ("Arrete le present etat a la somme de ...")
    #[serde(default)]
    pub summary_in_words: bool,
}

fn default_totals_label() -> String {
    "TOTAL".to_string()
}

impl ReportTemplate {
    /// Look up the built-in template for a report kind
    pub fn for_kind(kind: ReportKind) -> Self {
        match kind {
            ReportKind::CashSheet => cash_sheet_template(),
            ReportKind::Summary => summary_template(),
            ReportKind::Programming => programming_template(),
        }
    }

    /// Shallow copy with the column sequence replaced
    pub fn with_columns(mut self, columns: Vec<TableColumn>) -> Self {
        self.columns = columns;
        self
    }

    /// Check the template invariants: at least one column, unique keys.
    ///
    /// Run before any rendering work begins so a malformed custom template
    /// fails fast.
    pub fn validate(&self) -> CaisseResult<()> {
        if self.columns.is_empty() {
            return Err(CaisseError::Template(format!(
                "template '{}' has no columns",
                self.name
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.key.as_str()) {
                return Err(CaisseError::Template(format!(
                    "template '{}' has duplicate column key '{}'",
                    self.name, column.key
                )));
            }
        }

        Ok(())
    }

    /// Whether any column declares an aggregate (totals row needed)
    pub fn has_totals(&self) -> bool {
        self.columns.iter().any(|c| c.aggregate.is_some())
    }
}

fn cash_sheet_template() -> ReportTemplate {
    ReportTemplate {
        name: "FEUILLE DE CAISSE".into(),
        columns: vec![
            TableColumn::date("date", "DATE").with_width(0.9),
            TableColumn::text("piece", "N PIECE").with_width(0.8),
            TableColumn::text("libelle", "LIBELLE").with_width(2.4),
            TableColumn::text("imputation", "IMPUTATION").with_width(0.9),
            TableColumn::amount("recette", "RECETTES").with_sum(),
            TableColumn::amount("depense", "DEPENSES").with_sum(),
            TableColumn::amount("solde", "SOLDE"),
        ],
        totals_label: default_totals_label(),
        summary_in_words: true,
    }
}

fn summary_template() -> ReportTemplate {
    ReportTemplate {
        name: "SOMMAIRE DES RECETTES ET DEPENSES".into(),
        columns: vec![
            TableColumn::text("rubrique", "RUBRIQUE").with_width(0.9),
            TableColumn::text("libelle", "LIBELLE").with_width(2.4),
            TableColumn::amount("recettes", "RECETTES").with_sum(),
            TableColumn::amount("depenses", "DEPENSES").with_sum(),
            TableColumn::amount("solde", "SOLDE"),
        ],
        totals_label: default_totals_label(),
        summary_in_words: true,
    }
}

fn programming_template() -> ReportTemplate {
    ReportTemplate {
        name: "PROGRAMMATION DES DEPENSES".into(),
        columns: vec![
            TableColumn::text("code", "CODE").with_width(0.8),
            TableColumn::text("libelle", "LIBELLE").with_width(2.4),
            TableColumn::amount("prevision", "PREVISION").with_sum(),
            TableColumn::amount("engagement", "ENGAGEMENT").with_sum(),
            TableColumn::amount("disponible", "DISPONIBLE"),
        ],
        totals_label: default_totals_label(),
        summary_in_words: false,
    }
}
