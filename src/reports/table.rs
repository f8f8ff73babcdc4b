//! Format-independent table materialization
//!
//! All three renderer adapters consume the same [`RenderedTable`]: header
//! labels, formatted body cells, the totals row, and the optional
//! amount-in-words summary line. Building it once is what guarantees
//! content parity across PDF, Excel and Word outputs.

use serde_json::Value;

use crate::models::money::{group_thousands, Money};
use crate::models::sort::sort_prior_balance_first;
use crate::models::Row;
use crate::services::amount_words;

use super::template::{ColumnFormat, ReportTemplate, TableColumn};

/// A fully formatted table, ready for layout by any adapter
#[derive(Debug, Clone)]
pub struct RenderedTable {
    /// Column definitions in template order (widths drive layout)
    pub columns: Vec<TableColumn>,
    /// Header labels, one per column
    pub header: Vec<String>,
    /// Formatted body cells, one Vec per data row
    pub body: Vec<Vec<String>>,
    /// Totals row when the template declares aggregates
    pub totals: Option<Vec<String>>,
    /// Amount-in-words summary line under the totals
    pub summary: Option<String>,
}

impl RenderedTable {
    /// Materialize the table for a template and row set.
    ///
    /// Total over its inputs: unknown or null keys become empty cells, and
    /// an out-of-range words conversion drops the summary line rather than
    /// failing the export.
    pub fn build(template: &ReportTemplate, rows: &[Row]) -> Self {
        let header: Vec<String> = template.columns.iter().map(|c| c.label.clone()).collect();

        // The prior-balance pseudo-line is pinned ahead of everything else
        let mut rows: Vec<Row> = rows.to_vec();
        sort_prior_balance_first(&mut rows);
        let rows = &rows[..];

        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                template
                    .columns
                    .iter()
                    .map(|column| format_cell(column.format, row.get(&column.key)))
                    .collect()
            })
            .collect();

        let totals = template.has_totals().then(|| {
            let mut cells: Vec<String> = template
                .columns
                .iter()
                .map(|column| match column.aggregate {
                    Some(_) => {
                        let sum: f64 = rows
                            .iter()
                            .filter_map(|row| row.get(&column.key).and_then(numeric_value))
                            .sum();
                        format_number(column.format, sum)
                    }
                    None => String::new(),
                })
                .collect();

            // Totals label goes in the first non-aggregated column
            if template.columns[0].aggregate.is_none() {
                cells[0] = template.totals_label.clone();
            }
            cells
        });

        let summary = if template.summary_in_words {
            totals.as_ref().and_then(|cells| {
                template
                    .columns
                    .iter()
                    .zip(cells)
                    .find(|(column, _)| column.aggregate.is_some())
                    .and_then(|(_, cell)| summary_line(cell))
            })
        } else {
            None
        };

        Self {
            columns: template.columns.clone(),
            header,
            body,
            totals,
            summary,
        }
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Sum of the column width weights
    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

/// Format one cell value; missing and null values render as empty cells
pub fn format_cell(format: ColumnFormat, value: Option<&Value>) -> String {
    let value = match value {
        Some(Value::Null) | None => return String::new(),
        Some(v) => v,
    };

    match format {
        ColumnFormat::Text | ColumnFormat::Date => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        ColumnFormat::Amount | ColumnFormat::Integer => match numeric_value(value) {
            Some(n) => format_number(format, n),
            // Non-numeric value in a numeric column: show it as text
            None => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        },
    }
}

fn format_number(format: ColumnFormat, n: f64) -> String {
    match format {
        ColumnFormat::Amount => Money::from_f64(n).format_fr(),
        ColumnFormat::Integer => {
            let sign = if n < 0.0 { "-" } else { "" };
            format!("{}{}", sign, group_thousands(n.abs().round() as u64))
        }
        ColumnFormat::Text | ColumnFormat::Date => n.to_string(),
    }
}

/// Numeric view of a JSON value: numbers directly, numeric strings parsed
/// (accepting the French comma separator)
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let normalized: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
                .map(|c| if c == ',' { '.' } else { c })
                .collect();
            normalized.parse().ok()
        }
        _ => None,
    }
}

fn summary_line(total_cell: &str) -> Option<String> {
    let amount = Money::parse(total_cell).ok()?;
    let words = amount_words::amount_to_words(amount).ok()?;
    Some(format!("Arrete le present etat a la somme de {}", words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::template::ReportKind;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn cash_sheet_rows() -> Vec<Row> {
        vec![
            row(&[
                ("date", json!("01/10/2025")),
                ("piece", json!("P-001")),
                ("libelle", json!("Droits administratifs")),
                ("recette", json!(1500.0)),
                ("depense", json!(0)),
                ("solde", json!(1500.0)),
            ]),
            row(&[
                ("date", json!("02/10/2025")),
                ("piece", json!("P-002")),
                ("libelle", json!("Fournitures de bureau")),
                ("recette", json!(0)),
                ("depense", json!(450.5)),
                ("solde", json!(1049.5)),
            ]),
            row(&[
                ("date", json!("03/10/2025")),
                ("piece", json!("P-003")),
                ("libelle", json!("Amendes")),
                ("recette", json!(200)),
                ("depense", json!(0)),
                ("solde", json!(1249.5)),
            ]),
        ]
    }

    #[test]
    fn test_three_rows_render_three_body_rows_plus_header() {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let table = RenderedTable::build(&template, &cash_sheet_rows());

        assert_eq!(table.body.len(), 3);
        assert_eq!(table.header.len(), template.columns.len());
        assert_eq!(table.header[0], "DATE");
    }

    #[test]
    fn test_missing_key_renders_empty_cell() {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let rows = vec![row(&[("libelle", json!("Sans date"))])];
        let table = RenderedTable::build(&template, &rows);

        assert_eq!(table.body[0][0], "");
        assert_eq!(table.body[0][2], "Sans date");
    }

    #[test]
    fn test_null_value_renders_empty_cell() {
        assert_eq!(format_cell(ColumnFormat::Amount, Some(&Value::Null)), "");
        assert_eq!(format_cell(ColumnFormat::Text, None), "");
    }

    #[test]
    fn test_amount_cells_use_french_formatting() {
        assert_eq!(
            format_cell(ColumnFormat::Amount, Some(&json!(1234567.89))),
            "1 234 567,89"
        );
        assert_eq!(format_cell(ColumnFormat::Integer, Some(&json!(12000))), "12 000");
    }

    #[test]
    fn test_numeric_string_cells_are_parsed() {
        assert_eq!(
            format_cell(ColumnFormat::Amount, Some(&json!("1 234,5"))),
            "1 234,50"
        );
    }

    #[test]
    fn test_totals_row_sums_aggregated_columns() {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let table = RenderedTable::build(&template, &cash_sheet_rows());

        let totals = table.totals.unwrap();
        assert_eq!(totals[0], "TOTAL");
        // recette column: 1500 + 0 + 200
        assert_eq!(totals[4], "1 700,00");
        // depense column: 0 + 450.5 + 0
        assert_eq!(totals[5], "450,50");
        // non-aggregated solde column stays empty
        assert_eq!(totals[6], "");
    }

    #[test]
    fn test_summary_spells_first_total_in_words() {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let table = RenderedTable::build(&template, &cash_sheet_rows());

        let summary = table.summary.unwrap();
        assert!(summary.starts_with("Arrete le present etat a la somme de"));
        assert!(summary.contains("mille sept cents francs congolais"));
    }

    #[test]
    fn test_prior_balance_row_is_pinned_first() {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let mut rows = cash_sheet_rows();
        rows.push(row(&[
            ("date", json!("01/10/2025")),
            ("libelle", json!("SOLDE DU MOIS ANTERIEUR")),
            ("imputation", json!("00.00")),
            ("recette", json!(1000)),
            ("depense", json!(0)),
        ]));

        let table = RenderedTable::build(&template, &rows);

        assert_eq!(table.body[0][2], "SOLDE DU MOIS ANTERIEUR");
        assert_eq!(table.body[1][2], "Droits administratifs");
    }

    #[test]
    fn test_no_totals_without_aggregates() {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet)
            .with_columns(vec![TableColumn::text("libelle", "LIBELLE")]);
        let table = RenderedTable::build(&template, &cash_sheet_rows());

        assert!(table.totals.is_none());
        assert!(table.summary.is_none());
    }
}
