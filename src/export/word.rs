//! Word renderer adapter
//!
//! Maps the rendered table onto docx paragraph/table flow: centered
//! letterhead and title paragraphs, a table with a shaded header row, the
//! totals row, the configured footer lines in the section footer, and a
//! "Page X / Y" line built from PAGE/NUMPAGES field runs. The watermark is
//! approximated as light-gray header text.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, FieldCharType, Footer, Header, InstrText, PageMargin,
    PageOrientationType, Paragraph, Run, RunFonts, Shading, ShdType, Table, TableCell, TableRow,
    WidthType,
};

use crate::error::{CaisseError, CaisseResult};
use crate::reports::settings::parse_hex_color;
use crate::reports::template::ColumnFormat;
use crate::reports::{ExportOptions, ExportSettings, Orientation, RenderedTable};

// A4 in twentieths of a point
const A4_WIDTH_TWIPS: u32 = 11906;
const A4_HEIGHT_TWIPS: u32 = 16838;

fn mm_to_twips(mm: f32) -> i32 {
    (mm * 1440.0 / 25.4) as i32
}

/// Render the report as an in-memory .docx document
pub fn render(
    options: &ExportOptions,
    table: &RenderedTable,
    settings: &ExportSettings,
) -> CaisseResult<Vec<u8>> {
    let half_points = (settings.font_size * 2.0) as usize;
    let principal = hex_without_hash(&settings.principal_color);
    let header_fill = hex_without_hash(&settings.table_header_color);

    let (page_width, page_height) = match settings.orientation {
        Orientation::Portrait => (A4_WIDTH_TWIPS, A4_HEIGHT_TWIPS),
        Orientation::Landscape => (A4_HEIGHT_TWIPS, A4_WIDTH_TWIPS),
    };

    let mut docx = Docx::new()
        .page_size(page_width, page_height)
        .page_margin(
            PageMargin::new()
                .top(mm_to_twips(settings.margins.top))
                .bottom(mm_to_twips(settings.margins.bottom))
                .left(mm_to_twips(settings.margins.left))
                .right(mm_to_twips(settings.margins.right)),
        );

    if settings.orientation == Orientation::Landscape {
        docx = docx.page_orient(PageOrientationType::Landscape);
    }

    if let Some(watermark) = &settings.watermark {
        docx = docx.header(
            Header::new().add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(styled_run(watermark, settings, half_points * 2).color("D0D0D0")),
            ),
        );
    }

    if settings.show_footer || settings.page_numbers {
        let mut footer = Footer::new();
        if settings.show_footer {
            for line in &settings.footer_lines {
                footer = footer.add_paragraph(
                    Paragraph::new()
                        .align(AlignmentType::Center)
                        .add_run(styled_run(line, settings, half_points.saturating_sub(2))),
                );
            }
        }
        if settings.page_numbers {
            footer = footer.add_paragraph(page_number_paragraph(settings, half_points));
        }
        docx = docx.footer(footer);
    }

    // Letterhead
    for line in &settings.header_lines {
        docx = docx.add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(styled_run(line, settings, half_points + 2).bold().color(&principal)),
        );
    }

    // Title block
    docx = docx.add_paragraph(
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(styled_run(&options.title, settings, half_points + 6).bold()),
    );
    if let Some(subtitle) = &options.subtitle {
        docx = docx.add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(styled_run(subtitle, settings, half_points)),
        );
    }
    docx = docx.add_paragraph(Paragraph::new());

    // Table: header row, body rows, totals row
    let grid = column_grid(table, settings);

    let mut rows: Vec<TableRow> = Vec::with_capacity(table.body.len() + 2);
    rows.push(header_row(table, settings, half_points, &header_fill, &grid));

    for cells in &table.body {
        rows.push(data_row(table, cells, settings, half_points, false, &grid));
    }
    if let Some(totals) = &table.totals {
        rows.push(data_row(table, totals, settings, half_points, true, &grid));
    }

    docx = docx.add_table(Table::new(rows).set_grid(grid));

    if let Some(summary) = &table.summary {
        docx = docx.add_paragraph(Paragraph::new());
        docx = docx.add_paragraph(
            Paragraph::new().add_run(styled_run(summary, settings, half_points).bold()),
        );
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| CaisseError::Export(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Per-column widths in twips from the template weights
fn column_grid(table: &RenderedTable, settings: &ExportSettings) -> Vec<usize> {
    let (page_width, _) = match settings.orientation {
        Orientation::Portrait => (A4_WIDTH_TWIPS, A4_HEIGHT_TWIPS),
        Orientation::Landscape => (A4_HEIGHT_TWIPS, A4_WIDTH_TWIPS),
    };
    let usable = page_width as i32
        - mm_to_twips(settings.margins.left)
        - mm_to_twips(settings.margins.right);
    let unit = usable as f32 / table.total_width();

    table
        .columns
        .iter()
        .map(|c| (c.width * unit) as usize)
        .collect()
}

fn header_row(
    table: &RenderedTable,
    settings: &ExportSettings,
    half_points: usize,
    fill: &str,
    grid: &[usize],
) -> TableRow {
    let cells = table
        .header
        .iter()
        .zip(grid)
        .map(|(label, width)| {
            TableCell::new()
                .width(*width, WidthType::Dxa)
                .shading(Shading::new().shd_type(ShdType::Clear).fill(fill))
                .add_paragraph(
                    Paragraph::new()
                        .align(AlignmentType::Center)
                        .add_run(styled_run(label, settings, half_points).bold().color("FFFFFF")),
                )
        })
        .collect();
    TableRow::new(cells)
}

fn data_row(
    table: &RenderedTable,
    cells: &[String],
    settings: &ExportSettings,
    half_points: usize,
    bold: bool,
    grid: &[usize],
) -> TableRow {
    let cells = table
        .columns
        .iter()
        .zip(cells)
        .zip(grid)
        .map(|((column, cell), width)| {
            let align = match column.format {
                ColumnFormat::Amount | ColumnFormat::Integer => AlignmentType::Right,
                _ => AlignmentType::Left,
            };
            let mut run = styled_run(cell, settings, half_points);
            if bold {
                run = run.bold();
            }
            TableCell::new()
                .width(*width, WidthType::Dxa)
                .add_paragraph(Paragraph::new().align(align).add_run(run))
        })
        .collect();
    TableRow::new(cells)
}

/// "Page X / Y" from PAGE and NUMPAGES fields; the literal "1" runs are the
/// cached values word processors replace when they update fields
fn page_number_paragraph(settings: &ExportSettings, half_points: usize) -> Paragraph {
    let size = half_points.saturating_sub(2);
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(styled_run("Page ", settings, size))
        .add_run(field_char(FieldCharType::Begin))
        .add_run(instr_run("PAGE"))
        .add_run(field_char(FieldCharType::Separate))
        .add_run(styled_run("1", settings, size))
        .add_run(field_char(FieldCharType::End))
        .add_run(styled_run(" / ", settings, size))
        .add_run(field_char(FieldCharType::Begin))
        .add_run(instr_run("NUMPAGES"))
        .add_run(field_char(FieldCharType::Separate))
        .add_run(styled_run("1", settings, size))
        .add_run(field_char(FieldCharType::End))
}

fn field_char(char_type: FieldCharType) -> Run {
    Run::new().add_field_char(char_type, false)
}

fn instr_run(code: &str) -> Run {
    Run::new().add_instr_text(InstrText::Unsupported(code.to_string()))
}

fn styled_run(text: &str, settings: &ExportSettings, half_points: usize) -> Run {
    Run::new()
        .add_text(text)
        .size(half_points)
        .fonts(RunFonts::new().ascii(&settings.font_name))
}

fn hex_without_hash(color: &str) -> String {
    let (r, g, b) = parse_hex_color(color);
    format!("{:02X}{:02X}{:02X}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportKind, ReportTemplate};
    use serde_json::json;

    fn sample() -> (ExportOptions, RenderedTable) {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let rows: Vec<crate::models::Row> = (1..=2)
            .map(|i| {
                let mut row = crate::models::Row::new();
                row.insert("date".into(), json!("05/10/2025"));
                row.insert("libelle".into(), json!(format!("Piece {}", i)));
                row.insert("recette".into(), json!(i * 500));
                row.insert("depense".into(), json!(0));
                row
            })
            .collect();
        let table = RenderedTable::build(&template, &rows);
        let options = ExportOptions::new("FEUILLE DE CAISSE", rows);
        (options, table)
    }

    #[test]
    fn test_render_produces_zip_container() {
        let (options, table) = sample();
        let bytes = render(&options, &table, &ExportSettings::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_with_watermark_and_landscape() {
        let (options, table) = sample();
        let mut settings = ExportSettings::default();
        settings.watermark = Some("COPIE".into());
        settings.orientation = Orientation::Landscape;

        let bytes = render(&options, &table, &settings).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_without_footer_or_page_numbers() {
        let (options, table) = sample();
        let mut settings = ExportSettings::default();
        settings.show_footer = false;
        settings.page_numbers = false;

        let bytes = render(&options, &table, &settings).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_hex_without_hash() {
        assert_eq!(hex_without_hash("#1f4e79"), "1F4E79");
        assert_eq!(hex_without_hash("FF0000"), "FF0000");
    }
}
