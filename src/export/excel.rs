//! Excel renderer adapter
//!
//! Maps the rendered table onto a single worksheet: merged letterhead and
//! title rows, a colored column-header row, typed body cells (amount cells
//! are written as numbers so spreadsheets can keep computing with them),
//! the totals row, and the footer block. Page setup carries orientation
//! and page numbering.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::{CaisseError, CaisseResult};
use crate::models::Money;
use crate::reports::settings::parse_hex_color;
use crate::reports::template::ColumnFormat;
use crate::reports::{ExportOptions, ExportSettings, Orientation, RenderedTable};

const AMOUNT_NUM_FORMAT: &str = "#,##0.00";

/// Render the report as an in-memory .xlsx workbook
pub fn render(
    options: &ExportOptions,
    table: &RenderedTable,
    settings: &ExportSettings,
) -> CaisseResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Rapport").map_err(xlsx_err)?;

    let last_col = (table.column_count() - 1) as u16;
    let principal = Color::RGB(rgb_value(&settings.principal_color));
    let header_fill = Color::RGB(rgb_value(&settings.table_header_color));

    // Column widths from the template weights
    let unit = 14.0;
    for (i, column) in table.columns.iter().enumerate() {
        worksheet
            .set_column_width(i as u16, (column.width * unit) as f64)
            .map_err(xlsx_err)?;
    }

    let letterhead_format = Format::new()
        .set_bold()
        .set_font_name(&settings.font_name)
        .set_font_size(settings.font_size as f64 + 1.0)
        .set_font_color(principal)
        .set_align(FormatAlign::Center);
    let title_format = Format::new()
        .set_bold()
        .set_font_name(&settings.font_name)
        .set_font_size(settings.font_size as f64 + 3.0)
        .set_align(FormatAlign::Center);
    let subtitle_format = Format::new()
        .set_font_name(&settings.font_name)
        .set_font_size(settings.font_size as f64)
        .set_align(FormatAlign::Center);

    let mut row = 0u32;

    for line in &settings.header_lines {
        write_across(worksheet, row, last_col, line, &letterhead_format)?;
        row += 1;
    }
    row += 1;

    write_across(worksheet, row, last_col, &options.title, &title_format)?;
    row += 1;
    if let Some(subtitle) = &options.subtitle {
        write_across(worksheet, row, last_col, subtitle, &subtitle_format)?;
        row += 1;
    }
    row += 1;

    let column_header_format = Format::new()
        .set_bold()
        .set_font_name(&settings.font_name)
        .set_font_size(settings.font_size as f64)
        .set_font_color(Color::White)
        .set_background_color(header_fill)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    for (col, label) in table.header.iter().enumerate() {
        worksheet
            .write_string_with_format(row, col as u16, label, &column_header_format)
            .map_err(xlsx_err)?;
    }
    row += 1;

    let text_format = Format::new()
        .set_font_name(&settings.font_name)
        .set_font_size(settings.font_size as f64)
        .set_border(FormatBorder::Thin);
    let amount_format = Format::new()
        .set_font_name(&settings.font_name)
        .set_font_size(settings.font_size as f64)
        .set_border(FormatBorder::Thin)
        .set_num_format(AMOUNT_NUM_FORMAT);

    for cells in &table.body {
        write_data_row(worksheet, row, table, cells, &text_format, &amount_format)?;
        row += 1;
    }

    if let Some(totals) = &table.totals {
        let totals_text = Format::new()
            .set_bold()
            .set_font_name(&settings.font_name)
            .set_font_size(settings.font_size as f64)
            .set_border(FormatBorder::Thin);
        let totals_amount = Format::new()
            .set_bold()
            .set_font_name(&settings.font_name)
            .set_font_size(settings.font_size as f64)
            .set_border(FormatBorder::Thin)
            .set_num_format(AMOUNT_NUM_FORMAT);
        write_data_row(worksheet, row, table, totals, &totals_text, &totals_amount)?;
        row += 1;
    }

    if let Some(summary) = &table.summary {
        row += 1;
        let summary_format = Format::new()
            .set_bold()
            .set_italic()
            .set_font_name(&settings.font_name)
            .set_font_size(settings.font_size as f64);
        write_across(worksheet, row, last_col, summary, &summary_format)?;
        row += 1;
    }

    if settings.show_footer {
        row += 1;
        let footer_format = Format::new()
            .set_font_name(&settings.font_name)
            .set_font_size(settings.font_size as f64 - 1.0)
            .set_align(FormatAlign::Center);
        for line in &settings.footer_lines {
            write_across(worksheet, row, last_col, line, &footer_format)?;
            row += 1;
        }
    }

    // Page setup: A4, orientation, print margins, print-time header/footer
    worksheet.set_paper_size(9);
    worksheet.set_margins(
        mm_to_inches(settings.margins.left),
        mm_to_inches(settings.margins.right),
        mm_to_inches(settings.margins.top),
        mm_to_inches(settings.margins.bottom),
        -1.0,
        -1.0,
    );
    if settings.orientation == Orientation::Landscape {
        worksheet.set_landscape();
    }
    if let Some(watermark) = &settings.watermark {
        worksheet.set_header(&format!("&C{}", watermark));
    }
    if settings.page_numbers {
        worksheet.set_footer("&CPage &P / &N");
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Write a body or totals row: amount/integer cells become numbers when the
/// formatted string parses back, everything else stays a string
fn write_data_row(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    table: &RenderedTable,
    cells: &[String],
    text_format: &Format,
    amount_format: &Format,
) -> CaisseResult<()> {
    for (col, (column, cell)) in table.columns.iter().zip(cells).enumerate() {
        let col = col as u16;
        let numeric = matches!(
            column.format,
            ColumnFormat::Amount | ColumnFormat::Integer
        );

        if numeric && !cell.is_empty() {
            if let Ok(amount) = Money::parse(cell) {
                worksheet
                    .write_number_with_format(row, col, amount.to_f64(), amount_format)
                    .map_err(xlsx_err)?;
                continue;
            }
        }
        worksheet
            .write_string_with_format(row, col, cell, text_format)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

/// Write a line merged across the table width (plain write for one column)
fn write_across(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    last_col: u16,
    text: &str,
    format: &Format,
) -> CaisseResult<()> {
    if last_col == 0 {
        worksheet
            .write_string_with_format(row, 0, text, format)
            .map_err(xlsx_err)?;
    } else {
        worksheet
            .merge_range(row, 0, row, last_col, text, format)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

fn mm_to_inches(mm: f32) -> f64 {
    mm as f64 / 25.4
}

fn rgb_value(hex: &str) -> u32 {
    let (r, g, b) = parse_hex_color(hex);
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> CaisseError {
    CaisseError::Export(e.to_string())
}
