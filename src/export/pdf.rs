//! PDF renderer adapter
//!
//! Lays the rendered table out on A4 pages with pdf-writer's content-stream
//! primitives and the built-in Helvetica fonts (WinAnsi encoding, which
//! covers the French character set). Emission order per page is strict:
//! watermark underlay, header block, title block, table, totals, footer.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::error::CaisseResult;
use crate::reports::settings::parse_hex_color;
use crate::reports::{ExportOptions, ExportSettings, Orientation, RenderedTable};
use crate::reports::template::ColumnFormat;

const A4_WIDTH: f32 = 595.28;
const A4_HEIGHT: f32 = 841.89;

const HEADER_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 13.0;
const FOOTER_SIZE: f32 = 8.0;

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

struct Layout {
    page_width: f32,
    page_height: f32,
    margin_top: f32,
    margin_bottom: f32,
    margin_left: f32,
    margin_right: f32,
    body_size: f32,
    row_height: f32,
    footer_reserve: f32,
}

impl Layout {
    fn new(settings: &ExportSettings) -> Self {
        let (page_width, page_height) = match settings.orientation {
            Orientation::Portrait => (A4_WIDTH, A4_HEIGHT),
            Orientation::Landscape => (A4_HEIGHT, A4_WIDTH),
        };

        let body_size = settings.font_size;
        let footer_lines = if settings.show_footer {
            settings.footer_lines.len()
        } else {
            0
        };
        let page_number_line = usize::from(settings.page_numbers);
        let footer_reserve = (footer_lines + page_number_line) as f32 * (FOOTER_SIZE + 3.0) + 6.0;

        Self {
            page_width,
            page_height,
            margin_top: mm_to_pt(settings.margins.top),
            margin_bottom: mm_to_pt(settings.margins.bottom),
            margin_left: mm_to_pt(settings.margins.left),
            margin_right: mm_to_pt(settings.margins.right),
            body_size,
            row_height: body_size * 1.6,
            footer_reserve,
        }
    }

    fn table_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    fn content_top(&self) -> f32 {
        self.page_height - self.margin_top
    }

    fn content_bottom(&self) -> f32 {
        self.margin_bottom + self.footer_reserve
    }

    fn column_header_height(&self) -> f32 {
        self.body_size * 1.9
    }

    /// Height of the letterhead + title block on the first page
    fn title_block_height(&self, options: &ExportOptions, settings: &ExportSettings) -> f32 {
        let header = settings.header_lines.len() as f32 * (HEADER_SIZE + 3.0);
        let title = TITLE_SIZE + 6.0;
        let subtitle = if options.subtitle.is_some() {
            self.body_size + 4.0
        } else {
            0.0
        };
        header + 8.0 + title + subtitle + 8.0
    }
}

/// Split `row_count` rows into per-page chunks.
///
/// `tail_rows` is the number of pseudo-rows (totals, summary) that must fit
/// under the last data row; a final page is added for them if needed.
fn paginate(row_count: usize, first_capacity: usize, other_capacity: usize, tail_rows: usize)
    -> Vec<std::ops::Range<usize>>
{
    let first_capacity = first_capacity.max(1);
    let other_capacity = other_capacity.max(1);

    let mut pages = Vec::new();
    let mut start = 0;
    loop {
        let capacity = if pages.is_empty() {
            first_capacity
        } else {
            other_capacity
        };
        let end = (start + capacity).min(row_count);
        pages.push(start..end);
        if end == row_count {
            // Does the tail still fit on this page?
            let used = end - start;
            if tail_rows > 0 && used + tail_rows > capacity {
                pages.push(row_count..row_count);
            }
            break;
        }
        start = end;
    }
    pages
}

/// Render the report as a complete PDF document
pub fn render(
    options: &ExportOptions,
    table: &RenderedTable,
    settings: &ExportSettings,
) -> CaisseResult<Vec<u8>> {
    let layout = Layout::new(settings);

    let content_height = layout.content_top() - layout.content_bottom();
    let first_capacity = ((content_height
        - layout.title_block_height(options, settings)
        - layout.column_header_height())
        / layout.row_height) as usize;
    let other_capacity =
        ((content_height - layout.column_header_height()) / layout.row_height) as usize;

    let tail_rows = usize::from(table.totals.is_some()) + 2 * usize::from(table.summary.is_some());
    let pages = paginate(table.body.len(), first_capacity, other_capacity, tail_rows);
    let page_count = pages.len();

    let catalog = Ref::new(1);
    let page_tree = Ref::new(2);
    let font_regular = Ref::new(3);
    let font_bold = Ref::new(4);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog).pages(page_tree);

    let page_ids: Vec<Ref> = (0..page_count)
        .map(|i| Ref::new(5 + 2 * i as i32))
        .collect();
    let content_ids: Vec<Ref> = (0..page_count)
        .map(|i| Ref::new(6 + 2 * i as i32))
        .collect();

    {
        let mut tree = pdf.pages(page_tree);
        tree.kids(page_ids.iter().copied());
        tree.count(page_count as i32);
    }

    pdf.type1_font(font_regular)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(font_bold)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (index, range) in pages.iter().enumerate() {
        let is_first = index == 0;
        let is_last = index == page_count - 1;

        let mut content = Content::new();

        if let Some(text) = &settings.watermark {
            draw_watermark(&mut content, &layout, text);
        }

        let mut y = layout.content_top();

        if is_first {
            y = draw_title_block(&mut content, &layout, options, settings, y);
        }

        y = draw_column_header(&mut content, &layout, table, settings, y);
        let table_top = y + layout.column_header_height();

        for row in &table.body[range.clone()] {
            y = draw_row(&mut content, &layout, table, row, y, false);
        }

        if is_last {
            if let Some(totals) = &table.totals {
                y = draw_row(&mut content, &layout, table, totals, y, true);
            }
        }

        draw_grid(&mut content, &layout, table, table_top, y);

        if is_last {
            if let Some(summary) = &table.summary {
                y -= layout.row_height;
                draw_text(
                    &mut content,
                    layout.margin_left,
                    y,
                    layout.body_size,
                    true,
                    summary,
                );
            }
        }

        draw_footer(&mut content, &layout, settings, index + 1, page_count);

        let mut page = pdf.page(page_ids[index]);
        page.media_box(Rect::new(0.0, 0.0, layout.page_width, layout.page_height));
        page.parent(page_tree);
        page.contents(content_ids[index]);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), font_regular);
            fonts.pair(Name(b"F2"), font_bold);
        }
        page.finish();

        pdf.stream(content_ids[index], &content.finish());
    }

    Ok(pdf.finish())
}

fn draw_title_block(
    content: &mut Content,
    layout: &Layout,
    options: &ExportOptions,
    settings: &ExportSettings,
    mut y: f32,
) -> f32 {
    let center = layout.page_width / 2.0;
    let principal = color_components(&settings.principal_color);

    set_fill(content, principal);
    for line in &settings.header_lines {
        y -= HEADER_SIZE + 3.0;
        draw_text_centered(content, center, y, HEADER_SIZE, true, line);
    }

    y -= 8.0;
    set_fill(content, (0.0, 0.0, 0.0));
    y -= TITLE_SIZE + 6.0;
    draw_text_centered(content, center, y, TITLE_SIZE, true, &options.title);

    if let Some(subtitle) = &options.subtitle {
        y -= layout.body_size + 4.0;
        draw_text_centered(content, center, y, layout.body_size, false, subtitle);
    }

    y - 8.0
}

fn draw_column_header(
    content: &mut Content,
    layout: &Layout,
    table: &RenderedTable,
    settings: &ExportSettings,
    y: f32,
) -> f32 {
    let height = layout.column_header_height();
    let fill = color_components(&settings.table_header_color);

    set_fill(content, fill);
    content.rect(layout.margin_left, y - height, layout.table_width(), height);
    content.fill_nonzero();

    set_fill(content, (1.0, 1.0, 1.0));
    let baseline = y - height + (height - layout.body_size) / 2.0 + 1.0;
    let mut x = layout.margin_left;
    let unit = layout.table_width() / table.total_width();
    for (column, label) in table.columns.iter().zip(&table.header) {
        let width = column.width * unit;
        draw_text_centered(content, x + width / 2.0, baseline, layout.body_size, true, label);
        x += width;
    }

    set_fill(content, (0.0, 0.0, 0.0));
    y - height
}

fn draw_row(
    content: &mut Content,
    layout: &Layout,
    table: &RenderedTable,
    cells: &[String],
    y: f32,
    bold: bool,
) -> f32 {
    let height = layout.row_height;
    let baseline = y - height + (height - layout.body_size) / 2.0 + 1.0;
    let unit = layout.table_width() / table.total_width();

    let mut x = layout.margin_left;
    for (column, cell) in table.columns.iter().zip(cells) {
        let width = column.width * unit;
        match column.format {
            ColumnFormat::Amount | ColumnFormat::Integer => {
                let text_w = text_width(cell, layout.body_size);
                draw_text(
                    content,
                    x + width - text_w - 3.0,
                    baseline,
                    layout.body_size,
                    bold,
                    cell,
                );
            }
            _ => {
                draw_text(content, x + 3.0, baseline, layout.body_size, bold, cell);
            }
        }
        x += width;
    }

    y - height
}

fn draw_grid(
    content: &mut Content,
    layout: &Layout,
    table: &RenderedTable,
    top: f32,
    bottom: f32,
) {
    content.set_stroke_gray(0.6);
    content.set_line_width(0.5);

    // Horizontal rules
    let mut y = top - layout.column_header_height();
    while y >= bottom - 0.1 {
        content.move_to(layout.margin_left, y);
        content.line_to(layout.margin_left + layout.table_width(), y);
        y -= layout.row_height;
    }

    // Vertical rules at every column edge
    let unit = layout.table_width() / table.total_width();
    let mut x = layout.margin_left;
    for column in &table.columns {
        content.move_to(x, top);
        content.line_to(x, bottom);
        x += column.width * unit;
    }
    content.move_to(x, top);
    content.line_to(x, bottom);

    // Outer top border
    content.move_to(layout.margin_left, top);
    content.line_to(layout.margin_left + layout.table_width(), top);

    content.stroke();
}

fn draw_footer(
    content: &mut Content,
    layout: &Layout,
    settings: &ExportSettings,
    page: usize,
    page_count: usize,
) {
    let center = layout.page_width / 2.0;
    let mut y = layout.margin_bottom;

    if settings.page_numbers {
        let label = format!("Page {} / {}", page, page_count);
        let x = layout.page_width - layout.margin_right - text_width(&label, FOOTER_SIZE);
        draw_text(content, x, y, FOOTER_SIZE, false, &label);
        y += FOOTER_SIZE + 3.0;
    }

    if settings.show_footer {
        content.set_stroke_gray(0.6);
        content.set_line_width(0.5);

        for line in settings.footer_lines.iter().rev() {
            draw_text_centered(content, center, y, FOOTER_SIZE, false, line);
            y += FOOTER_SIZE + 3.0;
        }

        content.move_to(layout.margin_left, y + 2.0);
        content.line_to(layout.page_width - layout.margin_right, y + 2.0);
        content.stroke();
    }
}

fn draw_watermark(content: &mut Content, layout: &Layout, text: &str) {
    let size = 52.0;
    // 45 degree rotation around the page center
    let (sin, cos) = (std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2);
    let half_width = text_width(text, size) / 2.0;

    content.save_state();
    content.transform([
        cos,
        sin,
        -sin,
        cos,
        layout.page_width / 2.0,
        layout.page_height / 2.0,
    ]);
    content.set_fill_gray(0.85);
    content.begin_text();
    content.set_font(Name(b"F2"), size);
    content.next_line(-half_width, -size / 2.0);
    content.show(Str(&win_ansi(text)));
    content.end_text();
    content.restore_state();
}

fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, bold: bool, text: &str) {
    let font = if bold { Name(b"F2") } else { Name(b"F1") };
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(&win_ansi(text)));
    content.end_text();
}

fn draw_text_centered(content: &mut Content, center: f32, y: f32, size: f32, bold: bool, text: &str) {
    draw_text(content, center - text_width(text, size) / 2.0, y, size, bold, text);
}

fn set_fill(content: &mut Content, (r, g, b): (f32, f32, f32)) {
    content.set_fill_rgb(r, g, b);
}

fn color_components(hex: &str) -> (f32, f32, f32) {
    let (r, g, b) = parse_hex_color(hex);
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Approximate Helvetica text width (average glyph width of half the size)
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Encode text as WinAnsi (CP-1252) bytes; unmappable characters become '?'
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80, // euro sign
            '\u{0152}' => 0x8C, // OE ligature
            '\u{0153}' => 0x9C, // oe ligature
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) <= 0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ExportOptions, ReportKind, ReportTemplate};
    use serde_json::json;

    fn sample_table(rows: usize) -> (ExportOptions, RenderedTable) {
        let template = ReportTemplate::for_kind(ReportKind::CashSheet);
        let rows: Vec<crate::models::Row> = (0..rows)
            .map(|i| {
                let mut row = crate::models::Row::new();
                row.insert("date".into(), json!("01/10/2025"));
                row.insert("libelle".into(), json!(format!("Ligne {}", i)));
                row.insert("recette".into(), json!(100));
                row.insert("depense".into(), json!(50));
                row
            })
            .collect();
        let table = RenderedTable::build(&template, &rows);
        let options = ExportOptions::new("FEUILLE DE CAISSE", rows);
        (options, table)
    }

    #[test]
    fn test_render_produces_pdf_magic() {
        let (options, table) = sample_table(3);
        let bytes = render(&options, &table, &ExportSettings::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_table() {
        let (options, table) = sample_table(0);
        let bytes = render(&options, &table, &ExportSettings::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_landscape_with_watermark() {
        let (options, table) = sample_table(5);
        let mut settings = ExportSettings::default();
        settings.orientation = Orientation::Landscape;
        settings.watermark = Some("DUPLICATA".into());

        let bytes = render(&options, &table, &settings).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_paginate_single_page() {
        let pages = paginate(3, 10, 20, 1);
        assert_eq!(pages, vec![0..3]);
    }

    #[test]
    fn test_paginate_splits_across_pages() {
        let pages = paginate(25, 10, 20, 0);
        assert_eq!(pages, vec![0..10, 10..25]);
    }

    #[test]
    fn test_paginate_adds_page_for_tail() {
        // 10 rows exactly fill the first page, so the totals need a second
        let pages = paginate(10, 10, 20, 2);
        assert_eq!(pages, vec![0..10, 10..10]);
    }

    #[test]
    fn test_paginate_empty_rows_yield_one_page() {
        let pages = paginate(0, 10, 20, 1);
        assert_eq!(pages, vec![0..0]);
    }

    #[test]
    fn test_win_ansi_maps_french_characters() {
        assert_eq!(win_ansi("zéro"), vec![b'z', 0xE9, b'r', b'o']);
        assert_eq!(win_ansi("€"), vec![0x80]);
        assert_eq!(win_ansi("漢"), vec![b'?']);
    }
}
