// src/export/xlsx.rs

use crate::models::ReportTable;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

/// Render the report as an XLSX workbook, in memory.
///
/// One sheet named `sheet_name`, a styled and frozen header row, whole-hour
/// numbers, blank weekend cells and banded rows.
pub(crate) fn render_xlsx(table: &ReportTable, sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(xlsx_cause)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = table.headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(xlsx_cause)?;
    }

    worksheet.set_freeze_panes(1, 1).map_err(xlsx_cause)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(h.as_str())).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, r) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        write_text(worksheet, row, 0, &r.project, band)?;
        col_widths[0] = col_widths[0].max(UnicodeWidthStr::width(r.project.as_str()));

        for (i, cell) in r.cells.iter().enumerate() {
            let col = (i + 1) as u16;
            write_hours(worksheet, row, col, *cell, band, false)?;
        }

        let total_col = (r.cells.len() + 1) as u16;
        write_hours(worksheet, row, total_col, Some(r.total), band, true)?;
        col_widths[total_col as usize] =
            col_widths[total_col as usize].max(r.total.to_string().len());
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_cause)?;
    }

    workbook.save_to_buffer().map_err(xlsx_cause)
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_text(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> Result<(), String> {
    ws.write_with_format(row, col, s, &cell_format(bg))
        .map_err(xlsx_cause)?;
    Ok(())
}

/// Whole hours, or a formatted blank for weekend columns.
fn write_hours(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<i64>,
    bg: Color,
    bold: bool,
) -> Result<(), String> {
    let mut fmt = cell_format(bg).set_align(FormatAlign::Right);
    if bold {
        fmt = fmt.set_bold();
    }

    match value {
        Some(v) => ws.write_number_with_format(row, col, v as f64, &fmt),
        None => ws.write_blank(row, col, &fmt),
    }
    .map_err(xlsx_cause)?;
    Ok(())
}

/// Fail early on a name Excel would refuse (too long, `/`, `[`, ...).
pub(crate) fn check_sheet_name(sheet_name: &str) -> Result<(), String> {
    Worksheet::new()
        .set_name(sheet_name)
        .map(|_| ())
        .map_err(xlsx_cause)
}

fn xlsx_cause<E: std::fmt::Display>(e: E) -> String {
    format!("XLSX error: {e}")
}
