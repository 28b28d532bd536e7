// src/export/json_csv.rs

use crate::models::ReportTable;

/// Pretty-printed JSON: column labels with their dates and kinds, then one
/// object per project (`null` for weekend cells).
pub(crate) fn render_json(table: &ReportTable) -> Result<Vec<u8>, String> {
    let mut out = serde_json::to_vec_pretty(table).map_err(|e| format!("JSON error: {e}"))?;
    out.push(b'\n');
    Ok(out)
}

/// CSV with the same header line and cells as the spreadsheet.
pub(crate) fn render_csv(table: &ReportTable) -> Result<Vec<u8>, String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(table.headers())
        .map_err(|e| format!("CSV write error: {e}"))?;
    for row in table.string_rows() {
        wtr.write_record(&row)
            .map_err(|e| format!("CSV write error: {e}"))?;
    }

    wtr.into_inner()
        .map_err(|e| format!("CSV flush error: {e}"))
}
