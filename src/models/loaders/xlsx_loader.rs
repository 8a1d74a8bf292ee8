use crate::error::DocumentError;
use crate::models::workbook::{CellValue, Sheet, SpreadsheetDocument};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Load every sheet of a workbook into a `SpreadsheetDocument`
///
/// Accepts any format calamine recognises by extension (xlsx, xlsm, xlsb, xls, ods).
/// Sheet order follows the workbook.
pub fn load_workbook(path: &Path) -> Result<SpreadsheetDocument, DocumentError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| DocumentError::OpenFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| DocumentError::SheetReadFailed {
                path: path.display().to_string(),
                sheet: sheet_name.clone(),
                source: e,
            })?;

        let grid: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        debug!(
            "Loaded sheet '{}' from {}: {} raw rows",
            sheet_name,
            path.display(),
            grid.len()
        );
        sheets.push(Sheet::from_grid(sheet_name, grid));
    }

    Ok(SpreadsheetDocument::new(sheets))
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => {
                CellValue::DateTime(ndt.date().format("%Y-%m-%d").to_string())
            }
            Some(ndt) => CellValue::DateTime(ndt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::DateTime(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
