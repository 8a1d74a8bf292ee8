//! Tabular extraction service
//!
//! Turns a workbook into the bounded text block that gets embedded in the
//! comparison prompt: one labelled markdown table per sheet, at most
//! [`PREVIEW_ROWS`] data rows each.

use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;
use crate::models::{load_workbook, CellValue, Sheet, SpreadsheetDocument};

/// Data rows rendered per sheet
pub const PREVIEW_ROWS: usize = 20;

/// Marker rendered for a sheet without any cells
pub const NO_ROWS_MARKER: &str = "(no rows)";

/// Reads workbooks and renders their sheet previews as text
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularExtractor;

impl TabularExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Load the workbook at `path` and render every sheet
    ///
    /// Blocking: parses the whole file. Call it from a blocking context.
    ///
    /// # Arguments
    /// - `path`: workbook on disk (any format calamine opens)
    ///
    /// # Returns
    /// Every sheet rendered in workbook order, or the read error
    pub fn extract(&self, path: &Path) -> Result<String, DocumentError> {
        let document = load_workbook(path)?;
        debug!(
            "Extracting sheets {:?} from {}",
            document.sheet_names().collect::<Vec<_>>(),
            path.display()
        );
        Ok(self.render_document(&document))
    }

    /// Render an already loaded document
    pub fn render_document(&self, document: &SpreadsheetDocument) -> String {
        document
            .sheets()
            .iter()
            .map(|sheet| self.render_sheet(sheet))
            .collect()
    }

    /// Label line, preview table, then two blank lines
    pub fn render_sheet(&self, sheet: &Sheet) -> String {
        let mut out = format!("### Sheet: {}\n\n", sheet.name());

        if sheet.is_blank() {
            out.push_str(NO_ROWS_MARKER);
            out.push('\n');
        } else {
            out.push_str(&markdown_line(sheet.columns().iter().map(|c| escape_field(c))));
            out.push_str(&markdown_line(sheet.columns().iter().map(|_| "---".to_string())));
            for row in sheet.head(PREVIEW_ROWS) {
                out.push_str(&markdown_line(row.iter().map(render_cell)));
            }
        }

        out.push_str("\n\n");
        out
    }
}

fn render_cell(cell: &CellValue) -> String {
    escape_field(&cell.to_string())
}

/// Keep one record on one line and the delimiter unambiguous
fn escape_field(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

fn markdown_line(fields: impl Iterator<Item = String>) -> String {
    let mut line = String::from("|");
    for field in fields {
        line.push(' ');
        line.push_str(&field);
        line.push_str(" |");
    }
    line.push('\n');
    line
}
