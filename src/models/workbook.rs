//! In-memory workbook model
//!
//! A `SpreadsheetDocument` is loaded once per uploaded file, read by the
//! extractor and dropped afterwards.

use std::fmt;

/// A single cell value, as stored in the workbook
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Date/time already rendered in ISO form
    DateTime(String),
    /// Spreadsheet error value such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => f.write_str(s),
        }
    }
}

/// A named sheet: a header row of column names plus data rows
///
/// Every data row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a sheet from raw grid rows; the first row becomes the header
    ///
    /// Blank header cells are named `Unnamed: <index>`. Data rows whose cells
    /// are all blank are dropped. Short rows are padded with empty cells so the
    /// grid stays rectangular.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Self {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = grid.into_iter();

        let columns = match grid.next() {
            Some(header) => (0..width)
                .map(|idx| match header.get(idx) {
                    Some(cell) if !cell.is_empty() => cell.to_string(),
                    _ => format!("Unnamed: {}", idx),
                })
                .collect(),
            None => Vec::new(),
        };

        let rows = grid
            .filter(|row| !row.iter().all(CellValue::is_empty))
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the sheet had no cells at all (not even a header)
    pub fn is_blank(&self) -> bool {
        self.columns.is_empty()
    }

    /// The first `limit` data rows (all of them if fewer)
    pub fn head(&self, limit: usize) -> &[Vec<CellValue>] {
        &self.rows[..self.rows.len().min(limit)]
    }
}

/// A loaded workbook: sheets in the order the file defines them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetDocument {
    sheets: Vec<Sheet>,
}

impl SpreadsheetDocument {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(Sheet::name)
    }
}
