pub mod loaders;
pub mod workbook;

pub use loaders::load_workbook;
pub use workbook::{CellValue, Sheet, SpreadsheetDocument};
