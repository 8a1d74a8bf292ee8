pub mod xlsx_loader;

pub use xlsx_loader::load_workbook;
