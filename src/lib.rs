//! # Table Comparator
//!
//! Upload two workbooks, get an LLM-written comparison report back as a web page.
//!
//! ## Architecture
//!
//! ### ① Models
//! - `models/` - in-memory workbook (`SpreadsheetDocument`, `Sheet`, `CellValue`)
//!   and the calamine-backed loader
//!
//! ### ② Services (capabilities)
//! - `TabularExtractor` - workbook → bounded markdown text, 20 rows per sheet
//! - `LlmService` - one prompt in, generated text out (OpenAI-compatible API)
//! - `ReportRequestor` - prompt assembly, single bounded call, tagged outcome
//! - `UploadStore` - writes uploads into the upload folder
//!
//! ### ③ Workflow
//! - `ComparisonFlow` - extract both files → request report
//!
//! ### ④ Web
//! - `web/` - axum routes and askama pages; the only place outcomes become markup

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;
pub mod workflow;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{AnalysisOutcome, ContentGenerator, LlmService, ReportRequestor, TabularExtractor};
pub use utils::logging;
pub use web::{create_router, AppState};
pub use workflow::{ComparisonCtx, ComparisonFlow, UploadedFile};
