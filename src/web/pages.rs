//! HTML pages
//!
//! All fields are HTML-escaped by askama, except `ResultPage::report_html`,
//! which carries the generated report and is rendered raw on purpose.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::services::AnalysisOutcome;

pub const CONSOLIDATED_FIELD: &str = "arquivo1";
pub const SPECIFIC_FIELD: &str = "arquivo2";

/// Upload form
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: &'static str,
    pub consolidated_field: &'static str,
    pub specific_field: &'static str,
}

impl Default for IndexPage {
    fn default() -> Self {
        Self {
            title: "Comparador de Tabelas - Ministério",
            consolidated_field: CONSOLIDATED_FIELD,
            specific_field: SPECIFIC_FIELD,
        }
    }
}

/// Comparison result
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub file1: String,
    pub file2: String,
    pub generated_at: String,
    pub has_report: bool,
    /// Raw model output, not escaped
    pub report_html: String,
    /// Escaped fallback or error message
    pub message: String,
}

impl ResultPage {
    pub fn new(file1: impl Into<String>, file2: impl Into<String>, outcome: AnalysisOutcome) -> Self {
        let message = outcome.message().unwrap_or_default();
        let (has_report, report_html) = match outcome {
            AnalysisOutcome::Report(html) => (true, html),
            _ => (false, String::new()),
        };
        Self {
            file1: file1.into(),
            file2: file2.into(),
            generated_at: chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string(),
            has_report,
            report_html,
            message,
        }
    }
}

/// Error page for failures outside the comparison pipeline
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: String,
}

/// Render a template into a response with the given status
pub fn render<T: Template>(status: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao renderizar a página").into_response()
        }
    }
}
