use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, UploadError};
use crate::web::pages::{self, ErrorPage, IndexPage, ResultPage, CONSOLIDATED_FIELD, SPECIFIC_FIELD};
use crate::web::AppState;
use crate::workflow::{ComparisonCtx, UploadedFile};

/// Health check response
#[derive(Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn index() -> Response {
    pages::render(StatusCode::OK, &IndexPage::default())
}

/// Receive both workbooks, run the comparison and render the report
pub async fn analyze(State(state): State<AppState>, multipart: Multipart) -> Response {
    let ctx = match receive_uploads(&state, multipart).await {
        Ok(ctx) => ctx,
        Err(e) => return error_response(e),
    };

    info!("{} 📤 Uploads stored, starting comparison", ctx);
    let outcome = state.flow.run(&ctx).await;

    let page = ResultPage::new(&ctx.consolidated.file_name, &ctx.specific.file_name, outcome);
    pages::render(StatusCode::OK, &page)
}

/// A file part read from the form
struct FilePart {
    file_name: String,
    bytes: Vec<u8>,
}

async fn receive_uploads(state: &AppState, mut multipart: Multipart) -> Result<ComparisonCtx, AppError> {
    let mut consolidated = None;
    let mut specific = None;

    while let Some(field) = multipart.next_field().await.map_err(UploadError::from)? {
        let slot = match field.name() {
            Some(CONSOLIDATED_FIELD) => &mut consolidated,
            Some(SPECIFIC_FIELD) => &mut specific,
            _ => continue,
        };
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(UploadError::from)?;
        *slot = Some(FilePart {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    let consolidated = consolidated.ok_or_else(|| AppError::missing_field(CONSOLIDATED_FIELD))?;
    let specific = specific.ok_or_else(|| AppError::missing_field(SPECIFIC_FIELD))?;

    let consolidated_path = state
        .store
        .save(CONSOLIDATED_FIELD, &consolidated.file_name, &consolidated.bytes)
        .await?;
    let specific_path = state
        .store
        .save_distinct(SPECIFIC_FIELD, &specific.file_name, &specific.bytes, &consolidated_path)
        .await?;

    Ok(ComparisonCtx::new(
        UploadedFile::new(consolidated.file_name, consolidated_path),
        UploadedFile::new(specific.file_name, specific_path),
    ))
}

fn error_response(err: AppError) -> Response {
    warn!("❌ Request rejected: {}", err);
    let status = match &err {
        AppError::Upload(UploadError::WriteFailed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Upload(_) => StatusCode::BAD_REQUEST,
        AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    pages::render(
        status,
        &ErrorPage {
            message: err.to_string(),
        },
    )
}
