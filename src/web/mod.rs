//! HTTP boundary
//!
//! Routes:
//! - `GET /` upload form
//! - `POST /analisar` multipart upload of `arquivo1` + `arquivo2`, returns the report page
//! - `GET /health` JSON status

pub mod handlers;
pub mod pages;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::services::UploadStore;
use crate::workflow::ComparisonFlow;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<ComparisonFlow>,
    pub store: UploadStore,
}

impl AppState {
    pub fn new(flow: ComparisonFlow, store: UploadStore) -> Self {
        Self {
            flow: Arc::new(flow),
            store,
        }
    }
}

/// Create the application router
///
/// Separated from `main()` to allow testing.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analisar", post(handlers::analyze))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
