use std::sync::Arc;

use anyhow::{Context, Result};
use table_comparator::services::{LlmService, UploadStore};
use table_comparator::{create_router, logging, AppState, ComparisonFlow, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    let store = UploadStore::new(&config.upload_folder);
    store
        .ensure_folder()
        .await
        .with_context(|| format!("cannot create upload folder {}", config.upload_folder))?;

    let generator = Arc::new(LlmService::new(&config));
    let flow = ComparisonFlow::new(&config, generator);
    let app = create_router(AppState::new(flow, store), config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    info!("✓ Ready at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
