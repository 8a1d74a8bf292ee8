//! Comparison flow - workflow layer
//!
//! Defines the full pipeline for one request:
//! 1. extract the consolidated workbook
//! 2. extract the specific workbook
//! 3. request the report

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::config::Config;
use crate::error::DocumentError;
use crate::services::{AnalysisOutcome, ContentGenerator, ReportRequestor, TabularExtractor};
use crate::workflow::comparison_ctx::ComparisonCtx;

/// Comparison flow
///
/// - Owns no per-request state; every call extracts and sends again
/// - Never returns an error: failures become `AnalysisOutcome::Failed`
pub struct ComparisonFlow {
    extractor: TabularExtractor,
    requestor: ReportRequestor,
}

impl ComparisonFlow {
    /// # Arguments
    /// - `config`: supplies the generator timeout
    /// - `generator`: backend that writes the report
    pub fn new(config: &Config, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            extractor: TabularExtractor::new(),
            requestor: ReportRequestor::new(generator, Duration::from_secs(config.llm_timeout_secs)),
        }
    }

    /// Extract both workbooks, then request the report
    ///
    /// # Returns
    /// The outcome to display; extraction failures become `Failed` and skip
    /// the generator call
    pub async fn run(&self, ctx: &ComparisonCtx) -> AnalysisOutcome {
        info!("{} 📥 Extracting workbooks...", ctx);

        let consolidated = match self.extract(ctx.consolidated.path.clone()).await {
            Ok(text) => text,
            Err(e) => return self.extraction_failed(ctx, e),
        };
        let specific = match self.extract(ctx.specific.path.clone()).await {
            Ok(text) => text,
            Err(e) => return self.extraction_failed(ctx, e),
        };

        info!(
            "{} ✓ Extracted {} + {} chars",
            ctx,
            consolidated.chars().count(),
            specific.chars().count()
        );

        let outcome = self.requestor.request(&consolidated, &specific).await;
        if outcome.is_report() {
            info!("{} ✅ Report ready", ctx);
        }
        outcome
    }

    /// Workbook parsing is blocking; keep it off the async workers
    async fn extract(&self, path: PathBuf) -> Result<String, DocumentError> {
        let extractor = self.extractor;
        let display = path.display().to_string();
        tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .map_err(|e| DocumentError::Interrupted {
                path: display,
                reason: e.to_string(),
            })?
    }

    fn extraction_failed(&self, ctx: &ComparisonCtx, e: DocumentError) -> AnalysisOutcome {
        error!("{} ❌ Extraction failed: {}", ctx, e);
        AnalysisOutcome::Failed(e.to_string())
    }
}
