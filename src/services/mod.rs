pub mod llm_service;
pub mod report_service;
pub mod tabular_extractor;
pub mod upload_store;

pub use llm_service::{ContentGenerator, LlmService};
pub use report_service::{build_prompt, AnalysisOutcome, ReportRequestor};
pub use tabular_extractor::TabularExtractor;
pub use upload_store::UploadStore;
