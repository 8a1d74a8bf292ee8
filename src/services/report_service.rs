//! Report request service - capability layer
//!
//! Builds the comparison prompt from two extracted text blocks, makes the one
//! bounded call to the generator, and folds every outcome into an
//! [`AnalysisOutcome`]. Nothing escapes as an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::LlmError;
use crate::services::llm_service::ContentGenerator;
use crate::utils::logging::truncate_text;

/// Section labels every prompt must request, in order
pub const REPORT_SECTIONS: [&str; 5] = [
    "Comparação dos custos faturados e não faturados",
    "Gráficos ou tabelas comparativas (pode usar HTML simples)",
    "Análise de diferenças por tipo de atendimento (URA, Chatbot, Humano etc.)",
    "Observações sobre inconsistências detectadas",
    "Um resumo consolidado final",
];

pub const CONSOLIDATED_LABEL: &str = "### Tabela Consolidada (Geral):";
pub const SPECIFIC_LABEL: &str = "### Tabela Específica:";

/// Message shown when the generator answers with nothing
pub const EMPTY_RESPONSE_MESSAGE: &str = "Erro: Nenhuma resposta gerada pela IA.";

/// Result of one comparison request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Generated report body (HTML produced by the model)
    Report(String),
    /// The call succeeded but produced no text
    Empty,
    /// Anything failed; carries the failure description
    Failed(String),
}

impl AnalysisOutcome {
    pub fn is_report(&self) -> bool {
        matches!(self, AnalysisOutcome::Report(_))
    }

    /// Human-readable message for the non-report variants
    pub fn message(&self) -> Option<String> {
        match self {
            AnalysisOutcome::Report(_) => None,
            AnalysisOutcome::Empty => Some(EMPTY_RESPONSE_MESSAGE.to_string()),
            AnalysisOutcome::Failed(description) => {
                Some(format!("Erro ao processar os arquivos: {}", description))
            }
        }
    }
}

/// Build the comparison prompt
///
/// # Arguments
/// - `consolidated`: extracted text of the general table
/// - `specific`: extracted text of the per-channel table
///
/// # Returns
/// The persona, the five requested sections, then both labelled tables
pub fn build_prompt(consolidated: &str, specific: &str) -> String {
    let sections = REPORT_SECTIONS
        .iter()
        .map(|s| format!("- {};", s))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Você é um analista de dados especialista em controle de custos de atendimento.
Compare as duas tabelas a seguir, identifique discrepâncias e gere um relatório
completo em HTML contendo:

{sections}

{CONSOLIDATED_LABEL}
{consolidated}

{SPECIFIC_LABEL}
{specific}
"#
    )
}

/// Sends the comparison prompt and interprets the answer
pub struct ReportRequestor {
    generator: Arc<dyn ContentGenerator>,
    timeout: Duration,
}

impl ReportRequestor {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Build the prompt and make the single bounded call
    pub async fn request(&self, consolidated: &str, specific: &str) -> AnalysisOutcome {
        let prompt = build_prompt(consolidated, specific);
        self.request_prompt(&prompt).await
    }

    /// Make the single bounded call with a prepared prompt
    ///
    /// # Returns
    /// `Report` with the text as generated, `Empty` for missing or blank
    /// content, `Failed` for errors and timeouts
    pub async fn request_prompt(&self, prompt: &str) -> AnalysisOutcome {
        let model = self.generator.model_name().to_string();
        info!(
            "🤖 Requesting report from {} (prompt: {} chars, timeout: {}s)",
            model,
            prompt.chars().count(),
            self.timeout.as_secs()
        );

        let result = match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout {
                model,
                secs: self.timeout.as_secs(),
            }),
        };

        match result {
            Ok(Some(text)) if !text.trim().is_empty() => {
                info!("✓ Report received: {}", truncate_text(&text, 80));
                AnalysisOutcome::Report(text)
            }
            Ok(_) => {
                warn!("⚠️ Generator returned an empty response");
                AnalysisOutcome::Empty
            }
            Err(e) => {
                warn!("❌ Report request failed: {}", e);
                AnalysisOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Reply(&'static str),
        Nothing,
        Fail(&'static str),
        Hang(Duration),
    }

    struct FakeGenerator {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ContentGenerator for FakeGenerator {
        async fn generate(&self, _prompt: &str) -> Result<Option<String>, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Reply(text) => Ok(Some(text.to_string())),
                Behaviour::Nothing => Ok(None),
                Behaviour::Fail(msg) => Err(LlmError::ApiCallFailed {
                    model: "fake".to_string(),
                    source: (*msg).into(),
                }),
                Behaviour::Hang(d) => {
                    tokio::time::sleep(*d).await;
                    Ok(Some("tarde demais".to_string()))
                }
            }
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }

    fn requestor(generator: Arc<FakeGenerator>) -> ReportRequestor {
        ReportRequestor::new(generator, Duration::from_secs(600))
    }

    #[test]
    fn prompt_embeds_both_tables_and_all_sections() {
        let a = "### Sheet: URA\n\n| Canal | Custo |\n| --- | --- |\n| URA | 10 |\n\n\n";
        let b = "### Sheet: Humano\n\n| Canal | Custo |\n| --- | --- |\n| Humano | 99 |\n\n\n";
        let prompt = build_prompt(a, b);

        assert!(prompt.contains(a));
        assert!(prompt.contains(b));
        for section in REPORT_SECTIONS {
            assert!(prompt.contains(section), "missing section: {}", section);
        }
        assert!(prompt.contains("analista de dados especialista em controle de custos"));
        assert!(prompt.find(CONSOLIDATED_LABEL).unwrap() < prompt.find(SPECIFIC_LABEL).unwrap());
        assert!(prompt.find(a).unwrap() < prompt.find(b).unwrap());
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt("x", "y"), build_prompt("x", "y"));
    }

    #[tokio::test]
    async fn returns_report_verbatim() {
        let generator = FakeGenerator::new(Behaviour::Reply("<h1>Relatório</h1>"));
        let outcome = requestor(generator.clone()).request("a", "b").await;

        assert_eq!(outcome, AnalysisOutcome::Report("<h1>Relatório</h1>".to_string()));
        assert_eq!(outcome.message(), None);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_reply_maps_to_fixed_fallback() {
        let outcome = requestor(FakeGenerator::new(Behaviour::Nothing)).request("a", "b").await;
        assert_eq!(outcome, AnalysisOutcome::Empty);
        assert_eq!(outcome.message().unwrap(), EMPTY_RESPONSE_MESSAGE);

        let blank = requestor(FakeGenerator::new(Behaviour::Reply("   \n"))).request("a", "b").await;
        assert_eq!(blank, AnalysisOutcome::Empty);
    }

    #[tokio::test]
    async fn failure_is_caught_with_description_and_not_retried() {
        let generator = FakeGenerator::new(Behaviour::Fail("quota exceeded"));
        let outcome = requestor(generator.clone()).request("a", "b").await;

        match &outcome {
            AnalysisOutcome::Failed(description) => assert!(description.contains("quota exceeded")),
            other => panic!("expected failure, got {:?}", other),
        }
        let message = outcome.message().unwrap();
        assert!(message.contains("quota exceeded"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_call_times_out_within_bound() {
        let generator = FakeGenerator::new(Behaviour::Hang(Duration::from_secs(3600)));
        let started = tokio::time::Instant::now();

        let outcome = requestor(generator).request("a", "b").await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(600));
        assert!(elapsed < Duration::from_secs(601));
        match outcome {
            AnalysisOutcome::Failed(description) => assert!(description.contains("timeout")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
