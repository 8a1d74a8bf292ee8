//! LLM service - capability layer
//!
//! Only knows how to send one prompt and get text back.
//!
//! ## Stack
//! - `async-openai` for the API call
//! - Any OpenAI-compatible endpoint works (Gemini, Azure, self-hosted gateways)

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// Something that turns a prompt into generated text
///
/// `Ok(None)` means the backend answered but produced no content.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate text for one prompt
    ///
    /// # Arguments
    /// - `prompt`: full prompt text
    ///
    /// # Returns
    /// The generated text, unmodified, or `None` when there was no content
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError>;

    /// Backend identifier, used in logs and error messages
    fn model_name(&self) -> &str;
}

/// Chat-completion backed generator
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// Create a new LLM service from the application config
    ///
    /// # Arguments
    /// - `config`: supplies the API key, base URL and model name
    pub fn new(config: &Config) -> Self {
        if config.llm_api_key.is_empty() {
            warn!("LLM_API_KEY is not set; report generation calls will be rejected");
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// Send a single prompt as one user message
    ///
    /// The persona lives inside the prompt itself, so no system message is sent.
    ///
    /// # Arguments
    /// - `user_message`: the full prompt text
    ///
    /// # Returns
    /// The response content exactly as generated, or `None` if the model
    /// returned no content
    pub async fn send_to_llm(&self, user_message: &str) -> Result<Option<String>, LlmError> {
        debug!("Calling LLM API, model: {}", self.model_name);
        debug!("Prompt length: {} chars", user_message.len());

        let build_failed = |e: OpenAIError| LlmError::RequestBuildFailed {
            model: self.model_name.clone(),
            source: e,
        };

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()
            .map_err(build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API call failed: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            }
        })?;

        debug!("LLM API call succeeded");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|c| !c.is_empty());

        Ok(content)
    }
}

#[async_trait]
impl ContentGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.send_to_llm(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_model_from_config() {
        let config = Config {
            llm_api_key: "test-key".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            ..Config::default()
        };
        let service = LlmService::new(&config);
        assert_eq!(service.model_name(), "gemini-2.5-flash");
    }

    /// Live call against the configured endpoint
    ///
    /// ```bash
    /// LLM_API_KEY=... cargo test test_send_to_llm_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_send_to_llm_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = LlmService::new(&Config::from_env());

        let result = service.send_to_llm("Diga olá em uma frase curta.").await;
        match result {
            Ok(Some(response)) => println!("LLM response: {}", response),
            Ok(None) => panic!("LLM returned no content"),
            Err(e) => panic!("LLM call failed: {}", e),
        }
    }
}
