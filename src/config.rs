use serde::Deserialize;
use std::path::Path;

use crate::error::{AppResult, ConfigError};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_FILE: &str = "table-comparator.toml";

/// Application configuration
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Directory where uploaded workbooks are stored
    pub upload_folder: String,
    /// Maximum accepted request body size, in bytes
    pub max_upload_bytes: usize,
    /// Whether to log at debug level
    pub verbose_logging: bool,
    // --- LLM ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// Upper bound on the report generation call, in seconds
    pub llm_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            upload_folder: "uploads".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_timeout_secs: 600,
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration: defaults, then the TOML file (if present), then environment variables
    ///
    /// The file path comes from `CONFIG_FILE`, falling back to [`DEFAULT_CONFIG_FILE`].
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// Parse a TOML configuration file; absent keys keep their defaults
    ///
    /// # Arguments
    /// - `path`: TOML file to read
    ///
    /// # Returns
    /// The parsed config, or `ConfigError` wrapped in `AppError`
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            ConfigError::ParseFailed {
                path: path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(base.bind_addr),
            upload_folder: std::env::var("UPLOAD_FOLDER").unwrap_or(base.upload_folder),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(base.max_upload_bytes),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY")).unwrap_or(base.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(base.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(base.llm_model_name),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.llm_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_pin_gemini_and_ten_minute_timeout() {
        let config = Config::default();
        assert_eq!(config.llm_model_name, "gemini-2.0-flash");
        assert_eq!(config.llm_timeout_secs, 600);
        assert_eq!(config.upload_folder, "uploads");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            upload_folder = "/tmp/planilhas"
            llm_model_name = "gemini-2.5-pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.upload_folder, "/tmp/planilhas");
        assert_eq!(config.llm_model_name, "gemini-2.5-pro");
        assert_eq!(config.llm_timeout_secs, 600);
        assert_eq!(config.bind_addr, "127.0.0.1:5000");
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm_timeout_secs = \"soon\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn from_file_missing_is_read_error() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Config(ConfigError::ReadFailed { .. })
        ));
    }
}
