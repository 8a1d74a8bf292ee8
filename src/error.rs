use thiserror::Error;

/// Application error type
///
/// Only request-level failures. Document and generator errors never reach
/// this level: the workflow folds them into an `AnalysisOutcome`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upload could not be received or stored
    #[error("Erro no envio dos arquivos: {0}")]
    Upload(#[from] UploadError),
    /// Configuration could not be loaded
    #[error("Erro de configuração: {0}")]
    Config(#[from] ConfigError),
}

/// Spreadsheet read errors
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File is missing, corrupt or not a workbook format
    #[error("não foi possível abrir {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: calamine::Error,
    },
    /// A sheet listed by the workbook could not be read
    #[error("não foi possível ler a aba '{sheet}' de {path}: {source}")]
    SheetReadFailed {
        path: String,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    /// The blocking extraction task died before producing a result
    #[error("a extração de {path} foi interrompida: {reason}")]
    Interrupted { path: String, reason: String },
}

/// External generation service errors
#[derive(Debug, Error)]
pub enum LlmError {
    /// The chat request could not be assembled
    #[error("falha ao montar a requisição (modelo: {model}): {source}")]
    RequestBuildFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// Network, auth, quota or response decoding failure
    #[error("falha na chamada à API (modelo: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// No answer within the configured bound
    #[error("tempo limite excedido após {secs}s (timeout, modelo: {model})")]
    Timeout { model: String, secs: u64 },
}

/// Upload handling errors
#[derive(Debug, Error)]
pub enum UploadError {
    /// Required form field not present in the request
    #[error("campo obrigatório ausente: {field}")]
    MissingField { field: String },
    /// File part has no usable file name
    #[error("o campo {field} não contém um nome de arquivo válido")]
    InvalidFileName { field: String },
    /// Malformed multipart body
    #[error("corpo multipart inválido: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    /// Writing the upload to disk failed
    #[error("falha ao gravar {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("não foi possível ler {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("configuração inválida em {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== Convenience constructors ==========

impl AppError {
    /// Build a missing-field upload error
    pub fn missing_field(field: impl Into<String>) -> Self {
        AppError::Upload(UploadError::MissingField {
            field: field.into(),
        })
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
