use thiserror::Error;

use crate::forms::FieldErrors;

/// Общий тип ошибок клиента.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Сервер ответил ошибкой или конвертом с `isSuccess = false`.
    #[error("API error ({}): {}", status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()), messages.join(", "))]
    Api {
        status: Option<u16>,
        messages: Vec<String>,
    },

    /// Ответ не удалось разобрать как ожидаемый конверт.
    #[error("Unexpected response: {0}")]
    Malformed(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Token store unavailable: {0}")]
    TokenStore(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
