//! Отправка готового тела запроса в API событий.
//!
//! Один запрос на одну отправку: без повторов, без задержек, без ключа
//! идемпотентности. Исход сводится к `SubmissionOutcome`, который можно
//! сразу показать пользователю.

use serde_json::Value;
use std::fmt;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::event::OperationResult;
use crate::models::payload::{EventRequestPayload, PatchEventDto};
use crate::services::api::ApiClient;

pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Submission failed. Please check your input and try again.";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Something went wrong, please try again later.";
pub const SESSION_MESSAGE: &str = "You are not signed in. Run `godo login` and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Запрос не дошёл или ответ не пришёл.
    Network,
    /// Бэкенд отказал: код ошибки или `isSuccess = false`.
    Rejected,
    /// Ответ не удалось разобрать.
    Malformed,
    /// Нет сессии или токен не читается.
    Session,
    /// Запрос не был отправлен из-за локальной ошибки (файл токена, настройки).
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded { data: Option<Value> },
    Failed { kind: FailureKind, message: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded { .. })
    }

    /// Сводит результат вызова клиента к исходу отправки.
    pub fn from_response<T: serde::Serialize>(
        response: crate::error::Result<OperationResult<T>>,
    ) -> Self {
        match response {
            Ok(envelope) if envelope.is_success => SubmissionOutcome::Succeeded {
                data: envelope.data.and_then(|d| serde_json::to_value(d).ok()),
            },
            Ok(envelope) => {
                let backend = envelope.errors.into_iter().next().or(envelope.message);
                rejected(backend)
            }
            Err(AppError::Api { messages, .. }) => rejected(messages.into_iter().next()),
            Err(AppError::Malformed(_)) | Err(AppError::Json(_)) => SubmissionOutcome::Failed {
                kind: FailureKind::Malformed,
                message: UNEXPECTED_RESPONSE_MESSAGE.to_string(),
            },
            Err(AppError::Http(e)) => {
                error!("Submission did not reach the event API: {}", e);
                SubmissionOutcome::Failed {
                    kind: FailureKind::Network,
                    message: SUBMISSION_FAILED_MESSAGE.to_string(),
                }
            }
            Err(e @ (AppError::Unauthenticated | AppError::InvalidToken(_))) => {
                warn!("Submission needs a fresh session: {}", e);
                SubmissionOutcome::Failed {
                    kind: FailureKind::Session,
                    message: SESSION_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                error!("Submission was not sent: {}", e);
                SubmissionOutcome::Failed {
                    kind: FailureKind::Local,
                    message: e.to_string(),
                }
            }
        }
    }
}

fn rejected(backend_message: Option<String>) -> SubmissionOutcome {
    let message = backend_message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| SUBMISSION_FAILED_MESSAGE.to_string());
    warn!("Submission rejected: {}", message);
    SubmissionOutcome::Failed {
        kind: FailureKind::Rejected,
        message,
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionOutcome::Succeeded { .. } => f.write_str("Event saved"),
            SubmissionOutcome::Failed { message, .. } => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionDispatcher {
    client: ApiClient,
}

impl SubmissionDispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Создание события: `POST /events`.
    pub async fn submit(&self, payload: &EventRequestPayload) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::from_response(self.client.create_event(payload).await);
        if outcome.is_success() {
            info!("Event '{}' created", payload.title);
        }
        outcome
    }

    /// Сохранение изменений: `PUT /events/{id}`.
    pub async fn submit_update(&self, id: &str, payload: &EventRequestPayload) -> SubmissionOutcome {
        let outcome =
            SubmissionOutcome::from_response(self.client.update_event(id, payload).await);
        if outcome.is_success() {
            info!("Event {} updated", id);
        }
        outcome
    }

    /// Частичное изменение: `PATCH /events/{id}`. Пустой патч не отправляется.
    pub async fn submit_patch(&self, id: &str, patch: &PatchEventDto) -> SubmissionOutcome {
        if patch.is_empty() {
            return rejected(Some("Nothing to change".to_string()));
        }
        let outcome = SubmissionOutcome::from_response(self.client.patch_event(id, patch).await);
        if outcome.is_success() {
            info!("Event {} patched", id);
        }
        outcome
    }
}
