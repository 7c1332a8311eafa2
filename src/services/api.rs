//! api.rs
//!
//! HTTP-клиент API событий Go.Do.
//!
//! Все ответы бэкенда приходят в конверте `OperationResult<T>`. Клиент
//! возвращает конверт как есть; снять его можно через `into_result()`.
//! Ответ с кодом ошибки, в теле которого есть конверт, тоже отдаётся
//! конвертом, чтобы вызывающий увидел тексты ошибок бэкенда.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::event::{EventDto, EventFilterDto, OperationResult, PagedResult};
use crate::models::payload::{EventRequestPayload, PatchEventDto, QuickCreateEventDto};
use crate::models::user::{LoginData, LoginRequest, RegisterOrganiserRequest};
use crate::session::SessionContext;

#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Базовый URL без завершающего '/'.
    base_url: String,
    http_client: reqwest::Client,
    /// Источник bearer-токена.
    session: SessionContext,
}

impl ApiClient {
    /// Создает клиент на основе секции `api` конфигурации.
    pub fn from_config(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true).gzip(true);
        // Без явной настройки таймаут не ставится
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Запрос с bearer-токеном, если сессия открыта.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.http_client.request(method, self.url(path));
        Ok(match self.session.token()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<OperationResult<T>> {
        let response = builder.send().await.map_err(|e| {
            error!("Event API request failed: {}", e);
            AppError::Http(e)
        })?;
        read_envelope(response).await
    }

    // --- События ---

    pub async fn create_event(&self, payload: &EventRequestPayload) -> Result<OperationResult<Value>> {
        info!("Creating event '{}'", payload.title);
        self.send(self.request(Method::POST, "events")?.json(payload)).await
    }

    pub async fn quick_create_event(
        &self,
        payload: &QuickCreateEventDto,
    ) -> Result<OperationResult<Value>> {
        info!("Quick-creating place {:?}", payload.name);
        self.send(self.request(Method::POST, "events/quick")?.json(payload)).await
    }

    pub async fn get_event(&self, id: &str) -> Result<OperationResult<EventDto>> {
        debug!("Fetching event {}", id);
        self.send(self.request(Method::GET, &format!("events/{}", id))?).await
    }

    pub async fn list_events(
        &self,
        filter: &EventFilterDto,
    ) -> Result<OperationResult<PagedResult<EventDto>>> {
        let params = filter.query_pairs();
        debug!("Listing events with {} filter params", params.len());
        self.send(self.request(Method::GET, "events")?.query(&params)).await
    }

    pub async fn update_event(
        &self,
        id: &str,
        payload: &EventRequestPayload,
    ) -> Result<OperationResult<EventDto>> {
        info!("Updating event {}", id);
        self.send(self.request(Method::PUT, &format!("events/{}", id))?.json(payload))
            .await
    }

    pub async fn patch_event(&self, id: &str, patch: &PatchEventDto) -> Result<OperationResult<EventDto>> {
        info!("Patching event {}", id);
        self.send(self.request(Method::PATCH, &format!("events/{}", id))?.json(patch))
            .await
    }

    /// Мягкое удаление: бэкенд снимает флаг `isActive`.
    pub async fn delete_event(&self, id: &str) -> Result<OperationResult<bool>> {
        info!("Deleting event {}", id);
        self.send(self.request(Method::DELETE, &format!("events/{}", id))?).await
    }

    // --- Аккаунт организатора ---

    /// Вход. Полученный токен сохраняется в сессии.
    pub async fn login(&self, request: &LoginRequest) -> Result<String> {
        info!("Signing in as {}", request.username);
        let envelope: OperationResult<LoginData> = self
            .send(self.request(Method::POST, "organisers/auth/login")?.json(request))
            .await?;
        let token = envelope
            .into_result()?
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Malformed("login response carries no token".to_string()))?;
        self.session.sign_in(&token)?;
        Ok(token)
    }

    pub async fn register_organiser(
        &self,
        request: &RegisterOrganiserRequest,
    ) -> Result<OperationResult<Value>> {
        info!("Registering organiser account {}", request.username);
        self.send(self.request(Method::POST, "auth/register-organizer")?.json(request))
            .await
    }
}

/// Разбирает тело ответа как конверт. Код ошибки без конверта в теле
/// превращается в `AppError::Api`, нечитаемое тело успешного ответа в
/// `AppError::Malformed`.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<OperationResult<T>> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<OperationResult<T>>(&body) {
        Ok(envelope) => {
            if !status.is_success() {
                warn!("Event API returned {} with envelope: {:?}", status, envelope.errors);
            }
            Ok(envelope)
        }
        Err(e) if status.is_success() => {
            error!("Unreadable event API response ({}): {}", status, e);
            Err(AppError::Malformed(e.to_string()))
        }
        Err(_) => {
            warn!("Event API returned {} without envelope", status);
            Err(AppError::Api {
                status: Some(status.as_u16()),
                messages: error_messages(&body),
            })
        }
    }
}

/// Тексты ошибок из тела без конверта, например ProblemDetails ASP.NET.
fn error_messages(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };
    let mut messages = Vec::new();
    if let Some(errors) = value.get("errors").and_then(Value::as_object) {
        for list in errors.values().filter_map(Value::as_array) {
            messages.extend(list.iter().filter_map(Value::as_str).map(str::to_string));
        }
    }
    if messages.is_empty() {
        if let Some(title) = value.get("title").and_then(Value::as_str) {
            messages.push(title.to_string());
        }
    }
    messages
}
