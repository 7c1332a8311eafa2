pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod services;
pub mod session;
#[cfg(feature = "preview")]
pub mod preview;

use std::sync::Arc;

pub use error::{AppError, Result};

// Shared state для CLI и встраивающего кода
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub session: session::SessionContext,
    pub api: services::ApiClient,
}

impl AppState {
    /// Сессия хранится в файле из `session.token_path`.
    pub fn new(config: config::Config) -> Result<Arc<Self>> {
        let store = session::FileTokenStore::new(config.session.token_path.clone());
        Self::with_session(config, session::SessionContext::new(Arc::new(store)))
    }

    pub fn with_session(config: config::Config, session: session::SessionContext) -> Result<Arc<Self>> {
        let api = services::ApiClient::from_config(&config.api, session.clone())?;
        tracing::debug!("Event API at {}", api.base_url());
        Ok(Arc::new(Self {
            config,
            session,
            api,
        }))
    }

    pub fn dispatcher(&self) -> services::SubmissionDispatcher {
        services::SubmissionDispatcher::new(self.api.clone())
    }

    pub fn dashboard(&self) -> services::EventsDashboard {
        services::EventsDashboard::new(self.api.clone())
    }
}
