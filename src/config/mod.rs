use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
    /// `LOG_FORMAT=json`: строки лога в JSON вместо текста.
    pub json_logs: bool,
}

// Настройки API событий
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Без значения таймаут не задаётся, решает сетевой стек.
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

// Где хранится bearer-токен между запусками
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub token_path: PathBuf,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_preview: bool,
    pub preview_page_size: usize,
}

pub const DEFAULT_API_URL: &str = "http://localhost:5198/api";

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "godo_organiser=info".to_string()),
                json_logs: env::var("LOG_FORMAT")
                    .map(|f| f.trim().eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
            },
            api: ApiConfig {
                base_url: env::var("GODO_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout_seconds: optional_var("API_TIMEOUT_SECONDS")?,
            },
            session: SessionConfig {
                token_path: match env::var("GODO_TOKEN_PATH") {
                    Ok(path) => PathBuf::from(path),
                    Err(_) => default_token_path(),
                },
            },
            features: FeatureFlags {
                enable_preview: parse_var("ENABLE_PREVIEW", true)?,
                preview_page_size: parse_var("PREVIEW_PAGE_SIZE", 30)?,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                environment: "development".to_string(),
                rust_log: "godo_organiser=info".to_string(),
                json_logs: false,
            },
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_seconds: None,
            },
            session: SessionConfig {
                token_path: default_token_path(),
            },
            features: FeatureFlags {
                enable_preview: true,
                preview_page_size: 30,
            },
        }
    }
}

fn default_token_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".godo")
        .join("access_token")
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    Ok(optional_var(name)?.unwrap_or(default))
}

fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}
