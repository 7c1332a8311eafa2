//! Сессия организатора: bearer-токен и сведения из него.
//!
//! Сессия передаётся явно тем, кому она нужна (клиенту API, панели
//! событий); неявного глобального доступа к токену нет.

pub mod claims;
pub mod store;

use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Result};

pub use claims::{decode_claims, SessionClaims};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.store.load()
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    pub fn sign_in(&self, token: &str) -> Result<()> {
        self.store.save(token)?;
        info!("Session token stored");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }

    pub fn claims(&self) -> Result<SessionClaims> {
        let token = self.token()?.ok_or(AppError::Unauthenticated)?;
        decode_claims(&token)
    }

    /// Идентификатор организатора из токена.
    pub fn user_id(&self) -> Result<String> {
        self.claims()?
            .user_id()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidToken("token carries no user id".to_string()))
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}
