use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Claim идентификатора пользователя, который выдаёт .NET-бэкенд.
pub const NAME_IDENTIFIER_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

/// Полезная нагрузка JWT. Подпись не проверяется: токен непрозрачен
/// для клиента, проверяет его бэкенд.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionClaims {
    pub sub: Option<String>,
    #[serde(rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier")]
    pub name_identifier: Option<String>,
    pub nameid: Option<String>,
    pub exp: Option<i64>,
}

impl SessionClaims {
    /// `sub`, затем nameidentifier, затем `nameid`.
    pub fn user_id(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .or(self.name_identifier.as_deref())
            .or(self.nameid.as_deref())
            .filter(|id| !id.is_empty())
    }

    pub fn is_expired_at(&self, unix_seconds: i64) -> bool {
        self.exp.map(|exp| exp <= unix_seconds).unwrap_or(false)
    }
}

/// Декодирует вторую часть токена `header.payload.signature`.
pub fn decode_claims(token: &str) -> Result<SessionClaims> {
    let encoded = token
        .split('.')
        .nth(1)
        .filter(|part| !part.is_empty())
        .ok_or_else(|| AppError::InvalidToken("token has no payload segment".to_string()))?;

    // JWT использует base64url без паддинга, но встречаются и токены с паддингом
    let decoded = general_purpose::URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|e| AppError::InvalidToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&decoded)
        .map_err(|e| AppError::InvalidToken(format!("payload is not JSON: {}", e)))
}

#[cfg(test)]
pub(crate) fn fake_token(payload: &serde_json::Value) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}
