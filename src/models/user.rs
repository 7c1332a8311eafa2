use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::validate_organisation_number;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `data` из ответа на логин. Кроме токена бэкенд может прислать что угодно.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: Option<String>,
}

/// Регистрация аккаунта организатора.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganiserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub phone_number: String,
    #[validate(length(min = 1, message = "Business name is required"))]
    pub business_name: String,
    #[validate(custom(function = "validate_organisation_number"))]
    pub organisation_number: String,
}
