use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::payload::QuickCreateEventDto;

/// Форма быстрого создания "всегда открытого" места. Все поля необязательны.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickCreateDraft {
    #[validate(length(max = 20, message = "Max 20 characters"))]
    pub organisation_number: String,
    #[validate(length(max = 200, message = "Max 200 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "Max 100 characters"))]
    pub organiser_name: String,
    #[validate(length(max = 100, message = "Max 100 characters"))]
    pub place: String,
    #[validate(length(max = 200, message = "Max 200 characters"))]
    pub address: String,
    #[validate(length(max = 50, message = "Max 50 characters"))]
    pub gps_coordinates: String,
    #[validate(length(max = 4000, message = "Max 4000 characters"))]
    pub description: String,
    pub subcategory_codes: Vec<u32>,
    pub filter_codes: Vec<u32>,
    #[validate(custom(function = "validate_optional_url"))]
    pub read_more_url: String,
}

fn validate_optional_url(value: &str) -> Result<(), validator::ValidationError> {
    use validator::ValidateUrl;
    if value.trim().is_empty() || value.trim().validate_url() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("url")
            .with_message(std::borrow::Cow::Borrowed("Must be a valid URL")))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_empty(codes: &[u32]) -> Option<Vec<u32>> {
    if codes.is_empty() {
        None
    } else {
        Some(codes.to_vec())
    }
}

impl QuickCreateDraft {
    pub fn to_payload(&self) -> QuickCreateEventDto {
        QuickCreateEventDto {
            organisation_number: non_blank(&self.organisation_number),
            name: non_blank(&self.name),
            organiser_name: non_blank(&self.organiser_name),
            place: non_blank(&self.place),
            address: non_blank(&self.address),
            gps_coordinates: non_blank(&self.gps_coordinates),
            description: non_blank(&self.description),
            subcategory_codes: non_empty(&self.subcategory_codes),
            filter_codes: non_empty(&self.filter_codes),
            read_more_url: non_blank(&self.read_more_url),
        }
    }
}
