use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub code: u32,
    pub name: String,
    pub name_sv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryDto {
    pub code: u32,
    pub name: String,
    pub name_sv: String,
    pub category_code: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTagDto {
    pub code: u32,
    pub name: String,
}

/// Событие в том виде, в котором его отдаёт `GET /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub organiser: String,
    #[serde(default)]
    pub organisation_number: String,
    pub title: String,
    pub description: Option<String>,
    pub event_url: Option<String>,
    pub booking_url: Option<String>,
    pub street_name: String,
    pub street_name2: Option<String>,
    pub house_number: Option<u32>,
    pub city: String,
    pub postal_code: String,
    pub gps_coordinates: Option<String>,
    pub has_single_dates: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub has_schedule: Option<bool>,
    pub weekday: Option<u8>,
    pub schedule_start_time: Option<String>,
    pub schedule_end_time: Option<String>,
    pub recurrence: Option<String>,
    pub is_always_open: Option<bool>,
    pub spotlight: Option<bool>,
    pub spotlight_start_date: Option<String>,
    pub spotlight_end_date: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub created_by_id: Option<String>,
    pub source_provider: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
    #[serde(default)]
    pub subcategories: Vec<SubcategoryDto>,
    #[serde(default)]
    pub tags: Vec<EventTagDto>,
}

/// Фильтр для `GET /events`. Пустые поля в запрос не попадают.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilterDto {
    pub is_active: Option<bool>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub city: Option<String>,
    pub organisation_number: Option<String>,
    pub created_by_id: Option<String>,
    pub category_codes: Vec<u32>,
    pub subcategory_codes: Vec<u32>,
    pub tag_codes: Vec<u32>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl EventFilterDto {
    /// Пары параметров запроса. Списки кодов склеиваются через запятую.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(active) = self.is_active {
            params.push(("isActive", active.to_string()));
        }
        push_non_empty(&mut params, "fromDate", self.from_date.as_deref());
        push_non_empty(&mut params, "toDate", self.to_date.as_deref());
        push_non_empty(&mut params, "city", self.city.as_deref());
        push_non_empty(&mut params, "organisationNumber", self.organisation_number.as_deref());
        push_non_empty(&mut params, "createdById", self.created_by_id.as_deref());
        push_codes(&mut params, "categoryCodes", &self.category_codes);
        push_codes(&mut params, "subcategoryCodes", &self.subcategory_codes);
        push_codes(&mut params, "tagCodes", &self.tag_codes);
        // Ноль считается "не задано", как и отсутствие значения
        if let Some(page) = self.page_number.filter(|p| *p > 0) {
            params.push(("pageNumber", page.to_string()));
        }
        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            params.push(("pageSize", size.to_string()));
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.query_pairs()).unwrap_or_default()
    }
}

fn push_non_empty(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        params.push((key, v.to_string()));
    }
}

fn push_codes(params: &mut Vec<(&'static str, String)>, key: &'static str, codes: &[u32]) {
    if !codes.is_empty() {
        let joined = codes
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        params.push((key, joined));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
}

/// Единый конверт ответов бэкенда.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult<T> {
    pub is_success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> OperationResult<T> {
    /// Снимает конверт. Неуспешный конверт превращается в `AppError::Api`.
    pub fn into_result(self) -> Result<T> {
        if !self.is_success {
            let mut messages = self.errors;
            if messages.is_empty() {
                messages.extend(self.message);
            }
            return Err(AppError::Api { status: None, messages });
        }
        self.data
            .ok_or_else(|| AppError::Malformed("successful envelope without data".to_string()))
    }
}
