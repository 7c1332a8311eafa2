use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::draft::Recurrence;
use crate::models::event::EventDto;

/// Тело `POST /events` и `PUT /events/{id}`.
///
/// Даты - локальные строки `YYYY-MM-DDTHH:mm:00.000` без смещения.
/// Необязательные поля при `None` в JSON не попадают.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestPayload {
    pub organiser: String,
    pub organisation_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,

    pub street_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<u32>,
    pub city: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<String>,

    pub has_single_dates: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    pub has_schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,

    pub is_always_open: bool,
    pub spotlight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight_end_date: Option<String>,

    pub category_codes: Vec<u32>,
    pub subcategory_codes_by_category: BTreeMap<u32, Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_codes: Option<Vec<u32>>,
}

pub type UpdateEventDto = EventRequestPayload;

impl From<&EventDto> for EventRequestPayload {
    /// Приводит сохранённое событие к форме запроса: категории становятся
    /// списком кодов, подкатегории группируются по коду категории.
    fn from(event: &EventDto) -> Self {
        let mut by_category: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for sub in &event.subcategories {
            by_category.entry(sub.category_code).or_default().push(sub.code);
        }

        let tag_codes: Vec<u32> = event.tags.iter().map(|t| t.code).collect();
        let is_always_open = event.is_always_open.unwrap_or(false);
        let has_schedule = !is_always_open && event.has_schedule.unwrap_or(false);

        EventRequestPayload {
            organiser: event.organiser.clone(),
            organisation_number: event.organisation_number.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            event_url: event.event_url.clone(),
            booking_url: event.booking_url.clone(),
            street_name: event.street_name.clone(),
            street_name2: event.street_name2.clone(),
            house_number: event.house_number,
            city: event.city.clone(),
            postal_code: event.postal_code.clone(),
            gps_coordinates: event.gps_coordinates.clone(),
            has_single_dates: !is_always_open && !has_schedule,
            start_date: event.start_date.clone(),
            end_date: event.end_date.clone(),
            has_schedule,
            weekday: event.weekday,
            schedule_start_time: event.schedule_start_time.clone(),
            schedule_end_time: event.schedule_end_time.clone(),
            recurrence: event.recurrence.as_deref().and_then(|r| r.parse().ok()),
            is_always_open,
            spotlight: event.spotlight.unwrap_or(false),
            spotlight_start_date: event.spotlight_start_date.clone(),
            spotlight_end_date: event.spotlight_end_date.clone(),
            category_codes: event.categories.iter().map(|c| c.code).collect(),
            subcategory_codes_by_category: by_category,
            tag_codes: if tag_codes.is_empty() { None } else { Some(tag_codes) },
        }
    }
}

/// Тело `PATCH /events/{id}`: те же поля, что у [`EventRequestPayload`],
/// но любое может отсутствовать. Бэкенд меняет только переданные.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchEventDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organiser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_single_dates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_schedule: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_always_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight_end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_codes: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_codes_by_category: Option<BTreeMap<u32, Vec<u32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_codes: Option<Vec<u32>>,
}

impl PatchEventDto {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Тело `POST /events/quick` (быстрое создание "всегда открытого" места).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickCreateEventDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organiser_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_codes: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_codes: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_more_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{CategoryDto, SubcategoryDto};

    fn stored_event() -> EventDto {
        serde_json::from_value(serde_json::json!({
            "id": "e-1", "organiser": "Dunkers", "organisationNumber": "556677-8899",
            "title": "Vernissage", "streetName": "Kungsgatan 11", "city": "Helsingborg",
            "postalCode": "25221", "hasSchedule": true, "weekday": 3,
            "scheduleStartTime": "18:00", "scheduleEndTime": "20:00", "recurrence": "weekly",
            "isActive": true, "createdAt": "2025-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn subcategories_are_grouped_by_category() {
        let mut event = stored_event();
        event.categories = vec![
            CategoryDto { code: 3, name: "Entertainment".into(), name_sv: "Underhållning".into() },
            CategoryDto { code: 4, name: "Culture".into(), name_sv: "Kultur".into() },
        ];
        event.subcategories = vec![
            SubcategoryDto { code: 302, name: "Music".into(), name_sv: "Musik".into(), category_code: 3 },
            SubcategoryDto { code: 402, name: "Art".into(), name_sv: "Konst".into(), category_code: 4 },
            SubcategoryDto { code: 301, name: "Film".into(), name_sv: "Film".into(), category_code: 3 },
        ];

        let payload = EventRequestPayload::from(&event);
        assert_eq!(payload.category_codes, vec![3, 4]);
        assert_eq!(payload.subcategory_codes_by_category.get(&3), Some(&vec![302, 301]));
        assert_eq!(payload.subcategory_codes_by_category.get(&4), Some(&vec![402]));
        assert_eq!(payload.tag_codes, None);
    }

    #[test]
    fn timing_flags_are_exclusive() {
        let payload = EventRequestPayload::from(&stored_event());
        assert!(payload.has_schedule);
        assert!(!payload.has_single_dates);
        assert!(!payload.is_always_open);
        assert_eq!(payload.recurrence, Some(Recurrence::Weekly));
    }

    #[test]
    fn patch_sends_only_given_fields() {
        let patch = PatchEventDto {
            house_number: Some(11),
            has_schedule: Some(true),
            weekday: Some(3),
            recurrence: Some(Recurrence::Weekly),
            subcategory_codes_by_category: Some(BTreeMap::from([(4, vec![402])])),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "houseNumber": 11,
                "hasSchedule": true,
                "weekday": 3,
                "recurrence": "weekly",
                "subcategoryCodesByCategory": { "4": [402] }
            })
        );
        assert!(!patch.is_empty());
        assert!(PatchEventDto::default().is_empty());
    }

    #[test]
    fn subcategory_map_serializes_with_numeric_keys() {
        let mut payload = EventRequestPayload::from(&stored_event());
        payload.subcategory_codes_by_category.insert(3, vec![302]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["subcategoryCodesByCategory"]["3"], serde_json::json!([302]));
        assert!(json.get("description").is_none());
    }
}
