//! Преобразование черновика в тело запроса и обратно.
//!
//! Даты уходят на бэкенд как локальное "настенное" время
//! `YYYY-MM-DDTHH:mm:00.000` без перевода в UTC.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::collections::BTreeMap;

use crate::models::draft::{EventDraft, TimingMode};
use crate::models::event::EventDto;
use crate::models::payload::EventRequestPayload;

pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Дата + `"HH:mm"`. Неразборчивое время даёт полночь.
pub fn combine_date_time(date: NaiveDate, time: &str) -> NaiveDateTime {
    date.and_time(parse_clock_time(time).unwrap_or(NaiveTime::MIN))
}

pub fn to_local_iso_string(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:00.000").to_string()
}

/// Разбирает отметку времени с бэкенда. Строки со смещением
/// переводятся в локальное время.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// `"Wed"`, `"wed"` или `"Wednesday"` -> 3. Воскресенье = 0.
pub fn weekday_index(name: &str) -> Option<u8> {
    name.trim()
        .parse::<Weekday>()
        .ok()
        .map(|w| w.num_days_from_sunday() as u8)
}

pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
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

fn date_at_midnight(date: NaiveDate) -> String {
    to_local_iso_string(date.and_time(NaiveTime::MIN))
}

/// Черновик -> тело запроса. Чистая функция: один и тот же черновик
/// всегда даёт одинаковый результат.
pub fn to_payload(draft: &EventDraft) -> EventRequestPayload {
    let subcategories: BTreeMap<u32, Vec<u32>> = draft
        .subcategories
        .iter()
        .filter(|(_, codes)| !codes.is_empty())
        .map(|(category, codes)| (*category, codes.clone()))
        .collect();

    let mut payload = EventRequestPayload {
        organiser: draft.organiser.trim().to_string(),
        organisation_number: draft.organisation_number.trim().to_string(),
        title: draft.title.trim().to_string(),
        description: non_blank(&draft.description),
        event_url: non_blank(&draft.event_url),
        booking_url: non_blank(&draft.booking_url),
        street_name: draft.street_name.trim().to_string(),
        street_name2: non_blank(&draft.street_name2),
        house_number: draft.house_number,
        city: draft.city.trim().to_string(),
        postal_code: draft.postal_code.trim().to_string(),
        gps_coordinates: non_blank(&draft.gps_coordinates),
        has_single_dates: draft.timing == TimingMode::SingleDates,
        start_date: None,
        end_date: None,
        has_schedule: draft.timing == TimingMode::Schedule,
        weekday: None,
        schedule_start_time: None,
        schedule_end_time: None,
        recurrence: None,
        is_always_open: draft.timing == TimingMode::AlwaysOpen,
        spotlight: draft.spotlight,
        spotlight_start_date: None,
        spotlight_end_date: None,
        category_codes: draft.categories.clone(),
        subcategory_codes_by_category: subcategories,
        tag_codes: if draft.filters.is_empty() {
            None
        } else {
            Some(draft.filters.clone())
        },
    };

    // Поля неактивных режимов не отправляются
    match draft.timing {
        TimingMode::SingleDates => {
            payload.start_date = draft
                .start_date
                .map(|d| to_local_iso_string(combine_date_time(d, &draft.start_time)));
            payload.end_date = draft
                .end_date
                .map(|d| to_local_iso_string(combine_date_time(d, &draft.end_time)));
        }
        TimingMode::Schedule => {
            payload.start_date = draft.start_date.map(date_at_midnight);
            payload.end_date = draft.end_date.map(date_at_midnight);
            payload.weekday = draft.weekday.map(|w| w.num_days_from_sunday() as u8);
            payload.schedule_start_time = non_blank(&draft.schedule_start_time);
            payload.schedule_end_time = non_blank(&draft.schedule_end_time);
            payload.recurrence = draft.recurrence;
        }
        TimingMode::AlwaysOpen => {}
    }

    if draft.spotlight {
        payload.spotlight_start_date = draft.spotlight_start_date.map(date_at_midnight);
        payload.spotlight_end_date = draft.spotlight_end_date.map(date_at_midnight);
    }

    payload
}

/// Тело запроса -> черновик (гидрация формы при редактировании).
pub fn from_payload(payload: &EventRequestPayload) -> EventDraft {
    let timing = if payload.is_always_open {
        TimingMode::AlwaysOpen
    } else if payload.has_schedule {
        TimingMode::Schedule
    } else {
        TimingMode::SingleDates
    };

    let start = payload.start_date.as_deref().and_then(parse_timestamp);
    let end = payload.end_date.as_deref().and_then(parse_timestamp);
    let clock = |dt: Option<NaiveDateTime>| {
        dt.map(|v| v.format("%H:%M").to_string()).unwrap_or_default()
    };
    let day = |value: &Option<String>| {
        value.as_deref().and_then(parse_timestamp).map(|dt| dt.date())
    };

    let mut draft = EventDraft {
        organiser: payload.organiser.clone(),
        organisation_number: payload.organisation_number.clone(),
        title: payload.title.clone(),
        description: payload.description.clone().unwrap_or_default(),
        categories: payload.category_codes.clone(),
        subcategories: payload.subcategory_codes_by_category.clone(),
        filters: payload.tag_codes.clone().unwrap_or_default(),
        event_url: payload.event_url.clone().unwrap_or_default(),
        booking_url: payload.booking_url.clone().unwrap_or_default(),
        street_name: payload.street_name.clone(),
        street_name2: payload.street_name2.clone().unwrap_or_default(),
        house_number: payload.house_number,
        city: payload.city.clone(),
        postal_code: payload.postal_code.clone(),
        gps_coordinates: payload.gps_coordinates.clone().unwrap_or_default(),
        timing,
        start_date: start.map(|dt| dt.date()),
        end_date: end.map(|dt| dt.date()),
        spotlight: payload.spotlight,
        ..Default::default()
    };

    match timing {
        TimingMode::SingleDates => {
            draft.start_time = clock(start);
            draft.end_time = clock(end);
        }
        TimingMode::Schedule => {
            draft.weekday = payload.weekday.and_then(weekday_from_index);
            draft.schedule_start_time = payload.schedule_start_time.clone().unwrap_or_default();
            draft.schedule_end_time = payload.schedule_end_time.clone().unwrap_or_default();
            draft.recurrence = payload.recurrence;
        }
        TimingMode::AlwaysOpen => {
            draft.start_date = None;
            draft.end_date = None;
        }
    }

    if payload.spotlight {
        draft.spotlight_start_date = day(&payload.spotlight_start_date);
        draft.spotlight_end_date = day(&payload.spotlight_end_date);
    }

    draft
}

/// Сохранённое событие -> черновик.
pub fn from_event(event: &EventDto) -> EventDraft {
    from_payload(&EventRequestPayload::from(event))
}
