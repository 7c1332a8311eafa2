//! validation.rs
//!
//! Правила проверки шагов мастера создания события.
//!
//! Для каждого шага строится "срез" черновика со своими полями, на срезе
//! объявлены правила `validator`. Правила, которые зависят от нескольких
//! полей сразу (конец не раньше начала, даты spotlight), проверяются
//! отдельно после декларативных.

use chrono::{Local, NaiveDate, Weekday};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::forms::fields::{DraftField, FieldErrors};
use crate::forms::transform::{combine_date_time, parse_clock_time};
use crate::forms::wizard::WizardStep;
use crate::models::draft::{EventDraft, TimingMode};

// --- Номер организации ---

/// Контрольная сумма номера организации (вариант Luhn mod 10).
///
/// Дефисы убираются, должно остаться ровно 10 цифр. Цифры на чётных
/// позициях (0, 2, ..., 8) удваиваются, из результата больше 9 вычитается 9,
/// сумма всех цифр должна делиться на 10.
pub fn organisation_number_checksum_ok(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if digits.len() != 10 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                *d
            }
        })
        .sum();

    sum % 10 == 0
}

/// `NNNNNN-NNNN` или 10 цифр подряд.
fn organisation_number_format_ok(value: &str) -> bool {
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match value.split_once('-') {
        Some((head, tail)) => head.len() == 6 && tail.len() == 4 && all_digits(head) && all_digits(tail),
        None => value.len() == 10 && all_digits(value),
    }
}

/// Правило `validator` для номера организации.
pub fn validate_organisation_number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if organisation_number_format_ok(value) && organisation_number_checksum_ok(value) {
        Ok(())
    } else {
        Err(ValidationError::new("organisation_number")
            .with_message(Cow::Borrowed("Invalid organisation number")))
    }
}

/// Время в формате `HH:mm`. Пустое значение пропускается: обязательность
/// проверяется отдельным правилом.
pub fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_clock_time(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("clock_time")
            .with_message(Cow::Borrowed("Must be a valid time (HH:mm)")))
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

// --- Срезы черновика по шагам ---

#[derive(Debug, Validate)]
struct DetailsFields {
    #[validate(length(min = 1, message = "Organiser is required"))]
    organiser: String,
    #[validate(custom(function = "validate_organisation_number"))]
    organisation_number: Option<String>,
    #[validate(length(min = 1, message = "Title is required"))]
    title: String,
    #[validate(length(max = 4000, message = "Max 4000 characters"))]
    description: Option<String>,
    #[validate(length(min = 1, message = "Please select at least one category"))]
    categories: Vec<u32>,
    #[validate(url(message = "Must be a valid URL"))]
    event_url: Option<String>,
    #[validate(url(message = "Must be a valid URL"))]
    booking_url: Option<String>,
}

impl DetailsFields {
    fn of(draft: &EventDraft) -> Self {
        Self {
            organiser: draft.organiser.trim().to_string(),
            organisation_number: non_blank(&draft.organisation_number),
            title: draft.title.trim().to_string(),
            description: non_blank(&draft.description),
            categories: draft.categories.clone(),
            event_url: non_blank(&draft.event_url),
            booking_url: non_blank(&draft.booking_url),
        }
    }
}

#[derive(Debug, Validate)]
struct LocationFields {
    #[validate(length(min = 1, message = "Street name is required"))]
    street_name: String,
    #[validate(length(max = 200, message = "Max 200 characters"))]
    street_name2: Option<String>,
    #[validate(range(min = 1, message = "Must be greater than 0"))]
    house_number: Option<u32>,
    #[validate(length(min = 1, message = "City is required"))]
    city: String,
    #[validate(length(min = 1, message = "Postal code is required"))]
    postal_code: String,
    #[validate(length(max = 50, message = "Max 50 characters"))]
    gps_coordinates: Option<String>,
}

impl LocationFields {
    fn of(draft: &EventDraft) -> Self {
        Self {
            street_name: draft.street_name.trim().to_string(),
            street_name2: non_blank(&draft.street_name2),
            house_number: draft.house_number,
            city: draft.city.trim().to_string(),
            postal_code: draft.postal_code.trim().to_string(),
            gps_coordinates: non_blank(&draft.gps_coordinates),
        }
    }
}

#[derive(Debug, Validate)]
struct SingleDatesFields {
    #[validate(required(message = "Start date is required"))]
    start_date: Option<NaiveDate>,
    #[validate(
        length(min = 1, message = "Start time is required"),
        custom(function = "validate_clock_time")
    )]
    start_time: String,
    #[validate(required(message = "End date is required"))]
    end_date: Option<NaiveDate>,
    #[validate(
        length(min = 1, message = "End time is required"),
        custom(function = "validate_clock_time")
    )]
    end_time: String,
}

#[derive(Debug, Validate)]
struct ScheduleFields {
    #[validate(required(message = "Recurrence start date is required"))]
    start_date: Option<NaiveDate>,
    #[validate(required(message = "Please pick a weekday"))]
    weekday: Option<Weekday>,
    #[validate(
        length(min = 1, message = "Start time is required"),
        custom(function = "validate_clock_time")
    )]
    schedule_start_time: String,
    #[validate(
        length(min = 1, message = "End time is required"),
        custom(function = "validate_clock_time")
    )]
    schedule_end_time: String,
}

#[derive(Debug, Validate)]
struct SpotlightFields {
    #[validate(required(message = "Spotlight start date is required"))]
    spotlight_start_date: Option<NaiveDate>,
    #[validate(required(message = "Spotlight end date is required"))]
    spotlight_end_date: Option<NaiveDate>,
}

fn declared<T: Validate>(fields: &T) -> FieldErrors {
    match fields.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(errors),
    }
}

// --- Проверка шагов ---

/// Даты, от которых зависят правила spotlight.
///
/// `kept_spotlight_start` заполняется в режиме редактирования: начало
/// spotlight, сохранённое на сервере, может быть в прошлом, и пока
/// организатор его не меняет, нижняя граница "не раньше завтра" не действует.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRules {
    pub today: NaiveDate,
    pub kept_spotlight_start: Option<NaiveDate>,
}

impl DateRules {
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            kept_spotlight_start: None,
        }
    }

    /// "Сегодня" по локальным часам.
    pub fn local() -> Self {
        Self::on(Local::now().date_naive())
    }

    pub fn keeping_spotlight_start(mut self, start: Option<NaiveDate>) -> Self {
        self.kept_spotlight_start = start;
        self
    }

    fn earliest_spotlight_start(&self, start: NaiveDate) -> Option<NaiveDate> {
        if self.kept_spotlight_start == Some(start) {
            return None;
        }
        Some(self.today.succ_opt().unwrap_or(self.today))
    }
}

impl From<NaiveDate> for DateRules {
    fn from(today: NaiveDate) -> Self {
        Self::on(today)
    }
}

/// Проверяет поля одного шага. Дата "сегодня" для spotlight берётся из
/// локальных часов.
pub fn validate_step(step: WizardStep, draft: &EventDraft) -> Result<(), FieldErrors> {
    validate_step_on(step, draft, DateRules::local())
}

/// То же, что [`validate_step`], но с явными датами.
pub fn validate_step_on(
    step: WizardStep,
    draft: &EventDraft,
    rules: impl Into<DateRules>,
) -> Result<(), FieldErrors> {
    let errors = match step {
        WizardStep::Details => declared(&DetailsFields::of(draft)),
        WizardStep::Location => declared(&LocationFields::of(draft)),
        WizardStep::DateTime => date_time_errors(draft),
        WizardStep::Spotlight => spotlight_errors(draft, rules.into()),
        WizardStep::Review => FieldErrors::new(),
    };
    errors.into_result()
}

/// Проверка всего черновика перед отправкой.
pub fn validate_all(draft: &EventDraft) -> Result<(), FieldErrors> {
    validate_all_on(draft, DateRules::local())
}

pub fn validate_all_on(draft: &EventDraft, rules: impl Into<DateRules>) -> Result<(), FieldErrors> {
    let rules = rules.into();
    let mut errors = FieldErrors::new();
    for step in WizardStep::ALL {
        if let Err(step_errors) = validate_step_on(step, draft, rules) {
            errors.merge(step_errors);
        }
    }
    errors.into_result()
}

fn date_time_errors(draft: &EventDraft) -> FieldErrors {
    match draft.timing {
        TimingMode::SingleDates => {
            let fields = SingleDatesFields {
                start_date: draft.start_date,
                start_time: draft.start_time.trim().to_string(),
                end_date: draft.end_date,
                end_time: draft.end_time.trim().to_string(),
            };
            let mut errors = declared(&fields);
            if errors.is_empty() {
                if let (Some(start), Some(end)) = (fields.start_date, fields.end_date) {
                    if end < start {
                        errors.add(DraftField::EndDate, "End date cannot be before start date");
                    } else if combine_date_time(end, &fields.end_time)
                        < combine_date_time(start, &fields.start_time)
                    {
                        errors.add(DraftField::EndTime, "End time cannot be before start time");
                    }
                }
            }
            errors
        }
        TimingMode::Schedule => {
            let fields = ScheduleFields {
                start_date: draft.start_date,
                weekday: draft.weekday,
                schedule_start_time: draft.schedule_start_time.trim().to_string(),
                schedule_end_time: draft.schedule_end_time.trim().to_string(),
            };
            let mut errors = declared(&fields);
            if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
                if end < start {
                    errors.add(DraftField::EndDate, "End date cannot be before start date");
                }
            }
            let times = (
                parse_clock_time(&fields.schedule_start_time),
                parse_clock_time(&fields.schedule_end_time),
            );
            if let (Some(start), Some(end)) = times {
                if end < start {
                    errors.add(
                        DraftField::ScheduleEndTime,
                        "End time cannot be before start time",
                    );
                }
            }
            errors
        }
        TimingMode::AlwaysOpen => FieldErrors::new(),
    }
}

fn spotlight_errors(draft: &EventDraft, rules: DateRules) -> FieldErrors {
    if !draft.spotlight {
        return FieldErrors::new();
    }
    let fields = SpotlightFields {
        spotlight_start_date: draft.spotlight_start_date,
        spotlight_end_date: draft.spotlight_end_date,
    };
    let mut errors = declared(&fields);

    if let Some(start) = fields.spotlight_start_date {
        if rules.earliest_spotlight_start(start).is_some_and(|earliest| start < earliest) {
            errors.add(
                DraftField::SpotlightStartDate,
                "Spotlight can start tomorrow at the earliest",
            );
        }
        if let Some(end) = fields.spotlight_end_date {
            if end < start {
                errors.add(
                    DraftField::SpotlightEndDate,
                    "Spotlight end date cannot be before start date",
                );
            }
        }
    }
    errors
}
