use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Режим времени события. Активен ровно один.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimingMode {
    /// Одна дата (или диапазон дат) начала и конца.
    #[default]
    SingleDates,
    /// Повторяющееся расписание по дню недели.
    Schedule,
    /// Место, открытое всегда.
    AlwaysOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Weekdays,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekdays => "weekdays",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecurrence(pub String);

impl fmt::Display for UnknownRecurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown recurrence {:?}", self.0)
    }
}

impl std::error::Error for UnknownRecurrence {}

impl FromStr for Recurrence {
    type Err = UnknownRecurrence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Recurrence::None),
            "weekdays" => Ok(Recurrence::Weekdays),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            _ => Err(UnknownRecurrence(s.to_string())),
        }
    }
}

/// Рабочее состояние создаваемого (или редактируемого) события.
///
/// Строковые поля хранят ввод как есть: пустая строка означает
/// "не заполнено". Приведение к `Option` происходит только в
/// [`crate::forms::to_payload`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub organiser: String,
    pub organisation_number: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<u32>,
    pub subcategories: BTreeMap<u32, Vec<u32>>,
    pub filters: Vec<u32>,
    pub event_url: String,
    pub booking_url: String,

    pub street_name: String,
    pub street_name2: String,
    pub house_number: Option<u32>,
    pub city: String,
    pub postal_code: String,
    pub gps_coordinates: String,

    pub timing: TimingMode,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    pub weekday: Option<Weekday>,
    pub schedule_start_time: String,
    pub schedule_end_time: String,
    pub recurrence: Option<Recurrence>,

    pub spotlight: bool,
    pub spotlight_start_date: Option<NaiveDate>,
    pub spotlight_end_date: Option<NaiveDate>,
}

impl EventDraft {
    /// Переключает режим времени. Значения других режимов не стираются,
    /// чтобы пользователь мог вернуться к ним.
    pub fn set_timing(&mut self, timing: TimingMode) {
        self.timing = timing;
    }

    /// Выключение spotlight сбрасывает его даты.
    pub fn set_spotlight(&mut self, on: bool) {
        self.spotlight = on;
        if !on {
            self.spotlight_start_date = None;
            self.spotlight_end_date = None;
        }
    }

    pub fn toggle_category(&mut self, code: u32) {
        if let Some(pos) = self.categories.iter().position(|c| *c == code) {
            self.categories.remove(pos);
            self.subcategories.remove(&code);
        } else {
            self.categories.push(code);
        }
    }

    pub fn toggle_subcategory(&mut self, category: u32, code: u32) {
        let selected = self.subcategories.entry(category).or_default();
        if let Some(pos) = selected.iter().position(|c| *c == code) {
            selected.remove(pos);
        } else {
            selected.push(code);
        }
    }

    pub fn toggle_filter(&mut self, code: u32) {
        if let Some(pos) = self.filters.iter().position(|c| *c == code) {
            self.filters.remove(pos);
        } else {
            self.filters.push(code);
        }
    }
}
