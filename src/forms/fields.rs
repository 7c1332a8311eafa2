use std::collections::BTreeMap;
use std::fmt;

/// Поля черновика в порядке их появления в форме.
///
/// Порядок вариантов важен: первая ошибка в [`FieldErrors`] - это поле,
/// которое получает фокус.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Organiser,
    OrganisationNumber,
    Title,
    Description,
    Categories,
    Subcategories,
    Filters,
    EventUrl,
    BookingUrl,
    StreetName,
    StreetName2,
    HouseNumber,
    City,
    PostalCode,
    GpsCoordinates,
    Timing,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    Weekday,
    ScheduleStartTime,
    ScheduleEndTime,
    Recurrence,
    Spotlight,
    SpotlightStartDate,
    SpotlightEndDate,
}

impl DraftField {
    /// Имя поля в JSON черновика.
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Organiser => "organiser",
            DraftField::OrganisationNumber => "organisationNumber",
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Categories => "categories",
            DraftField::Subcategories => "subcategories",
            DraftField::Filters => "filters",
            DraftField::EventUrl => "eventUrl",
            DraftField::BookingUrl => "bookingUrl",
            DraftField::StreetName => "streetName",
            DraftField::StreetName2 => "streetName2",
            DraftField::HouseNumber => "houseNumber",
            DraftField::City => "city",
            DraftField::PostalCode => "postalCode",
            DraftField::GpsCoordinates => "gpsCoordinates",
            DraftField::Timing => "timing",
            DraftField::StartDate => "startDate",
            DraftField::StartTime => "startTime",
            DraftField::EndDate => "endDate",
            DraftField::EndTime => "endTime",
            DraftField::Weekday => "weekday",
            DraftField::ScheduleStartTime => "scheduleStartTime",
            DraftField::ScheduleEndTime => "scheduleEndTime",
            DraftField::Recurrence => "recurrence",
            DraftField::Spotlight => "spotlight",
            DraftField::SpotlightStartDate => "spotlightStartDate",
            DraftField::SpotlightEndDate => "spotlightEndDate",
        }
    }

    /// Сопоставляет имя поля Rust-структуры (так его называет `validator`).
    pub(crate) fn from_ident(ident: &str) -> Option<Self> {
        let field = match ident {
            "organiser" => DraftField::Organiser,
            "organisation_number" => DraftField::OrganisationNumber,
            "title" => DraftField::Title,
            "description" => DraftField::Description,
            "categories" => DraftField::Categories,
            "subcategories" => DraftField::Subcategories,
            "filters" => DraftField::Filters,
            "event_url" => DraftField::EventUrl,
            "booking_url" => DraftField::BookingUrl,
            "street_name" => DraftField::StreetName,
            "street_name2" => DraftField::StreetName2,
            "house_number" => DraftField::HouseNumber,
            "city" => DraftField::City,
            "postal_code" => DraftField::PostalCode,
            "gps_coordinates" => DraftField::GpsCoordinates,
            "timing" => DraftField::Timing,
            "start_date" => DraftField::StartDate,
            "start_time" => DraftField::StartTime,
            "end_date" => DraftField::EndDate,
            "end_time" => DraftField::EndTime,
            "weekday" => DraftField::Weekday,
            "schedule_start_time" => DraftField::ScheduleStartTime,
            "schedule_end_time" => DraftField::ScheduleEndTime,
            "recurrence" => DraftField::Recurrence,
            "spotlight" => DraftField::Spotlight,
            "spotlight_start_date" => DraftField::SpotlightStartDate,
            "spotlight_end_date" => DraftField::SpotlightEndDate,
            _ => return None,
        };
        Some(field)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ошибки полей: одно сообщение на поле, упорядочено по форме.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<DraftField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Первое сообщение для поля побеждает.
    pub fn add(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.add(field, message);
        }
    }

    /// Поле, которое должно получить фокус.
    pub fn first(&self) -> Option<(DraftField, &str)> {
        self.0.iter().next().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub(crate) fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (ident, list) in errors.field_errors() {
            let ident: &str = ident.as_ref();
            let Some(field) = DraftField::from_ident(ident) else {
                continue;
            };
            if let Some(error) = list.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field, message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_follows_form_order() {
        let mut errors = FieldErrors::new();
        errors.add(DraftField::City, "City is required");
        errors.add(DraftField::Title, "Title is required");
        assert_eq!(errors.first(), Some((DraftField::Title, "Title is required")));
    }

    #[test]
    fn earlier_message_is_kept() {
        let mut errors = FieldErrors::new();
        errors.add(DraftField::StartTime, "Start time is required");
        errors.add(DraftField::StartTime, "Must be a valid time (HH:mm)");
        assert_eq!(errors.get(DraftField::StartTime), Some("Start time is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn display_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.add(DraftField::PostalCode, "Postal code is required");
        errors.add(DraftField::StreetName, "Street name is required");
        assert_eq!(
            errors.to_string(),
            "streetName: Street name is required; postalCode: Postal code is required"
        );
    }
}
