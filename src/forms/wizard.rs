use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, info};

use crate::forms::fields::{DraftField, FieldErrors};
use crate::forms::readiness::is_step_ready;
use crate::forms::transform::{from_event, to_payload};
use crate::forms::validation::{validate_all_on, validate_step_on, DateRules};
use crate::models::draft::EventDraft;
use crate::models::event::EventDto;
use crate::models::payload::EventRequestPayload;

/// Шаги мастера создания события.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    #[default]
    Details,
    Location,
    DateTime,
    Spotlight,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Details,
        WizardStep::Location,
        WizardStep::DateTime,
        WizardStep::Spotlight,
        WizardStep::Review,
    ];

    pub const LAST: WizardStep = WizardStep::Review;

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Details => 0,
            WizardStep::Location => 1,
            WizardStep::DateTime => 2,
            WizardStep::Spotlight => 3,
            WizardStep::Review => 4,
        }
    }

    /// Индекс за пределами диапазона прижимается к последнему шагу.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index().saturating_sub(1))
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Details => "Details",
            WizardStep::Location => "Location",
            WizardStep::DateTime => "Date & Time",
            WizardStep::Spotlight => "Spotlight",
            WizardStep::Review => "Confirm",
        }
    }

    /// Доля пройденного пути для индикатора прогресса, в процентах.
    pub fn progress_percent(&self) -> u8 {
        (((self.index() + 1) * 100) / Self::ALL.len()) as u8
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Мастер: владеет черновиком, текущим шагом и полем в фокусе.
#[derive(Debug, Clone, Default)]
pub struct EventWizard {
    draft: EventDraft,
    step: WizardStep,
    focus: Option<DraftField>,
    stored_spotlight_start: Option<NaiveDate>,
}

impl EventWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: EventDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    /// Режим редактирования: черновик собирается из сохранённого события.
    pub fn for_edit(event: &EventDto) -> Self {
        debug!("Hydrating draft from event {}", event.id);
        let draft = from_event(event);
        Self {
            stored_spotlight_start: draft.spotlight_start_date,
            ..Self::with_draft(draft)
        }
    }

    fn date_rules(&self) -> DateRules {
        DateRules::local().keeping_spotlight_start(self.stored_spotlight_start)
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EventDraft {
        &mut self.draft
    }

    pub fn update(&mut self, edit: impl FnOnce(&mut EventDraft)) {
        edit(&mut self.draft);
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn focus(&self) -> Option<DraftField> {
        self.focus
    }

    pub fn is_last_step(&self) -> bool {
        self.step == WizardStep::LAST
    }

    /// Состояние кнопки "Далее".
    pub fn can_advance(&self) -> bool {
        is_step_ready(self.step, &self.draft)
    }

    /// Проверяет текущий шаг и, если всё в порядке, переходит на следующий.
    /// При ошибке шаг не меняется, фокус получает первое неверное поле.
    pub fn advance(&mut self) -> Result<WizardStep, FieldErrors> {
        match validate_step_on(self.step, &self.draft, self.date_rules()) {
            Ok(()) => {
                self.focus = None;
                self.step = self.step.next();
                debug!("Wizard advanced to {}", self.step);
                Ok(self.step)
            }
            Err(errors) => {
                self.focus = errors.first().map(|(field, _)| field);
                Err(errors)
            }
        }
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.focus = None;
        self.step
    }

    /// Финальная проверка всего черновика и построение тела запроса.
    pub fn finish(&mut self) -> Result<EventRequestPayload, FieldErrors> {
        if let Err(errors) = validate_all_on(&self.draft, self.date_rules()) {
            self.focus = errors.first().map(|(field, _)| field);
            return Err(errors);
        }
        self.focus = None;
        let payload = to_payload(&self.draft);
        info!("Draft '{}' is ready for submission", payload.title);
        Ok(payload)
    }
}
