use crate::forms::wizard::WizardStep;
use crate::models::draft::{EventDraft, TimingMode};

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Можно ли включить кнопку "Далее" на шаге.
///
/// Только подсказка для интерфейса: полную проверку делает
/// [`crate::forms::validate_step`], и прямую отправку этот предикат
/// не блокирует.
pub fn is_step_ready(step: WizardStep, draft: &EventDraft) -> bool {
    match step {
        WizardStep::Details => {
            filled(&draft.organiser) && filled(&draft.title) && !draft.categories.is_empty()
        }
        WizardStep::Location => {
            filled(&draft.street_name) && filled(&draft.city) && filled(&draft.postal_code)
        }
        WizardStep::DateTime => match draft.timing {
            TimingMode::SingleDates => {
                draft.start_date.is_some()
                    && filled(&draft.start_time)
                    && draft.end_date.is_some()
                    && filled(&draft.end_time)
            }
            TimingMode::Schedule => {
                draft.start_date.is_some()
                    && draft.weekday.is_some()
                    && filled(&draft.schedule_start_time)
                    && filled(&draft.schedule_end_time)
            }
            TimingMode::AlwaysOpen => true,
        },
        WizardStep::Spotlight => {
            !draft.spotlight
                || (draft.spotlight_start_date.is_some() && draft.spotlight_end_date.is_some())
        }
        WizardStep::Review => true,
    }
}
