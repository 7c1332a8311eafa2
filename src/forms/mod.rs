//! Мастер создания события: черновик, проверки шагов и преобразование
//! в тело запроса.

pub mod fields;
pub mod quick_create;
pub mod readiness;
pub mod transform;
pub mod validation;
pub mod wizard;

pub use fields::{DraftField, FieldErrors};
pub use quick_create::QuickCreateDraft;
pub use readiness::is_step_ready;
pub use transform::{
    combine_date_time, from_event, from_payload, to_local_iso_string, to_payload, weekday_index,
};
pub use validation::{
    organisation_number_checksum_ok, validate_all, validate_all_on, validate_organisation_number,
    validate_step, validate_step_on, DateRules,
};
pub use wizard::{EventWizard, WizardStep};
