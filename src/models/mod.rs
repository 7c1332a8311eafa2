pub mod catalog;
pub mod draft;
pub mod event;
pub mod payload;
pub mod user;

pub use draft::{EventDraft, Recurrence, TimingMode};
pub use event::{EventDto, EventFilterDto, OperationResult, PagedResult};
pub use payload::{EventRequestPayload, PatchEventDto, QuickCreateEventDto, UpdateEventDto};
