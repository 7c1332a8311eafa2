pub mod api;
pub mod dashboard;
pub mod submission;

pub use api::ApiClient;
pub use dashboard::{DashboardPage, EventsDashboard};
pub use submission::{FailureKind, SubmissionDispatcher, SubmissionOutcome};
