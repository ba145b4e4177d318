//! Interactive client for the directory API: page state, form validation,
//! HTTP calls and terminal rendering.

pub mod api;
pub mod form;
pub mod render;
pub mod session;
pub mod view;

pub use api::{ApiError, DirectoryApi, DEFAULT_TIMEOUT};
pub use form::{Field, FormErrors, UserDraft, UserForm};
pub use session::{DirectorySession, SubmitOutcome};
pub use view::{DirectoryView, Stats, StatusKind, StatusMessage, STATUS_TTL};
