//! Network side of the wizard: the CV API client and edit-mode loading.

pub mod api;
pub mod edit;

pub use api::{ApiError, CvApi, FetchedCv, HttpCvApi};
pub use edit::{load_for_edit, schedule_redirect, EditState, Redirect};
