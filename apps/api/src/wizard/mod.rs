//! Step progression for the CV form: which fields each sub-step owns, how
//! they are validated, and how the user moves between sub-steps.

pub mod fields;
pub mod form_errors;
pub mod gate;
pub mod navigation;
pub mod progress;
pub mod schema;
pub mod steps;

pub use fields::FieldPath;
pub use gate::ValidationGate;
pub use navigation::{NavOutcome, NavigationController};
pub use progress::{ProgressState, StepPosition};
pub use schema::{CvSchema, StandardSchema};
