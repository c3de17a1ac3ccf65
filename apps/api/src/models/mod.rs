pub mod cv;
pub mod record;

pub use cv::{CvFormData, CvFormPatch, Section};
