//! Server side of the CV endpoints: handlers and record storage.

pub mod handlers;
pub mod repository;

pub use repository::{CvRepository, InMemoryCvRepository, PgCvRepository};
