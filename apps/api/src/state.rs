use std::sync::Arc;

use crate::config::Config;
use crate::cv::repository::CvRepository;
use crate::submission::SubmissionAssembler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres-backed when `DATABASE_URL` is set, in-memory otherwise.
    pub repo: Arc<dyn CvRepository>,
    /// Full-schema validation and issue labelling for incoming CVs.
    pub assembler: Arc<SubmissionAssembler>,
    pub config: Config,
}
