//! Final submission: assemble the payload, validate it whole, hand it to
//! the CV API.

pub mod assembler;
pub mod submitter;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::client::api::ApiError;
use crate::i18n::Catalog;
use crate::models::CvFormData;
use crate::wizard::progress::StepPosition;

pub use assembler::{AssemblySources, SubmissionAssembler};
pub use submitter::CvSubmitter;

/// One failed field, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledIssue {
    pub path: String,
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} field(s) failed validation", .issues.len())]
pub struct ValidationErrors {
    pub issues: Vec<LabeledIssue>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Submission refused: {0}")]
    Invalid(ValidationErrors),

    #[error("Submission failed: {0}")]
    Network(#[from] ApiError),

    #[error("A submission is already in flight")]
    InFlight,
}

impl SubmitError {
    /// Banner text shown to the user.
    pub fn user_message(&self, catalog: &Catalog) -> String {
        match self {
            SubmitError::Invalid(_) => catalog.t("submission.invalid"),
            SubmitError::Network(_) => catalog.t("submission.failed"),
            SubmitError::InFlight => catalog.t("submission.inFlight"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub user_id: Uuid,
    pub redirect_to: String,
}

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Callback the navigation controller runs instead of advancing past the
/// last sub-step.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, form: CvFormData, at: StepPosition) -> Result<SubmitReceipt, SubmitError>;
}
