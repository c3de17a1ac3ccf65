use std::sync::Arc;

use tracing::debug;

use crate::form::MountedForm;
use crate::models::CvFormData;
use crate::wizard::fields::{fields_for, FieldPath};
use crate::wizard::progress::StepPosition;
use crate::wizard::schema::{CvSchema, ValidationIssue};

/// Outcome of validating one sub-step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCheck {
    pub scope: &'static [FieldPath],
    pub issues: Vec<ValidationIssue>,
}

impl StepCheck {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validates only the fields registered for a sub-step.
#[derive(Clone)]
pub struct ValidationGate {
    schema: Arc<dyn CvSchema>,
}

impl ValidationGate {
    pub fn new(schema: Arc<dyn CvSchema>) -> Self {
        Self { schema }
    }

    /// Runs the sub-step's fields through the schema. A sub-step with no
    /// registered fields always passes.
    pub async fn check(&self, at: StepPosition, data: &CvFormData) -> StepCheck {
        let scope = fields_for(at.step, at.sub_step);
        if scope.is_empty() {
            return StepCheck { scope, issues: Vec::new() };
        }
        let issues = self.schema.validate_paths(data, scope).await;
        StepCheck { scope, issues }
    }

    /// Validates the form's current values for `at` and records the
    /// outcome in the form's error map, touching only in-scope fields.
    pub async fn validate(&self, at: StepPosition, form: &MountedForm) -> bool {
        let check = self.check(at, &form.values()).await;
        form.apply_validation(check.scope, &check.issues);
        if !check.passed() {
            debug!(
                step = at.step,
                sub_step = at.sub_step,
                issues = check.issues.len(),
                "Step validation failed"
            );
        }
        check.passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::memory_store;
    use crate::wizard::fields::PersonalField;
    use crate::wizard::schema::{MessageKey, StandardSchema};
    use std::time::Duration;

    fn gate() -> ValidationGate {
        ValidationGate::new(Arc::new(StandardSchema))
    }

    #[tokio::test]
    async fn test_identity_sub_step() {
        let mut data = CvFormData::default();
        let check = gate().check(StepPosition::new(0, 0), &data).await;
        assert_eq!(check.issues.len(), 2);

        data.personal_info.firstname = "Jean".into();
        data.personal_info.lastname = "Dupont".into();
        let check = gate().check(StepPosition::new(0, 0), &data).await;
        assert!(check.passed());
    }

    #[tokio::test]
    async fn test_unregistered_position_passes() {
        let check = gate().check(StepPosition::new(8, 0), &CvFormData::default()).await;
        assert!(check.passed());
        assert!(check.scope.is_empty());
    }

    #[tokio::test]
    async fn test_failure_only_touches_scoped_errors() {
        let (store, _) = memory_store().await;
        let form = MountedForm::mount(store, Duration::from_millis(300)).await;
        form.apply_validation(
            &[FieldPath::Hobbies],
            &[ValidationIssue { path: FieldPath::Hobby(0), message: MessageKey::BlankEntry }],
        );

        let passed = gate().validate(StepPosition::new(0, 1), &form).await;

        assert!(!passed);
        let errors = form.errors();
        assert_eq!(
            errors.get(&FieldPath::Personal(PersonalField::Email)),
            Some(MessageKey::Required)
        );
        assert_eq!(errors.get(&FieldPath::Hobby(0)), Some(MessageKey::BlankEntry));
        assert_eq!(errors.get(&FieldPath::Personal(PersonalField::Firstname)), None);
    }

    #[tokio::test]
    async fn test_success_clears_previous_scope_errors() {
        let (store, _) = memory_store().await;
        let form = MountedForm::mount(store, Duration::from_millis(300)).await;
        assert!(!gate().validate(StepPosition::new(3, 0), &form).await);
        assert!(!form.errors().is_empty());

        form.update(|d| {
            d.skills.push(crate::models::cv::Skill { name: "Rust".into(), level: Some(5) })
        });
        assert!(gate().validate(StepPosition::new(3, 0), &form).await);
        assert!(form.errors().is_empty());
    }
}
