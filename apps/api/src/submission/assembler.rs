use std::sync::Arc;

use tracing::debug;

use crate::i18n::{field_label, nationalities, Catalog};
use crate::models::{CvFormData, Section};
use crate::store::FormStore;
use crate::submission::{LabeledIssue, ValidationErrors};
use crate::wizard::schema::{CvSchema, ValidationIssue};

/// The three places a section of the draft can live at submit time, in
/// precedence order.
#[derive(Debug, Clone, Default)]
pub struct AssemblySources {
    pub form: CvFormData,
    pub store: CvFormData,
    pub persisted: Option<CvFormData>,
}

/// Picks, for every section, the first populated source among form,
/// store and persisted storage. A section empty everywhere comes from the
/// form.
pub fn merge_sources(sources: &AssemblySources) -> CvFormData {
    let mut merged = sources.form.clone();
    for section in Section::ALL {
        if sources.form.section_populated(section) {
            continue;
        }
        if sources.store.section_populated(section) {
            debug!(section = section.key(), "Section taken from store");
            merged.take_section(&sources.store, section);
        } else if let Some(persisted) = sources
            .persisted
            .as_ref()
            .filter(|p| p.section_populated(section))
        {
            debug!(section = section.key(), "Section taken from persisted draft");
            merged.take_section(persisted, section);
        }
    }
    merged
}

pub struct SubmissionAssembler {
    schema: Arc<dyn CvSchema>,
    catalog: Arc<Catalog>,
}

impl SubmissionAssembler {
    pub fn new(schema: Arc<dyn CvSchema>, catalog: Arc<Catalog>) -> Self {
        Self { schema, catalog }
    }

    /// Merged, normalized payload plus every full-schema issue it has.
    pub async fn prepare(&self, sources: &AssemblySources) -> (CvFormData, Vec<ValidationIssue>) {
        let mut payload = merge_sources(sources);
        payload.personal_info.nationality =
            nationalities::normalize(&payload.personal_info.nationality, self.catalog.locale());
        let issues = self.schema.validate_all(&payload).await;
        (payload, issues)
    }

    /// Merges, normalizes and validates against the full schema.
    pub async fn assemble(&self, sources: &AssemblySources) -> Result<CvFormData, ValidationErrors> {
        let (payload, issues) = self.prepare(sources).await;
        if issues.is_empty() {
            Ok(payload)
        } else {
            Err(self.label(&issues))
        }
    }

    /// Reads the store and its persisted envelope next to the mounted
    /// form's values.
    pub async fn gather(form: CvFormData, store: &FormStore) -> AssemblySources {
        AssemblySources {
            form,
            store: store.form_data(),
            persisted: store.read_persisted().await.map(|s| s.form_data),
        }
    }

    pub async fn assemble_and_validate(
        &self,
        form: CvFormData,
        store: &FormStore,
    ) -> Result<CvFormData, ValidationErrors> {
        let sources = Self::gather(form, store).await;
        self.assemble(&sources).await
    }

    pub fn label(&self, issues: &[ValidationIssue]) -> ValidationErrors {
        ValidationErrors {
            issues: issues
                .iter()
                .map(|issue| LabeledIssue {
                    path: issue.path.to_string(),
                    label: field_label(&issue.path, &self.catalog),
                    message: self.catalog.t(issue.message.key()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::models::cv::{Nationality, NationalityEntry, Skill};
    use crate::models::CvFormPatch;
    use crate::store::tests::memory_store;
    use crate::wizard::schema::tests::complete_cv;
    use crate::wizard::schema::StandardSchema;

    fn skills(names: &[&str]) -> CvFormData {
        CvFormData {
            skills: names
                .iter()
                .map(|n| Skill { name: n.to_string(), level: None })
                .collect(),
            ..Default::default()
        }
    }

    fn assembler(locale: Locale) -> SubmissionAssembler {
        SubmissionAssembler::new(Arc::new(StandardSchema), Arc::new(Catalog::new(locale)))
    }

    #[test]
    fn test_store_wins_over_persisted_when_form_empty() {
        let merged = merge_sources(&AssemblySources {
            form: skills(&[]),
            store: skills(&["A"]),
            persisted: Some(skills(&["B"])),
        });
        assert_eq!(merged.skills, skills(&["A"]).skills);
    }

    #[test]
    fn test_persisted_used_when_form_and_store_empty() {
        let merged = merge_sources(&AssemblySources {
            form: skills(&[]),
            store: skills(&[]),
            persisted: Some(skills(&["B"])),
        });
        assert_eq!(merged.skills, skills(&["B"]).skills);
    }

    #[test]
    fn test_form_wins_when_populated() {
        let merged = merge_sources(&AssemblySources {
            form: skills(&["F"]),
            store: skills(&["A"]),
            persisted: Some(skills(&["B"])),
        });
        assert_eq!(merged.skills, skills(&["F"]).skills);
    }

    #[test]
    fn test_sections_merge_independently() {
        let mut form = CvFormData::default();
        form.personal_info.firstname = "Jean".into();
        let mut store = skills(&["A"]);
        store.personal_info.firstname = "Stale".into();
        let merged = merge_sources(&AssemblySources {
            form,
            store,
            persisted: None,
        });
        assert_eq!(merged.personal_info.firstname, "Jean");
        assert_eq!(merged.skills.len(), 1);
    }

    #[tokio::test]
    async fn test_valid_payload_has_normalized_nationality() {
        let mut cv = complete_cv();
        cv.personal_info.nationality = vec![NationalityEntry::Plain("fr".into())];
        let payload = assembler(Locale::Fr)
            .assemble(&AssemblySources {
                form: cv,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            payload.personal_info.nationality,
            vec![NationalityEntry::Pair(Nationality {
                code: "FR".into(),
                label: "Française".into(),
            })]
        );
    }

    #[tokio::test]
    async fn test_zero_languages_is_labelled() {
        let mut cv = complete_cv();
        cv.languages.clear();
        let err = assembler(Locale::En)
            .assemble(&AssemblySources {
                form: cv,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].label, "Languages");
        assert_eq!(err.issues[0].message, "At least one language is required");
    }

    #[tokio::test]
    async fn test_reads_store_and_persisted_sources() {
        let (store, _) = memory_store().await;
        let mut in_store = complete_cv();
        in_store.personal_info.firstname = "Stored".into();
        store.replace_form_data(in_store).await;
        store
            .set_form_data(CvFormPatch {
                languages: Some(Vec::new()),
                ..Default::default()
            })
            .await;

        // the form only knows the identity sub-step
        let mut form = CvFormData::default();
        form.personal_info.firstname = "Jean".into();
        form.personal_info.lastname = "Dupont".into();

        let err = assembler(Locale::En)
            .assemble_and_validate(form, &store)
            .await
            .unwrap_err();
        // personal info comes from the form, so its other fields are missing
        assert!(err.issues.iter().any(|i| i.path == "personalInfo.email"));
        assert!(err.issues.iter().any(|i| i.path == "languages"));
        assert!(!err.issues.iter().any(|i| i.path == "skills"));
    }
}
