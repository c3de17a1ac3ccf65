//! One user's pass through the CV wizard, from mount to submission.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::client::api::{CvApi, HttpCvApi};
use crate::client::edit::{self, EditState};
use crate::config::WizardConfig;
use crate::form::MountedForm;
use crate::i18n::Catalog;
use crate::models::CvFormData;
use crate::store::{DraftStorage, FileDraftStorage, FormStore, MemoryDraftStorage, StoreOptions};
use crate::submission::{CvSubmitter, SubmissionAssembler, SubmissionPhase};
use crate::wizard::navigation::{NavOutcome, NavigationController};
use crate::wizard::progress::StepPosition;
use crate::wizard::schema::{CvSchema, StandardSchema};
use crate::wizard::ValidationGate;

/// Composition root: owns the store, the mounted form, the navigation
/// controller and the submitter for a single session.
pub struct Wizard {
    store: Arc<FormStore>,
    form: MountedForm,
    navigation: NavigationController,
    submitter: Arc<CvSubmitter>,
    api: Arc<dyn CvApi>,
    catalog: Arc<Catalog>,
    config: WizardConfig,
}

impl Wizard {
    pub async fn start(
        config: WizardConfig,
        storage: Arc<dyn DraftStorage>,
        api: Arc<dyn CvApi>,
        schema: Arc<dyn CvSchema>,
    ) -> Self {
        let store = FormStore::init(
            storage,
            StoreOptions {
                key: config.storage_key.clone(),
                ..StoreOptions::default()
            },
        )
        .await;
        let form = MountedForm::mount(store.clone(), config.sync_debounce).await;
        let catalog = Arc::new(Catalog::new(config.locale));
        let submitter = Arc::new(CvSubmitter::new(
            SubmissionAssembler::new(schema.clone(), catalog.clone()),
            api.clone(),
            store.clone(),
        ));
        let navigation =
            NavigationController::new(ValidationGate::new(schema), submitter.clone(), store.clone());

        let at = navigation.position();
        info!(step = at.step, sub_step = at.sub_step, "Wizard started");
        Self {
            store,
            form,
            navigation,
            submitter,
            api,
            catalog,
            config,
        }
    }

    /// Standard schema, HTTP API at `api_url`, file drafts when a draft
    /// directory is configured.
    pub async fn from_config(config: WizardConfig) -> Self {
        let storage: Arc<dyn DraftStorage> = match &config.draft_dir {
            Some(dir) => Arc::new(FileDraftStorage::new(dir.clone())),
            None => Arc::new(MemoryDraftStorage::new()),
        };
        let api = Arc::new(HttpCvApi::new(config.api_url.clone()));
        Self::start(config, storage, api, Arc::new(StandardSchema)).await
    }

    pub fn form(&self) -> &MountedForm {
        &self.form
    }

    pub fn store(&self) -> &Arc<FormStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn position(&self) -> StepPosition {
        self.navigation.position()
    }

    pub fn progress(&self) -> f64 {
        self.navigation.progress()
    }

    pub fn submission_phase(&self) -> watch::Receiver<SubmissionPhase> {
        self.submitter.watch_phase()
    }

    pub async fn next(&self) -> NavOutcome {
        self.navigation.go_next(&self.form).await
    }

    pub async fn previous(&self) -> NavOutcome {
        self.navigation.go_previous().await
    }

    pub async fn go_to_step(&self, target: usize) -> NavOutcome {
        self.navigation.go_to_step(target).await
    }

    /// Starts the CV over. The session's user id is kept.
    pub async fn reset(&self) {
        self.store.reset_form().await;
        self.form.hydrate(&CvFormData::default());
        self.form.clear_errors();
        self.navigation.reset().await;
    }

    /// Loads an existing CV into the store and the form, back at the first
    /// sub-step.
    pub async fn load_for_edit(&self, user_id: Uuid) -> EditState {
        let state =
            edit::load_for_edit(self.api.as_ref(), &self.store, user_id, self.config.redirect_delay)
                .await;
        if let EditState::Loaded { .. } = state {
            self.form.hydrate(&self.store.form_data());
            self.form.clear_errors();
            self.navigation.reset().await;
        }
        state
    }

    /// Flushes the form and writes the store out one last time.
    pub async fn finish(self) {
        self.form.unmount().await;
        self.store.dispose().await;
    }
}
