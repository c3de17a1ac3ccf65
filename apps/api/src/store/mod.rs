//! Form Data Store: the long-lived source of truth for the CV draft.
//!
//! One store per user session, shared as `Arc<FormStore>`. Every setter
//! updates memory first, notifies subscribers, then writes the persisted
//! envelope. Persistence failures are logged and otherwise ignored: the
//! in-memory state stays authoritative for the session.

pub mod storage;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{CvFormData, CvFormPatch};
use crate::wizard::form_errors::FormErrors;
use crate::wizard::progress::StepPosition;

pub use storage::{DraftStorage, FileDraftStorage, MemoryDraftStorage, StorageError};

pub const DEFAULT_STORAGE_KEY: &str = "cv-form-storage";
pub const STORAGE_VERSION: u32 = 1;

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub form_data: CvFormData,
    pub user_id: Option<Uuid>,
    pub welcome_seen: bool,
    pub progress: Option<StepPosition>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    version: u32,
    state: StoreSnapshot,
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub key: String,
    pub version: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            version: STORAGE_VERSION,
        }
    }
}

pub struct FormStore {
    /// `None` once disposed, which closes every subscriber.
    state: Mutex<Option<watch::Sender<StoreSnapshot>>>,
    latest: watch::Receiver<StoreSnapshot>,
    errors: Mutex<FormErrors>,
    hydrated: watch::Sender<bool>,
    storage: Arc<dyn DraftStorage>,
    options: StoreOptions,
}

impl FormStore {
    /// Creates the store and loads the persisted draft, if any. The store
    /// reports itself hydrated once loading finished, whatever the outcome.
    pub async fn init(storage: Arc<dyn DraftStorage>, options: StoreOptions) -> Arc<Self> {
        let (state, latest) = watch::channel(StoreSnapshot::default());
        let (hydrated, _) = watch::channel(false);
        let store = Arc::new(Self {
            state: Mutex::new(Some(state)),
            latest,
            errors: Mutex::new(FormErrors::default()),
            hydrated,
            storage,
            options,
        });

        if let Some(snapshot) = store.read_persisted().await {
            info!(
                key = %store.options.key,
                user_id = ?snapshot.user_id,
                "Rehydrated CV draft from storage"
            );
            store.send(|s| *s = snapshot);
        }
        store.hydrated.send_replace(true);
        store
    }

    /// Writes the final state and stops accepting updates. Subscribers
    /// see their channel close; reads keep returning the final state.
    pub async fn dispose(&self) {
        if self.sender().take().is_none() {
            return;
        }
        self.write_persisted().await;
        debug!(key = %self.options.key, "Form store disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.sender().is_none()
    }

    fn sender(&self) -> MutexGuard<'_, Option<watch::Sender<StoreSnapshot>>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` and notifies subscribers. `false` once disposed.
    fn send(&self, f: impl FnOnce(&mut StoreSnapshot)) -> bool {
        match self.sender().as_ref() {
            Some(tx) => {
                tx.send_modify(f);
                true
            }
            None => false,
        }
    }

    pub fn has_hydrated(&self) -> bool {
        *self.hydrated.borrow()
    }

    /// Resolves once the persisted draft has been loaded.
    pub async fn on_finish_hydration(&self) {
        let mut rx = self.hydrated.subscribe();
        // the sender lives as long as `self`, so this cannot fail
        let _ = rx.wait_for(|done| *done).await;
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        match self.sender().as_ref() {
            Some(tx) => tx.subscribe(),
            None => {
                let mut rx = self.latest.clone();
                rx.borrow_and_update();
                rx
            }
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.latest.borrow().clone()
    }

    pub fn form_data(&self) -> CvFormData {
        self.latest.borrow().form_data.clone()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.latest.borrow().user_id
    }

    pub fn welcome_seen(&self) -> bool {
        self.latest.borrow().welcome_seen
    }

    pub fn progress(&self) -> Option<StepPosition> {
        self.latest.borrow().progress
    }

    pub fn form_errors(&self) -> FormErrors {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn set_form_data(&self, patch: CvFormPatch) {
        self.update(|s| patch.apply_to(&mut s.form_data)).await;
    }

    pub async fn replace_form_data(&self, data: CvFormData) {
        self.update(|s| s.form_data = data).await;
    }

    pub async fn set_user_id(&self, user_id: Option<Uuid>) {
        self.update(|s| s.user_id = user_id).await;
    }

    pub async fn set_welcome_seen(&self, seen: bool) {
        self.update(|s| s.welcome_seen = seen).await;
    }

    pub async fn set_progress(&self, progress: Option<StepPosition>) {
        self.update(|s| s.progress = progress).await;
    }

    /// Errors are session-only and never persisted.
    pub fn set_form_errors(&self, errors: FormErrors) {
        *self.errors.lock().unwrap_or_else(PoisonError::into_inner) = errors;
    }

    pub fn clear_form_errors(&self) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Clears the draft, its errors and saved progress. The session's
    /// `userId` and welcome flag survive.
    pub async fn reset_form(&self) {
        self.clear_form_errors();
        self.update(|s| {
            s.form_data = CvFormData::default();
            s.progress = None;
        })
        .await;
    }

    /// Drops everything, including the persisted entry. A disposed store
    /// is left untouched.
    pub async fn clear_session(&self) {
        if !self.send(|s| *s = StoreSnapshot::default()) {
            debug!("Ignoring clear on disposed form store");
            return;
        }
        self.clear_form_errors();
        if let Err(e) = self.storage.remove_item(&self.options.key).await {
            debug!(key = %self.options.key, error = %e, "Failed to remove persisted draft");
        }
    }

    /// Reads the persisted envelope directly, bypassing memory. `None` when
    /// absent, unreadable or written by another storage version.
    pub async fn read_persisted(&self) -> Option<StoreSnapshot> {
        let raw = match self.storage.get_item(&self.options.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(key = %self.options.key, error = %e, "Failed to read persisted draft");
                return None;
            }
        };
        match serde_json::from_str::<PersistedEnvelope>(&raw) {
            Ok(env) if env.version == self.options.version => Some(env.state),
            Ok(env) => {
                debug!(
                    found = env.version,
                    expected = self.options.version,
                    "Ignoring persisted draft from another storage version"
                );
                None
            }
            Err(e) if e.is_data() => {
                warn!(
                    key = %self.options.key,
                    error = %e,
                    "Persisted draft does not match the CV draft shape"
                );
                None
            }
            Err(e) => {
                warn!(key = %self.options.key, error = %e, "Persisted draft is not valid JSON");
                None
            }
        }
    }

    async fn update(&self, f: impl FnOnce(&mut StoreSnapshot)) {
        if !self.send(f) {
            debug!("Ignoring update on disposed form store");
            return;
        }
        self.write_persisted().await;
    }

    async fn write_persisted(&self) {
        let envelope = PersistedEnvelope {
            version: self.options.version,
            state: self.snapshot(),
        };
        let payload = match serde_json::to_string(&envelope) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "Failed to serialize CV draft");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.options.key, &payload).await {
            debug!(key = %self.options.key, error = %e, "Failed to persist CV draft");
        }
    }
}
