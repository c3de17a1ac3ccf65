//! The mounted form: a working copy of the draft plus its error map.
//!
//! Data only flows store → form through [`MountedForm::hydrate`] (at mount
//! or on explicit rehydration), and form → store through the debounced
//! sync task. The sync task compares serializations so a hydration never
//! echoes back into the store.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::models::CvFormData;
use crate::store::FormStore;
use crate::wizard::fields::FieldPath;
use crate::wizard::form_errors::FormErrors;
use crate::wizard::schema::ValidationIssue;

pub const DEFAULT_SYNC_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct MountedForm {
    values: watch::Sender<CvFormData>,
    errors: Mutex<FormErrors>,
    last_synced: Arc<Mutex<String>>,
    store: Arc<FormStore>,
    sync_task: Option<JoinHandle<()>>,
}

fn serialize(data: &CvFormData) -> String {
    serde_json::to_string(data).unwrap_or_default()
}

impl MountedForm {
    /// Mounts a fresh form against `store`: waits for the store to finish
    /// hydrating, copies its draft in once if it identifies someone, then
    /// starts syncing edits back.
    pub async fn mount(store: Arc<FormStore>, debounce: Duration) -> Self {
        store.on_finish_hydration().await;

        let (values, _) = watch::channel(CvFormData::default());
        let mut form = Self {
            values,
            errors: Mutex::new(FormErrors::default()),
            last_synced: Arc::new(Mutex::new(serialize(&CvFormData::default()))),
            store,
            sync_task: None,
        };

        let stored = form.store.form_data();
        if stored.has_identity() && form.hydrate(&stored) {
            debug!("Hydrated mounted form from store");
        }

        let rx = form.values.subscribe();
        form.sync_task = Some(tokio::spawn(sync_loop(
            rx,
            form.store.clone(),
            form.last_synced.clone(),
            debounce,
        )));
        form
    }

    /// Replaces the working copy with `snapshot` when they differ.
    /// Returns whether anything changed. Hydrating twice from the same
    /// snapshot is a no-op the second time.
    pub fn hydrate(&self, snapshot: &CvFormData) -> bool {
        let incoming = serialize(snapshot);
        if incoming == serialize(&self.values.borrow()) {
            return false;
        }
        *self.last_synced.lock().unwrap_or_else(PoisonError::into_inner) = incoming;
        self.values.send_replace(snapshot.clone());
        true
    }

    pub fn values(&self) -> CvFormData {
        self.values.borrow().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut CvFormData)) {
        self.values.send_modify(f);
    }

    pub fn errors(&self) -> FormErrors {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the errors under `scope` with `issues`; errors elsewhere
    /// are kept.
    pub fn apply_validation(&self, scope: &[FieldPath], issues: &[ValidationIssue]) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace_scope(scope, issues);
    }

    pub fn clear_errors(&self) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Pushes the working copy now, skipping the debounce window.
    pub async fn flush(&self) {
        push_if_changed(&self.store, &self.last_synced, self.values()).await;
    }

    /// Stops syncing after pushing any pending edit.
    pub async fn unmount(mut self) {
        if let Some(task) = self.sync_task.take() {
            task.abort();
        }
        self.flush().await;
    }
}

impl Drop for MountedForm {
    fn drop(&mut self) {
        if let Some(task) = self.sync_task.take() {
            task.abort();
        }
    }
}

async fn sync_loop(
    mut rx: watch::Receiver<CvFormData>,
    store: Arc<FormStore>,
    last_synced: Arc<Mutex<String>>,
    debounce: Duration,
) {
    while rx.changed().await.is_ok() {
        // coalesce a burst of edits into one push
        loop {
            match tokio::time::timeout(debounce, rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => return,
                Err(_) => break,
            }
        }
        let snapshot = rx.borrow_and_update().clone();
        push_if_changed(&store, &last_synced, snapshot).await;
    }
}

async fn push_if_changed(store: &FormStore, last_synced: &Mutex<String>, snapshot: CvFormData) {
    let serialized = serialize(&snapshot);
    {
        let mut last = last_synced.lock().unwrap_or_else(PoisonError::into_inner);
        if *last == serialized {
            trace!("Form unchanged since last sync");
            return;
        }
        *last = serialized;
    }
    store.replace_form_data(snapshot).await;
}
