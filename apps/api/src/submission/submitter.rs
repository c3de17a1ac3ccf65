use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::client::api::CvApi;
use crate::models::CvFormData;
use crate::store::FormStore;
use crate::submission::{
    SubmissionAssembler, SubmissionPhase, SubmitError, SubmitHandler, SubmitReceipt,
};
use crate::wizard::form_errors::FormErrors;
use crate::wizard::progress::StepPosition;

pub const PREVIEW_PATH: &str = "/cvgen/preview";

/// Terminal submit: assemble, validate, then create or update the CV.
///
/// Creates when the session has no `userId` yet, updates otherwise. Only
/// one submission runs at a time; a second call while one is in flight
/// fails with `SubmitError::InFlight` without side effects.
pub struct CvSubmitter {
    assembler: SubmissionAssembler,
    api: Arc<dyn CvApi>,
    store: Arc<FormStore>,
    phase: watch::Sender<SubmissionPhase>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CvSubmitter {
    pub fn new(assembler: SubmissionAssembler, api: Arc<dyn CvApi>, store: Arc<FormStore>) -> Self {
        let (phase, _) = watch::channel(SubmissionPhase::Idle);
        Self {
            assembler,
            api,
            store,
            phase,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        *self.phase.borrow()
    }

    /// Phase changes, for a loading indicator.
    pub fn watch_phase(&self) -> watch::Receiver<SubmissionPhase> {
        self.phase.subscribe()
    }

    async fn run(&self, form: CvFormData, at: StepPosition) -> Result<SubmitReceipt, SubmitError> {
        self.phase.send_replace(SubmissionPhase::Validating);
        let sources = SubmissionAssembler::gather(form, &self.store).await;
        let (payload, issues) = self.assembler.prepare(&sources).await;
        if !issues.is_empty() {
            warn!(
                step = at.step,
                sub_step = at.sub_step,
                issues = issues.len(),
                "CV failed full validation; nothing sent"
            );
            self.store
                .set_form_errors(issues.iter().copied().collect::<FormErrors>());
            return Err(SubmitError::Invalid(self.assembler.label(&issues)));
        }
        self.store.clear_form_errors();

        self.phase.send_replace(SubmissionPhase::Submitting);
        let result = match self.store.user_id() {
            Some(user_id) => self.api.update_cv(user_id, &payload).await,
            None => self.api.submit_cv(&payload).await,
        };

        match result {
            Ok(user_id) => {
                info!(%user_id, "CV saved");
                self.store.set_user_id(Some(user_id)).await;
                self.store.replace_form_data(payload).await;
                self.store.set_progress(None).await;
                Ok(SubmitReceipt {
                    user_id,
                    redirect_to: format!("{PREVIEW_PATH}?userId={user_id}"),
                })
            }
            Err(e) => {
                error!(
                    step = at.step,
                    sub_step = at.sub_step,
                    error = %e,
                    "CV submission failed"
                );
                Err(SubmitError::Network(e))
            }
        }
    }
}

#[async_trait]
impl SubmitHandler for CvSubmitter {
    async fn submit(&self, form: CvFormData, at: StepPosition) -> Result<SubmitReceipt, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _guard = InFlight(&self.in_flight);
        let result = self.run(form, at).await;
        self.phase.send_replace(SubmissionPhase::Idle);
        result
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use uuid::Uuid;

    use crate::client::api::{ApiError, FetchedCv};
    use crate::i18n::{Catalog, Locale};
    use crate::store::tests::memory_store;
    use crate::wizard::schema::tests::complete_cv;
    use crate::wizard::schema::StandardSchema;

    /// In-memory CV API that records calls.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub submits: AtomicUsize,
        pub updates: AtomicUsize,
        pub fail_with: Mutex<Option<u16>>,
        pub delay: Option<Duration>,
        pub stored: Mutex<Option<FetchedCv>>,
    }

    impl FakeApi {
        pub(crate) fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Default::default()
            }
        }

        fn failure(&self) -> Option<ApiError> {
            self.fail_with.lock().unwrap().map(|status| {
                if status == 404 {
                    ApiError::NotFound
                } else {
                    ApiError::Status { status, message: "boom".into() }
                }
            })
        }

        async fn pause(&self) {
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
        }
    }

    #[async_trait]
    impl CvApi for FakeApi {
        async fn submit_cv(&self, cv: &CvFormData) -> Result<Uuid, ApiError> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            if let Some(e) = self.failure() {
                return Err(e);
            }
            let user_id = Uuid::new_v4();
            *self.stored.lock().unwrap() = Some(FetchedCv { user_id, cv: cv.clone() });
            Ok(user_id)
        }

        async fn update_cv(&self, user_id: Uuid, cv: &CvFormData) -> Result<Uuid, ApiError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            if let Some(e) = self.failure() {
                return Err(e);
            }
            *self.stored.lock().unwrap() = Some(FetchedCv { user_id, cv: cv.clone() });
            Ok(user_id)
        }

        async fn fetch_cv(&self, user_id: Uuid) -> Result<FetchedCv, ApiError> {
            self.pause().await;
            if let Some(e) = self.failure() {
                return Err(e);
            }
            self.stored
                .lock()
                .unwrap()
                .clone()
                .filter(|f| f.user_id == user_id)
                .ok_or(ApiError::NotFound)
        }
    }

    async fn submitter(api: Arc<FakeApi>) -> (CvSubmitter, Arc<FormStore>) {
        let (store, _) = memory_store().await;
        let assembler =
            SubmissionAssembler::new(Arc::new(StandardSchema), Arc::new(Catalog::new(Locale::En)));
        (CvSubmitter::new(assembler, api, store.clone()), store)
    }

    #[tokio::test]
    async fn test_first_submit_creates_and_records_user_id() {
        let api = Arc::new(FakeApi::default());
        let (submitter, store) = submitter(api.clone()).await;
        store.set_progress(Some(StepPosition::terminal())).await;

        let receipt = submitter
            .submit(complete_cv(), StepPosition::terminal())
            .await
            .unwrap();

        assert_eq!(api.submits.load(Ordering::SeqCst), 1);
        assert_eq!(store.user_id(), Some(receipt.user_id));
        assert_eq!(store.progress(), None);
        assert!(receipt.redirect_to.starts_with("/cvgen/preview?userId="));
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_known_user_updates() {
        let api = Arc::new(FakeApi::default());
        let (submitter, store) = submitter(api.clone()).await;
        let user = Uuid::new_v4();
        store.set_user_id(Some(user)).await;

        let receipt = submitter
            .submit(complete_cv(), StepPosition::terminal())
            .await
            .unwrap();

        assert_eq!(receipt.user_id, user);
        assert_eq!(api.updates.load(Ordering::SeqCst), 1);
        assert_eq!(api.submits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_network() {
        let api = Arc::new(FakeApi::default());
        let (submitter, store) = submitter(api.clone()).await;
        let mut cv = complete_cv();
        cv.languages.clear();

        let err = submitter.submit(cv, StepPosition::terminal()).await.unwrap_err();

        match err {
            SubmitError::Invalid(v) => {
                assert_eq!(v.issues[0].message, "At least one language is required")
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(api.submits.load(Ordering::SeqCst), 0);
        assert!(!store.form_errors().is_empty());
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_network_failure_is_reported_and_retryable() {
        let api = Arc::new(FakeApi::default());
        *api.fail_with.lock().unwrap() = Some(500);
        let (submitter, store) = submitter(api.clone()).await;

        let err = submitter
            .submit(complete_cv(), StepPosition::terminal())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Network(ApiError::Status { status: 500, .. })));
        assert_eq!(
            err.user_message(&Catalog::new(Locale::En)),
            "Your CV could not be saved. Please try again."
        );
        assert_eq!(store.user_id(), None);

        *api.fail_with.lock().unwrap() = None;
        assert!(submitter.submit(complete_cv(), StepPosition::terminal()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_in_flight_is_refused() {
        let api = Arc::new(FakeApi::slow(Duration::from_secs(1)));
        let (submitter, _) = submitter(api.clone()).await;

        let (a, b) = tokio::join!(
            submitter.submit(complete_cv(), StepPosition::terminal()),
            submitter.submit(complete_cv(), StepPosition::terminal()),
        );

        assert!(a.is_ok());
        assert!(matches!(b, Err(SubmitError::InFlight)));
        assert_eq!(api.submits.load(Ordering::SeqCst), 1);
    }
}
