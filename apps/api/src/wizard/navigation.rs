use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::form::MountedForm;
use crate::store::FormStore;
use crate::submission::{SubmitError, SubmitHandler, SubmitReceipt};
use crate::wizard::form_errors::FormErrors;
use crate::wizard::gate::ValidationGate;
use crate::wizard::progress::{ProgressState, StepPosition};

/// What a navigation intent did.
#[derive(Debug)]
pub enum NavOutcome {
    /// Moved to a new position.
    Moved(StepPosition),
    /// The current sub-step failed validation; the position is unchanged.
    Blocked { errors: FormErrors },
    Submitted(SubmitReceipt),
    SubmitFailed(SubmitError),
    /// Another validation or a submission is still running.
    Busy,
    /// Nothing to do (start of the wizard, forward jump, same step).
    Unchanged,
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, NavOutcome::Moved(_))
    }
}

struct Flag<'a>(&'a AtomicBool);

impl<'a> Flag<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Flag(flag))
    }
}

impl Drop for Flag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives the wizard through its steps.
///
/// Forward moves go through the validation gate, backward moves never do.
/// On the terminal sub-step `go_next` hands the form to the submit handler
/// instead of advancing. Every accepted move is saved to the store so a
/// reload resumes at the same place.
pub struct NavigationController {
    state: Mutex<ProgressState>,
    gate: ValidationGate,
    submitter: Arc<dyn SubmitHandler>,
    store: Arc<FormStore>,
    is_validating: AtomicBool,
    is_submitting: AtomicBool,
    completed: AtomicBool,
}

impl NavigationController {
    /// Starts at the store's saved position, if it is still a valid one.
    pub fn new(gate: ValidationGate, submitter: Arc<dyn SubmitHandler>, store: Arc<FormStore>) -> Self {
        let state = ProgressState::restore(store.progress());
        Self {
            state: Mutex::new(state),
            gate,
            submitter,
            store,
            is_validating: AtomicBool::new(false),
            is_submitting: AtomicBool::new(false),
            completed: AtomicBool::new(false),
        }
    }

    fn state(&self) -> ProgressState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn position(&self) -> StepPosition {
        self.state().position()
    }

    /// Percentage of the wizard done. Reports 100 once the CV is
    /// submitted, until the next reset.
    pub fn progress(&self) -> f64 {
        if self.completed.load(Ordering::SeqCst) {
            100.0
        } else {
            self.state().progress()
        }
    }

    pub fn is_validating(&self) -> bool {
        self.is_validating.load(Ordering::SeqCst)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting.load(Ordering::SeqCst)
    }

    async fn apply(&self, f: impl FnOnce(&mut ProgressState) -> bool) -> NavOutcome {
        let position = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !f(&mut state) {
                return NavOutcome::Unchanged;
            }
            state.position()
        };
        self.completed.store(false, Ordering::SeqCst);
        self.store.set_progress(Some(position)).await;
        debug!(step = position.step, sub_step = position.sub_step, "Moved");
        NavOutcome::Moved(position)
    }

    /// Validates the current sub-step and advances, or submits when the
    /// wizard is on its last sub-step.
    pub async fn go_next(&self, form: &MountedForm) -> NavOutcome {
        if self.is_submitting() {
            return NavOutcome::Busy;
        }
        let Some(validating) = Flag::acquire(&self.is_validating) else {
            return NavOutcome::Busy;
        };

        let at = self.position();
        if !self.gate.validate(at, form).await {
            return NavOutcome::Blocked { errors: form.errors() };
        }

        if !self.state().is_terminal() {
            // the position may have been reset while validating
            return self
                .apply(|state| state.position() == at && state.advance())
                .await;
        }

        let Some(_submitting) = Flag::acquire(&self.is_submitting) else {
            return NavOutcome::Busy;
        };
        drop(validating);

        match self.submitter.submit(form.values(), at).await {
            Ok(receipt) => {
                info!(user_id = %receipt.user_id, "Wizard completed");
                self.state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .reset();
                self.completed.store(true, Ordering::SeqCst);
                NavOutcome::Submitted(receipt)
            }
            Err(e) => NavOutcome::SubmitFailed(e),
        }
    }

    fn is_busy(&self) -> bool {
        self.is_validating() || self.is_submitting()
    }

    /// Steps back one sub-step. Never validates.
    pub async fn go_previous(&self) -> NavOutcome {
        if self.is_busy() {
            return NavOutcome::Busy;
        }
        self.apply(ProgressState::retreat).await
    }

    /// Jumps to the first sub-step of an already visited step.
    pub async fn go_to_step(&self, target: usize) -> NavOutcome {
        if self.is_busy() {
            return NavOutcome::Busy;
        }
        self.apply(|state| state.jump_back(target)).await
    }

    pub async fn reset(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
        self.completed.store(false, Ordering::SeqCst);
        self.store.set_progress(None).await;
    }
}
