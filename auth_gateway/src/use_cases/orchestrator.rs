use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::classifier::classify;
use crate::domain::entities::Notice;
use crate::domain::forms::FieldErrors;
use crate::domain::ports::FormAction;
use crate::domain::submission::{ActionSuccess, FormEffect, FormKind, SubmissionState};

/// What a call to [`FormOrchestrator::submit`] did.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight, or the form is unmounted. Nothing
    /// was dispatched and the state is unchanged.
    Rejected,
    /// Input failed validation. Nothing was dispatched and the state is
    /// unchanged.
    Invalid(FieldErrors),
    /// The response arrived after the form was unmounted and was discarded.
    Dropped,
    /// The submission reached a terminal state.
    Completed {
        state: SubmissionState,
        effects: Vec<FormEffect>,
    },
}

struct FormSlot {
    state: SubmissionState,
    mounted: bool,
}

/// Per-form submission controller.
///
/// Serializes submissions through a pending gate, classifies failures, and
/// hands side effects back to the caller instead of performing them. The
/// lock is only taken for synchronous check-and-set and is never held
/// across the action's await point.
pub struct FormOrchestrator<A> {
    action: A,
    slot: Mutex<FormSlot>,
}

impl<A> FormOrchestrator<A>
where
    A: FormAction,
{
    pub fn new(action: A) -> Self {
        Self {
            action,
            slot: Mutex::new(FormSlot {
                state: SubmissionState::Idle,
                mounted: true,
            }),
        }
    }

    pub fn form(&self) -> FormKind {
        self.action.form()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock_slot().state.clone()
    }

    // Any response still in flight will be ignored.
    pub fn unmount(&self) {
        self.lock_slot().mounted = false;
    }

    pub async fn submit(&self, input: A::Input) -> SubmitOutcome {
        let form = self.action.form();
        let previous = {
            let mut slot = self.lock_slot();
            if !slot.mounted || slot.state.is_pending() {
                debug!(form = form.name(), "submission rejected");
                return SubmitOutcome::Rejected;
            }
            if let Err(errors) = self.action.validate(&input) {
                debug!(form = form.name(), "submission failed validation");
                return SubmitOutcome::Invalid(errors);
            }
            std::mem::replace(&mut slot.state, SubmissionState::Pending)
        };
        let pending = PendingReset {
            slot: &self.slot,
            previous: Some(previous),
        };

        let submission_id = Uuid::new_v4();
        debug!(%submission_id, form = form.name(), "submission dispatched");

        let result = self.action.run(input).await;
        pending.disarm();

        let mut slot = self.lock_slot();
        if !slot.mounted {
            debug!(%submission_id, form = form.name(), "late response dropped");
            return SubmitOutcome::Dropped;
        }

        match result {
            Ok(success) => {
                slot.state = SubmissionState::Succeeded {
                    message: success.message.clone(),
                };
                let state = slot.state.clone();
                drop(slot);

                debug!(%submission_id, form = form.name(), "submission succeeded");
                SubmitOutcome::Completed {
                    state,
                    effects: success_effects(form, success),
                }
            }
            Err(err) => {
                let error = classify(&err.message);
                warn!(
                    %submission_id,
                    form = form.name(),
                    kind = error.kind.code(),
                    status = ?err.status,
                    raw = %error.original_message,
                    "submission failed"
                );

                let mut effects = Vec::new();
                if let Some(title) = form.failure_title() {
                    effects.push(FormEffect::Notify(Notice::destructive(title, error.message)));
                }
                slot.state = SubmissionState::Failed { error };
                let state = slot.state.clone();

                SubmitOutcome::Completed { state, effects }
            }
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, FormSlot> {
        // State is plain data; a panic elsewhere cannot leave it half-written.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Puts the pre-submit state back if the submit future is dropped while the
// action is in flight, so the form does not stay pending forever.
struct PendingReset<'a> {
    slot: &'a Mutex<FormSlot>,
    previous: Option<SubmissionState>,
}

impl PendingReset<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for PendingReset<'_> {
    fn drop(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.state.is_pending() {
            slot.state = previous;
        }
    }
}

// Session effects first, then the toast, then at most one navigation.
fn success_effects(form: FormKind, success: ActionSuccess) -> Vec<FormEffect> {
    let mut effects = Vec::new();

    if let Some(session) = success.session {
        effects.push(FormEffect::PersistSession(session));
    }
    if success.clears_session {
        effects.push(FormEffect::ClearSession);
    }
    if let Some(verifier) = success.code_verifier {
        effects.push(FormEffect::PersistCodeVerifier(verifier));
    }
    if let (Some(title), Some(message)) = (form.success_title(), success.message) {
        effects.push(FormEffect::Notify(Notice::success(title, message)));
    }
    if let Some(redirect) = success.redirect {
        effects.push(FormEffect::Navigate(redirect));
    }

    effects
}
