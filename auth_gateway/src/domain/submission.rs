use serde::Serialize;

use crate::domain::entities::{Notice, ProviderSession, Redirect};
use crate::domain::errors::ClassifiedError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Per-form submission state.
///
/// The terminal variants carry either a success message or an error, never
/// both. A new submission replaces the whole value with `Pending`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded {
        message: Option<String>,
    },
    Failed {
        error: ClassifiedError,
    },
}

impl SubmissionState {
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            SubmissionState::Idle => SubmissionPhase::Idle,
            SubmissionState::Pending => SubmissionPhase::Pending,
            SubmissionState::Succeeded { .. } => SubmissionPhase::Succeeded,
            SubmissionState::Failed { .. } => SubmissionPhase::Failed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        match self {
            SubmissionState::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded { message } => message.as_deref(),
            _ => None,
        }
    }
}

// Which form a submission belongs to; drives toast copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    SignIn,
    SignUp,
    SignOut,
    ForgotPassword,
    ResetPassword,
}

impl FormKind {
    pub fn name(self) -> &'static str {
        match self {
            FormKind::SignIn => "sign_in",
            FormKind::SignUp => "sign_up",
            FormKind::SignOut => "sign_out",
            FormKind::ForgotPassword => "forgot_password",
            FormKind::ResetPassword => "reset_password",
        }
    }

    // Title of the toast shown on success, if the form toasts at all.
    pub fn success_title(self) -> Option<&'static str> {
        match self {
            FormKind::SignUp => Some("Account created!"),
            FormKind::ForgotPassword => Some("Reset email sent!"),
            FormKind::SignIn | FormKind::SignOut | FormKind::ResetPassword => None,
        }
    }

    // Reset-password renders its error inline instead of toasting.
    pub fn failure_title(self) -> Option<&'static str> {
        match self {
            FormKind::SignIn => Some("Sign in failed"),
            FormKind::SignUp => Some("Sign up failed"),
            FormKind::SignOut => Some("Sign out failed"),
            FormKind::ForgotPassword => Some("Failed to send reset email"),
            FormKind::ResetPassword => None,
        }
    }
}

/// Success payload of a form action, passed through verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSuccess {
    pub message: Option<String>,
    pub redirect: Option<Redirect>,
    pub session: Option<ProviderSession>,
    pub clears_session: bool,
    // PKCE verifier for an email link the action just requested.
    pub code_verifier: Option<String>,
}

/// Side effects for the presentation layer, produced after the state
/// transition they belong to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEffect {
    Navigate(Redirect),
    Notify(Notice),
    PersistSession(ProviderSession),
    ClearSession,
    PersistCodeVerifier(String),
}
