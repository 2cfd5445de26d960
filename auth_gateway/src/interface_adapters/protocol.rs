use serde::{Deserialize, Serialize};

use crate::domain::entities::{Notice, NoticeVariant};
use crate::domain::errors::{AuthErrorKind, ClassifiedError};
use crate::domain::forms::FieldErrors;
use crate::domain::submission::{SubmissionPhase, SubmissionState};

// Classified error as rendered to the browser; raw provider text stays out.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: AuthErrorKind,
    pub message: &'static str,
}

impl From<&ClassifiedError> for ErrorBody {
    fn from(error: &ClassifiedError) -> Self {
        Self {
            kind: error.kind,
            message: error.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoticeBody {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
}

impl From<Notice> for NoticeBody {
    fn from(notice: Notice) -> Self {
        Self {
            variant: notice.variant,
            title: notice.title,
            description: notice.description,
        }
    }
}

// Response payload for every form action.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub phase: SubmissionPhase,
    pub success_message: Option<String>,
    pub error: Option<ErrorBody>,
    pub redirect: Option<String>,
    pub notices: Vec<NoticeBody>,
    pub field_errors: FieldErrors,
}

impl FormResponse {
    pub fn from_state(state: &SubmissionState) -> Self {
        Self {
            phase: state.phase(),
            success_message: state.success_message().map(str::to_string),
            error: state.error().map(ErrorBody::from),
            redirect: None,
            notices: Vec::new(),
            field_errors: FieldErrors::default(),
        }
    }

    pub fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            field_errors,
            ..Self::from_state(&SubmissionState::Idle)
        }
    }
}

// Query parameters on the auth callback route.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub next: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

// Query parameters the login page forwards for notice lookup.
#[derive(Debug, Deserialize)]
pub struct LoginNoticeQuery {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoticesResponse {
    pub notices: Vec<NoticeBody>,
}

// Request payload for the strength meter.
#[derive(Debug, Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
