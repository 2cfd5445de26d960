use serde::Serialize;
use std::fmt;

// Stable classification of auth provider failures shown to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    InvalidCredentials,
    UserNotFound,
    EmailAlreadyExists,
    WeakPassword,
    EmailNotConfirmed,
    TooManyRequests,
    NetworkError,
    #[serde(rename = "unknown_error")]
    Unknown,
}

impl AuthErrorKind {
    // Wire code used in JSON responses and log fields.
    pub fn code(self) -> &'static str {
        match self {
            AuthErrorKind::InvalidCredentials => "invalid_credentials",
            AuthErrorKind::UserNotFound => "user_not_found",
            AuthErrorKind::EmailAlreadyExists => "email_already_exists",
            AuthErrorKind::WeakPassword => "weak_password",
            AuthErrorKind::EmailNotConfirmed => "email_not_confirmed",
            AuthErrorKind::TooManyRequests => "too_many_requests",
            AuthErrorKind::NetworkError => "network_error",
            AuthErrorKind::Unknown => "unknown_error",
        }
    }

    // Fixed user-facing copy; never derived from provider text.
    pub fn user_message(self) -> &'static str {
        match self {
            AuthErrorKind::InvalidCredentials => {
                "Invalid email or password. Please check your credentials and try again."
            }
            AuthErrorKind::UserNotFound => "No account found with this email address.",
            AuthErrorKind::EmailAlreadyExists => {
                "An account with this email address already exists. Please sign in instead."
            }
            AuthErrorKind::WeakPassword => {
                "Password is too weak. Please choose a stronger password with at least 8 characters."
            }
            AuthErrorKind::EmailNotConfirmed => {
                "Please verify your email address before signing in. Check your inbox for a confirmation link."
            }
            AuthErrorKind::TooManyRequests => {
                "Too many login attempts. Please wait a few minutes before trying again."
            }
            AuthErrorKind::NetworkError => {
                "Network error. Please check your connection and try again."
            }
            AuthErrorKind::Unknown => "An unexpected error occurred. Please try again.",
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// Result of classifying a raw provider message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: AuthErrorKind,
    pub message: &'static str,
    // Raw provider text, kept for diagnostics only.
    pub original_message: String,
}

// Failure reported by the auth provider boundary. Only `message` is inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub message: String,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "auth provider error {status}: {}", self.message),
            None => write!(f, "auth provider error: {}", self.message),
        }
    }
}

impl std::error::Error for ProviderError {}
